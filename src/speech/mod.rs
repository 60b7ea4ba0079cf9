pub mod espeak;

use anyhow::Result;

/// Corrective audio for one misread word, keyed by the expected word.
#[derive(Clone, Debug)]
pub struct PronunciationClip {
    pub word: String,
    pub audio: Vec<u8>,
}

/// External speech-synthesis collaborator. Injected into the session flow so
/// tests can substitute doubles; never held as process-global state.
///
/// Output is raw audio bytes (WAV). The same inputs are not guaranteed to
/// produce identical bytes across calls.
pub trait SpeechSynthesizer {
    fn synthesize(&mut self, text: &str, rate: u32) -> Result<Vec<u8>>;
}

/// Synthesizer that always fails. Audio enrichment degrades to nothing;
/// comparisons still succeed with zero clips.
pub struct NullSynthesizer;

impl SpeechSynthesizer for NullSynthesizer {
    fn synthesize(&mut self, _text: &str, _rate: u32) -> Result<Vec<u8>> {
        anyhow::bail!("speech synthesis disabled")
    }
}
