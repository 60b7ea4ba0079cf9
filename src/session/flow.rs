//! Orchestration of the practice loop: issue a paragraph at the learner's
//! difficulty, grade a submitted attempt, fold the result into the
//! capability profile. Thin sequencing over the engine, store, and the two
//! external collaborators; all decision logic lives below this layer.

use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::compare::{compare_texts, is_completed};
use crate::error::FlowError;
use crate::generator::{DifficultyTier, ParagraphGenerator, generate_or_fallback};
use crate::speech::{PronunciationClip, SpeechSynthesizer};
use crate::store::json_store::JsonStore;
use crate::store::schema::{Attempt, IncorrectWord};

/// Points awarded for a perfect attempt.
const COMPLETION_POINTS: u32 = 10;

/// Result of grading one submitted attempt.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub incorrect_words: Vec<IncorrectWord>,
    pub pronunciations: Vec<PronunciationClip>,
    pub completed: bool,
    pub points: u32,
}

/// One practice session surface. Calls are request-scoped and run to
/// completion; `&mut self` keeps at most one operation in flight per flow.
pub struct SessionFlow {
    store: JsonStore,
    generator: Box<dyn ParagraphGenerator>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    config: Config,
}

impl SessionFlow {
    pub fn new(
        store: JsonStore,
        generator: Box<dyn ParagraphGenerator>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        config: Config,
    ) -> Self {
        Self {
            store,
            generator,
            synthesizer,
            config,
        }
    }

    /// Resolve an optional caller-supplied identity to a learner id.
    /// Anonymous calls all share the configured guest profile and history.
    fn resolve_learner(&self, learner: Option<&str>) -> String {
        match learner {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.config.guest_learner_id.clone(),
        }
    }

    /// First paragraph of a session. For a new learner this issues the record
    /// at sequence index 0; a returning learner continues their sequence.
    pub fn start(&mut self, learner: Option<&str>) -> Result<String, FlowError> {
        self.next_paragraph(learner)
    }

    /// Issue a new paragraph at the learner's current difficulty tier.
    ///
    /// Always appends exactly one fresh attempt record (empty errors, both
    /// completion flags false) at sequence index one past the learner's
    /// current maximum. Generation failures silently take the fallback
    /// sentence.
    pub fn next_paragraph(&mut self, learner: Option<&str>) -> Result<String, FlowError> {
        let learner = self.resolve_learner(learner);

        let profile = self.store.load_profile(&learner);
        let tier = DifficultyTier::for_score(profile.capability_score);
        debug!(
            learner = %learner,
            score = profile.capability_score,
            tier = tier.as_str(),
            "issuing paragraph"
        );

        let paragraph = generate_or_fallback(self.generator.as_mut(), tier);

        let next_index = self
            .store
            .all_attempts(&learner)
            .last()
            .map(|a| a.sequence_index + 1)
            .unwrap_or(0);

        self.store
            .append_attempt(Attempt::issued(&learner, next_index, &paragraph))
            .map_err(FlowError::Store)?;

        Ok(paragraph)
    }

    /// Re-surface an earlier paragraph without touching the store.
    ///
    /// With no history returns `None`; with a single paragraph, that one;
    /// otherwise the most recent record whose sequence index is below the
    /// current maximum.
    pub fn prev_paragraph(&self, learner: Option<&str>) -> Option<String> {
        let learner = self.resolve_learner(learner);
        let all = self.store.all_attempts(&learner);

        if all.len() < 2 {
            return all.first().map(|a| a.reference_text.clone());
        }

        let latest_index = all.last().map(|a| a.sequence_index)?;
        all.iter()
            .rev()
            .find(|a| a.sequence_index < latest_index)
            .map(|a| a.reference_text.clone())
    }

    /// Grade a submitted attempt against the learner's latest reference.
    ///
    /// Appends a graded record (same sequence index as the paragraph it
    /// grades), folds the word/error counts into the capability profile, and
    /// returns the diff with corrective pronunciation clips. A clip that
    /// fails to synthesize is dropped; it never fails the submission.
    pub fn submit_attempt(
        &mut self,
        learner: Option<&str>,
        observed_text: &str,
    ) -> Result<SubmitOutcome, FlowError> {
        let learner = self.resolve_learner(learner);

        let latest = self
            .store
            .latest_attempt(&learner)
            .ok_or(FlowError::NoReference)?;

        let incorrect_words = compare_texts(observed_text, &latest.reference_text);
        let completed = is_completed(&incorrect_words);
        let pronunciations = self.pronunciation_clips(&incorrect_words);

        let graded = Attempt {
            learner_id: learner.clone(),
            sequence_index: latest.sequence_index,
            reference_text: latest.reference_text.clone(),
            incorrect_words: incorrect_words.clone(),
            text_completed: completed,
            audio_completed: latest.audio_completed,
            created_at: chrono::Utc::now(),
        };
        self.store.append_attempt(graded).map_err(FlowError::Store)?;

        let mut profile = self.store.load_profile(&learner);
        profile.record_attempt(&latest.reference_text, incorrect_words.len());
        self.store.save_profile(&profile).map_err(FlowError::Store)?;

        Ok(SubmitOutcome {
            incorrect_words,
            pronunciations,
            completed,
            points: if completed { COMPLETION_POINTS } else { 0 },
        })
    }

    /// Read the learner's latest reference text aloud at the given rate
    /// (words per minute), or the configured default rate.
    pub fn reference_audio(
        &mut self,
        learner: Option<&str>,
        rate: Option<u32>,
    ) -> Result<Vec<u8>, FlowError> {
        let learner = self.resolve_learner(learner);
        let latest = self
            .store
            .latest_attempt(&learner)
            .ok_or(FlowError::NoReference)?;

        let rate = rate.unwrap_or(self.config.speech_rate);
        self.synthesizer
            .synthesize(&latest.reference_text, rate)
            .map_err(FlowError::Synthesis)
    }

    /// Full attempt history for the learner, oldest paragraph first.
    pub fn progress(&self, learner: Option<&str>) -> Vec<Attempt> {
        let learner = self.resolve_learner(learner);
        self.store.all_attempts(&learner)
    }

    /// One corrective clip per mismatch with a known expected word. Entries
    /// with an empty expected word (extra words in the attempt) have nothing
    /// to pronounce.
    fn pronunciation_clips(&mut self, incorrect_words: &[IncorrectWord]) -> Vec<PronunciationClip> {
        let mut clips = Vec::new();
        for word in incorrect_words {
            if word.expected.is_empty() {
                continue;
            }
            let text = format!("The correct word is {}", word.expected);
            match self.synthesizer.synthesize(&text, self.config.speech_rate) {
                Ok(audio) => clips.push(PronunciationClip {
                    word: word.expected.clone(),
                    audio,
                }),
                Err(err) => {
                    warn!(word = %word.expected, error = %err, "skipping pronunciation clip");
                }
            }
        }
        clips
    }
}
