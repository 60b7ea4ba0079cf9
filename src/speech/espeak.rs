//! Subprocess-backed synthesizer using `espeak-ng`. WAV bytes are captured
//! from stdout, so no scoped files are left behind on any path.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

use crate::speech::SpeechSynthesizer;

pub struct EspeakSynthesizer {
    command: String,
}

impl EspeakSynthesizer {
    pub fn new() -> Self {
        Self {
            command: "espeak-ng".to_string(),
        }
    }

    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for EspeakSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesizer for EspeakSynthesizer {
    fn synthesize(&mut self, text: &str, rate: u32) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.command)
            .arg("--stdout")
            .arg("-s")
            .arg(rate.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to launch {}", self.command))?;

        // Text goes over stdin to avoid shell quoting issues with learner words.
        child
            .stdin
            .take()
            .context("no stdin handle on synthesizer process")?
            .write_all(text.as_bytes())
            .context("failed to send text to synthesizer")?;

        let output = child
            .wait_with_output()
            .context("synthesizer process failed")?;
        if !output.status.success() {
            bail!("{} exited with {}", self.command, output.status);
        }
        if output.stdout.is_empty() {
            bail!("synthesizer produced no audio");
        }
        Ok(output.stdout)
    }
}
