pub mod remote;

use anyhow::Result;
use tracing::warn;

/// Served when the external generator is unreachable or misbehaves. The
/// learner is never shown an error for a generation failure.
pub const FALLBACK_SENTENCE: &str = "The sun rises in the east and sets in the west.";

/// Difficulty buckets for generated paragraphs, ordered by ascending
/// learner capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyTier {
    VerySimple,
    Simple,
    Intermediate,
}

impl DifficultyTier {
    /// Map a capability score in (0, 1] to a tier. Thresholds are monotonic:
    /// below 0.7 very simple, below 0.9 simple, otherwise intermediate. A
    /// fresh learner (score 1.0) starts at the intermediate tier.
    pub fn for_score(score: f64) -> Self {
        if score < 0.7 {
            DifficultyTier::VerySimple
        } else if score < 0.9 {
            DifficultyTier::Simple
        } else {
            DifficultyTier::Intermediate
        }
    }

    /// Prompt sent to the text-generation service for this tier.
    pub fn prompt(self) -> &'static str {
        match self {
            DifficultyTier::VerySimple => {
                "Write a very simple English paragraph using short, easy words."
            }
            DifficultyTier::Simple => {
                "Generate a simple English paragraph using basic vocabulary and short sentences."
            }
            DifficultyTier::Intermediate => {
                "Generate an intermediate English paragraph with slightly challenging vocabulary. \
                 Keep it around 3-4 sentences."
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::VerySimple => "very-simple",
            DifficultyTier::Simple => "simple",
            DifficultyTier::Intermediate => "intermediate",
        }
    }
}

/// External text-generation collaborator. Implementations may block on the
/// network; callers treat any error as recoverable.
pub trait ParagraphGenerator {
    fn generate(&mut self, tier: DifficultyTier) -> Result<String>;
}

/// Ask the generator for a paragraph, falling back to [`FALLBACK_SENTENCE`]
/// on any failure. The failure is logged, not surfaced.
pub fn generate_or_fallback(generator: &mut dyn ParagraphGenerator, tier: DifficultyTier) -> String {
    match generator.generate(tier) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            warn!(tier = tier.as_str(), "generator returned empty paragraph, using fallback");
            FALLBACK_SENTENCE.to_string()
        }
        Err(err) => {
            warn!(tier = tier.as_str(), error = %err, "paragraph generation failed, using fallback");
            FALLBACK_SENTENCE.to_string()
        }
    }
}
