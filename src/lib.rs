//! Adaptive reading-practice core.
//!
//! A learner reads a reference paragraph aloud (or types a transcription)
//! and gets word-level correction feedback. Each graded attempt updates a
//! per-learner capability score, which in turn selects the difficulty tier
//! of the next generated paragraph.
//!
//! [`session::flow::SessionFlow`] is the public surface; routing, templating,
//! account storage, and real speech-to-text are out of scope and belong to
//! whatever layer embeds this crate.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod session;
pub mod speech;
pub mod store;

pub use config::Config;
pub use error::FlowError;
pub use generator::{DifficultyTier, FALLBACK_SENTENCE, ParagraphGenerator};
pub use session::flow::{SessionFlow, SubmitOutcome};
pub use speech::{PronunciationClip, SpeechSynthesizer};
pub use store::json_store::JsonStore;
pub use store::schema::{Attempt, CapabilityProfile, IncorrectWord};
