use thiserror::Error;

/// Reportable failures from session-flow operations.
///
/// Generator and per-word synthesis failures are deliberately absent: both
/// are recovered locally (fallback sentence, skipped clip) and never surface
/// to the caller.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The learner has no attempt history, so there is no reference text to
    /// compare against or read aloud.
    #[error("no reference text found for learner")]
    NoReference,

    #[error("speech synthesis failed")]
    Synthesis(#[source] anyhow::Error),

    #[error("store operation failed")]
    Store(#[source] anyhow::Error),
}
