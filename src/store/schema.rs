use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

/// One position of mismatch between an attempt and its reference text.
/// `observed` is empty for a reference word the learner skipped; `expected`
/// is empty for an extra word the learner added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncorrectWord {
    pub observed: String,
    pub expected: String,
}

impl IncorrectWord {
    pub fn new(observed: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            observed: observed.into(),
            expected: expected.into(),
        }
    }
}

/// One learner interaction record: either an issued paragraph (empty errors,
/// both flags false) or a graded submission. Records are append-only and
/// never mutated after insertion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attempt {
    pub learner_id: String,
    pub sequence_index: u32,
    pub reference_text: String,
    #[serde(default)]
    pub incorrect_words: Vec<IncorrectWord>,
    #[serde(default)]
    pub text_completed: bool,
    #[serde(default)]
    pub audio_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Attempt {
    /// Fresh record for a newly issued paragraph.
    pub fn issued(
        learner_id: impl Into<String>,
        sequence_index: u32,
        reference_text: impl Into<String>,
    ) -> Self {
        Self {
            learner_id: learner_id.into(),
            sequence_index,
            reference_text: reference_text.into(),
            incorrect_words: Vec::new(),
            text_completed: false,
            audio_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Monotonically increasing lifetime counters, never reset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityHistory {
    pub total_attempts: u32,
    pub total_words: u64,
    pub total_errors: u64,
}

/// Running aggregate of a learner's accuracy. One row per learner, upserted;
/// this is the only persisted state that is overwritten in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub learner_id: String,
    pub capability_score: f64,
    #[serde(default)]
    pub history: CapabilityHistory,
}

impl CapabilityProfile {
    /// Profile for a learner with no attempts yet.
    pub fn fresh(learner_id: impl Into<String>) -> Self {
        Self {
            learner_id: learner_id.into(),
            capability_score: 1.0,
            history: CapabilityHistory::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttemptLogData {
    pub schema_version: u32,
    pub attempts: Vec<Attempt>,
}

impl Default for AttemptLogData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            attempts: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileBookData {
    pub schema_version: u32,
    pub profiles: HashMap<String, CapabilityProfile>,
}

impl Default for ProfileBookData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            profiles: HashMap::new(),
        }
    }
}
