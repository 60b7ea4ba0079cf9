//! Capability tracking: folds each graded attempt into a learner's running
//! accuracy aggregate and recomputes the score that drives difficulty
//! selection.

use crate::engine::compare::word_count;
use crate::store::schema::CapabilityProfile;

/// Floor for the capability score. Even a learner who misses every word
/// stays selectable at the lowest difficulty tier.
pub const MIN_SCORE: f64 = 0.1;

/// `max(0.1, 1 - errors/words)` rounded to two decimals. Callers must ensure
/// `total_words > 0`.
pub fn compute_score(total_errors: u64, total_words: u64) -> f64 {
    let raw = 1.0 - total_errors as f64 / total_words as f64;
    round2(raw).max(MIN_SCORE)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CapabilityProfile {
    /// Fold one graded attempt into the profile: bump the lifetime counters
    /// and recompute the score from cumulative history.
    ///
    /// A reference with zero words is ignored entirely — counters and score
    /// stay untouched, which keeps the score formula's division well-defined.
    pub fn record_attempt(&mut self, reference_text: &str, incorrect_count: usize) {
        let words_in_attempt = word_count(reference_text) as u64;
        if words_in_attempt == 0 {
            return;
        }

        self.history.total_attempts += 1;
        self.history.total_words += words_in_attempt;
        self.history.total_errors += incorrect_count as u64;

        self.capability_score =
            compute_score(self.history.total_errors, self.history.total_words);
    }
}
