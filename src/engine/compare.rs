//! Positional word diff between a learner's attempt and the reference text.
//!
//! The diff is deliberately non-realigning: both texts are split on
//! whitespace and compared position by position, so a single inserted or
//! dropped word marks every following position incorrect. Downstream scoring
//! and stored history depend on exactly this behavior, so it must not be
//! "improved" into an edit-distance alignment.

use crate::store::schema::IncorrectWord;

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Compare `observed` against `reference` word by word, case-insensitively.
///
/// Positions up to the shorter length are compared pairwise. Reference words
/// past the end of the observed text come back with `observed: ""`; extra
/// observed words come back with `expected: ""`. An empty result means the
/// attempt matched the reference exactly.
pub fn compare_texts(observed: &str, reference: &str) -> Vec<IncorrectWord> {
    let ref_words: Vec<&str> = reference.split_whitespace().collect();
    let obs_words: Vec<&str> = observed.split_whitespace().collect();
    let mut incorrect = Vec::new();

    for (obs, expected) in obs_words.iter().zip(ref_words.iter()) {
        if obs.to_lowercase() != expected.to_lowercase() {
            incorrect.push(IncorrectWord::new(*obs, *expected));
        }
    }

    if obs_words.len() < ref_words.len() {
        for expected in &ref_words[obs_words.len()..] {
            incorrect.push(IncorrectWord::new("", *expected));
        }
    } else if obs_words.len() > ref_words.len() {
        for obs in &obs_words[ref_words.len()..] {
            incorrect.push(IncorrectWord::new(*obs, ""));
        }
    }

    incorrect
}

/// An attempt is completed iff nothing mismatched at any position and both
/// texts had the same word count.
pub fn is_completed(incorrect: &[IncorrectWord]) -> bool {
    incorrect.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_produce_no_errors() {
        let incorrect = compare_texts("the cat sat", "the cat sat");
        assert!(incorrect.is_empty());
        assert!(is_completed(&incorrect));
    }

    #[test]
    fn test_comparison_is_case_insensitive() {
        let incorrect = compare_texts("The CAT Sat", "the cat sat");
        assert!(incorrect.is_empty());
    }

    #[test]
    fn test_equal_length_mismatches_in_order() {
        let incorrect = compare_texts("a x c y", "a b c d");
        assert_eq!(
            incorrect,
            vec![IncorrectWord::new("x", "b"), IncorrectWord::new("y", "d")]
        );
    }

    #[test]
    fn test_shorter_observed_pads_missing_reference_words() {
        // Reference has 5 words, observed 3: exactly 2 entries with observed="".
        let incorrect = compare_texts("one two three", "one two three four five");
        assert_eq!(
            incorrect,
            vec![
                IncorrectWord::new("", "four"),
                IncorrectWord::new("", "five")
            ]
        );
    }

    #[test]
    fn test_longer_observed_pads_extra_words() {
        let incorrect = compare_texts("one two three four", "one two");
        assert_eq!(
            incorrect,
            vec![
                IncorrectWord::new("three", ""),
                IncorrectWord::new("four", "")
            ]
        );
    }

    #[test]
    fn test_dropped_word_shifts_all_following_positions() {
        // The documented non-realigning behavior from the design docs:
        // "the cat sat on the mat" read as "the dog sat on mat".
        let incorrect = compare_texts("the dog sat on mat", "the cat sat on the mat");
        assert_eq!(
            incorrect,
            vec![
                IncorrectWord::new("dog", "cat"),
                IncorrectWord::new("mat", "the"),
                IncorrectWord::new("", "mat"),
            ]
        );
    }

    #[test]
    fn test_empty_observed_marks_every_reference_word_missing() {
        let incorrect = compare_texts("", "read this aloud");
        assert_eq!(incorrect.len(), 3);
        assert!(incorrect.iter().all(|w| w.observed.is_empty()));
        assert_eq!(incorrect[0].expected, "read");
        assert_eq!(incorrect[2].expected, "aloud");
    }

    #[test]
    fn test_whitespace_runs_tokenize_like_single_spaces() {
        let incorrect = compare_texts("  the   cat ", "the cat");
        assert!(incorrect.is_empty());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("the cat sat on the mat"), 6);
    }
}
