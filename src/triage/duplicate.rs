//! Lexical duplicate detection.
//!
//! An approximate similarity test over word sets, not semantic
//! deduplication. Word order is ignored. Intentionally cheap: no
//! external calls.

use std::collections::HashSet;

/// Minimum shared-word count that does NOT yet qualify as a duplicate.
/// A candidate matches only when the intersection is strictly larger.
pub const SHARED_WORD_THRESHOLD: usize = 5;

/// Returns the index of the first candidate sharing more than
/// [`SHARED_WORD_THRESHOLD`] distinct words with `new_text`.
///
/// Both sides are lower-cased and tokenized on whitespace into word
/// sets, so repeated words count once. Returns `None` when no candidate
/// qualifies or `candidates` is empty.
#[must_use]
pub fn find_duplicate(new_text: &str, candidates: &[String]) -> Option<usize> {
    let new_words = word_set(new_text);

    candidates.iter().position(|candidate| {
        let candidate_words = word_set(candidate);
        new_words.intersection(&candidate_words).count() > SHARED_WORD_THRESHOLD
    })
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}
