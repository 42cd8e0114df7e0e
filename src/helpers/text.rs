//! Text statistics helpers

use crate::content::ContentBlock;

/// Assumed reading speed for the reading-time estimate
pub const WORDS_PER_MINUTE: usize = 200;

/// Count words in a text: a word is a maximal run of non-whitespace
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Total word count across every paragraph of every block
pub fn total_words(blocks: &[ContentBlock]) -> usize {
    blocks
        .iter()
        .map(|block| block.body.iter().map(|p| count_words(p)).sum::<usize>())
        .sum()
}

/// Estimated reading time in whole minutes, rounded up.
/// Zero words yields 0 minutes.
pub fn reading_time(blocks: &[ContentBlock]) -> usize {
    total_words(blocks).div_ceil(WORDS_PER_MINUTE)
}
