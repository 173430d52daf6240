//! Word-boundary detection for caret-only horizontal duplication.
//!
//! A "word" here is the run of non-whitespace characters immediately before the caret.
//! Punctuation is part of the word, so `foo.bar|` yields `foo.bar`.

use crate::text::{byte_to_utf16, utf16_to_byte};

/// UTF-16 column where the word ending at `column` starts.
///
/// Returns `column` itself when the caret sits at line start or right after whitespace.
/// Returns `None` when `column` is not a valid column of `line_text`.
pub fn word_start_before(line_text: &str, column: usize) -> Option<usize> {
    let caret = utf16_to_byte(line_text, column)?;
    let start = line_text[..caret]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| !ch.is_whitespace())
        .last()
        .map_or(caret, |(byte, _)| byte);
    Some(byte_to_utf16(line_text, start))
}
