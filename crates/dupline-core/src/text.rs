//! UTF-16 column helpers.

use crate::selection::Position;

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte index of the UTF-16 column `column` in `text`.
///
/// Returns `None` when the column lies past the end of `text` or inside a surrogate pair.
pub fn utf16_to_byte(text: &str, column: usize) -> Option<usize> {
    let mut current = 0;
    for (byte, ch) in text.char_indices() {
        if current == column {
            return Some(byte);
        }
        if current > column {
            return None;
        }
        current += ch.len_utf16();
    }
    (current == column).then_some(text.len())
}

/// UTF-16 column of the byte index `byte` (which must be a char boundary).
pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    utf16_len(&text[..byte])
}

/// The largest valid column of `text` that is not greater than `column`.
///
/// Columns past the end clamp to the line length; a column inside a surrogate pair moves
/// back to the start of that character.
pub fn floor_utf16_column(text: &str, column: usize) -> usize {
    let mut current = 0;
    for ch in text.chars() {
        let next = current + ch.len_utf16();
        if next > column {
            return current;
        }
        current = next;
    }
    current
}

/// `true` when `text` has nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Number of `\n` in `text`.
pub fn newline_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// The position right after `text` once it has been inserted at `at`.
pub fn advance(at: Position, text: &str) -> Position {
    match text.rsplit_once('\n') {
        Some((_, last)) => Position::new(at.line + newline_count(text), utf16_len(last)),
        None => Position::new(at.line, at.column + utf16_len(text)),
    }
}

/// Split on `\n`, keeping a trailing empty segment and dropping `\r` before each break.
pub(crate) fn split_lines_preserve_trailing(text: &str) -> Vec<String> {
    // N newlines => N+1 lines, the same count a rope reports.
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
