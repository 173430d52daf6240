//! Rope-backed reference host.
//!
//! [`TextBuffer`] implements [`EditorHost`] on top of a [`Rope`], with UTF-16 columns. Only
//! `\n` separates lines; a `\r` right before it belongs to the terminator and is never part
//! of a line's text. Inserted text is written with the document's [`LineEnding`].

use crate::host::{EditorHost, HostError, LineSource};
use crate::line_ending::LineEnding;
use crate::selection::{Position, Selection};
use crate::text::{split_lines_preserve_trailing, utf16_len, utf16_to_byte};
use crate::transaction::Transaction;
use ropey::Rope;

/// An in-memory document with a selection set.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    line_ending: LineEnding,
    selections: Vec<Selection>,
}

impl TextBuffer {
    /// Create a buffer with a single caret at the document start.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            line_ending: LineEnding::detect(text),
            selections: vec![Selection::caret(Position::default())],
        }
    }

    /// Create a buffer from lines joined with `\n`.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(&text)
    }

    /// Complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Terminator used for inserted line breaks.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Every line without terminators.
    pub fn lines(&self) -> Vec<String> {
        split_lines_preserve_trailing(&self.text())
    }

    /// Replace the selection set after checking every endpoint.
    pub fn set_selections(&mut self, selections: Vec<Selection>) -> Result<(), HostError> {
        for sel in &selections {
            self.position_to_char_offset(sel.anchor)?;
            self.position_to_char_offset(sel.head)?;
        }
        self.selections = selections;
        Ok(())
    }

    /// Character offset of a UTF-16 position.
    pub fn position_to_char_offset(&self, pos: Position) -> Result<usize, HostError> {
        let text = self.line(pos.line)?;
        let byte = utf16_to_byte(&text, pos.column).ok_or_else(|| HostError::ColumnOutOfRange {
            line: pos.line,
            column: pos.column,
            line_len: utf16_len(&text),
        })?;
        Ok(self.rope.line_to_char(pos.line) + text[..byte].chars().count())
    }

    fn resolve_changes<'a>(
        &self,
        transaction: &'a Transaction,
    ) -> Result<Vec<(usize, usize, &'a str)>, HostError> {
        let mut resolved = Vec::with_capacity(transaction.changes.len());
        for (index, change) in transaction.changes.iter().enumerate() {
            if change.to < change.from {
                return Err(HostError::InvalidRange {
                    from: change.from,
                    to: change.to,
                });
            }
            let start = self.position_to_char_offset(change.from)?;
            let end = self.position_to_char_offset(change.to)?;
            resolved.push((start, end, index));
        }

        // Stable on ties so same-point insertions keep list order.
        resolved.sort_by_key(|&(start, _, index)| (start, index));
        for pair in resolved.windows(2) {
            if pair[0].1 > pair[1].0 {
                return Err(HostError::OverlappingChanges(
                    transaction.changes[pair[1].2].from,
                ));
            }
        }

        Ok(resolved
            .into_iter()
            .map(|(start, end, index)| (start, end, transaction.changes[index].text.as_str()))
            .collect())
    }
}

impl LineSource for TextBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line(&self, line: usize) -> Result<String, HostError> {
        if line >= self.rope.len_lines() {
            return Err(HostError::LineOutOfRange {
                line,
                line_count: self.rope.len_lines(),
            });
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
            if text.ends_with('\r') {
                text.pop();
            }
        }
        Ok(text)
    }
}

impl EditorHost for TextBuffer {
    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn apply_transaction(&mut self, transaction: &Transaction) -> Result<(), HostError> {
        let changes = self.resolve_changes(transaction)?;

        let backup = self.rope.clone();
        // Back to front, so earlier offsets stay valid.
        for &(start, end, text) in changes.iter().rev() {
            let text = self.line_ending.convert(text);
            self.rope.remove(start..end);
            self.rope.insert(start, &text);
        }

        if let Err(err) = self.set_selections(transaction.selections.clone()) {
            tracing::warn!("transaction left invalid selections, rolled back: {err}");
            self.rope = backup;
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::transaction::EditOperation;

    fn tx(changes: Vec<EditOperation>, selections: Vec<Selection>) -> Transaction {
        let mut tx = Transaction::new(Direction::Down);
        tx.changes = changes;
        tx.selections = selections;
        tx
    }

    #[test]
    fn test_lines_strip_crlf() {
        let buf = TextBuffer::new("ab\r\ncd\n");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(0).unwrap(), "ab");
        assert_eq!(buf.line(1).unwrap(), "cd");
        assert_eq!(buf.line(2).unwrap(), "");
        assert_eq!(buf.lines(), vec!["ab", "cd", ""]);

        let joined = TextBuffer::from_lines(&["ab", "cd"]);
        assert_eq!(joined.text(), "ab\ncd");
        assert_eq!(joined.line_count(), 2);
    }

    #[test]
    fn test_crlf_document_keeps_its_line_ending() {
        let mut buf = TextBuffer::new("abc\r\ndef");
        assert_eq!(buf.line_ending(), LineEnding::Crlf);

        let insert = tx(
            vec![EditOperation::insert(Position::new(0, 3), "\nabc")],
            vec![Selection::caret(Position::new(1, 3))],
        );
        buf.apply_transaction(&insert).unwrap();
        assert_eq!(buf.text(), "abc\r\nabc\r\ndef");
        assert_eq!(buf.lines(), vec!["abc", "abc", "def"]);

        // Positions never count the `\r`, so deleting the copy removes its terminator too.
        let delete = tx(
            vec![EditOperation::delete(Position::new(0, 3), Position::new(1, 3))],
            vec![Selection::caret(Position::new(0, 3))],
        );
        buf.apply_transaction(&delete).unwrap();
        assert_eq!(buf.text(), "abc\r\ndef");
    }

    #[test]
    fn test_position_to_char_offset_uses_utf16_columns() {
        let buf = TextBuffer::new("x\n😀y");
        assert_eq!(buf.position_to_char_offset(Position::new(1, 0)).unwrap(), 2);
        assert_eq!(buf.position_to_char_offset(Position::new(1, 2)).unwrap(), 3);
        assert_eq!(buf.position_to_char_offset(Position::new(1, 3)).unwrap(), 4);
        assert!(buf.position_to_char_offset(Position::new(1, 1)).is_err());
        assert!(buf.position_to_char_offset(Position::new(2, 0)).is_err());
    }

    #[test]
    fn test_changes_are_applied_in_pre_edit_coordinates() {
        let mut buf = TextBuffer::new("abc\ndef");
        let t = tx(
            vec![
                EditOperation::insert(Position::new(0, 3), "\nabc"),
                EditOperation::insert(Position::new(1, 3), "\ndef"),
            ],
            vec![Selection::caret(Position::new(3, 3))],
        );
        buf.apply_transaction(&t).unwrap();
        assert_eq!(buf.text(), "abc\nabc\ndef\ndef");
        assert_eq!(buf.selections(), vec![Selection::caret(Position::new(3, 3))]);
    }

    #[test]
    fn test_same_point_insertions_keep_list_order() {
        let mut buf = TextBuffer::new("ab");
        let t = tx(
            vec![
                EditOperation::insert(Position::new(0, 1), "1"),
                EditOperation::insert(Position::new(0, 1), "2"),
            ],
            vec![Selection::caret(Position::new(0, 0))],
        );
        buf.apply_transaction(&t).unwrap();
        assert_eq!(buf.text(), "a12b");
    }

    #[test]
    fn test_invalid_selection_rolls_back() {
        let mut buf = TextBuffer::new("abc");
        let t = tx(
            vec![EditOperation::insert(Position::new(0, 3), "!")],
            vec![Selection::caret(Position::new(5, 0))],
        );
        assert!(matches!(
            buf.apply_transaction(&t),
            Err(HostError::LineOutOfRange { line: 5, .. })
        ));
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.selections(), vec![Selection::caret(Position::new(0, 0))]);
    }

    #[test]
    fn test_overlapping_changes_are_rejected() {
        let mut buf = TextBuffer::new("abcdef");
        let t = tx(
            vec![
                EditOperation::delete(Position::new(0, 1), Position::new(0, 4)),
                EditOperation::insert(Position::new(0, 2), "x"),
            ],
            vec![],
        );
        assert_eq!(
            buf.apply_transaction(&t),
            Err(HostError::OverlappingChanges(Position::new(0, 2)))
        );
        assert_eq!(buf.text(), "abcdef");
    }
}
