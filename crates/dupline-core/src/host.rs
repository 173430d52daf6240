//! The contract between the duplication engine and the editor that hosts it.
//!
//! The engine only reads through [`LineSource`]. Commands additionally need to list the
//! current selections and commit the result, which [`EditorHost`] adds.

use crate::selection::{Position, Range, Selection};
use crate::text::utf16_to_byte;
use crate::transaction::Transaction;
use thiserror::Error;

/// Failures reported by a host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Line index past the end of the document.
    #[error("line {line} out of range (document has {line_count} lines)")]
    LineOutOfRange {
        /// Requested line.
        line: usize,
        /// Lines in the document.
        line_count: usize,
    },
    /// Column past the end of its line, or inside a surrogate pair.
    #[error("column {column} is not a valid position on line {line} (length {line_len})")]
    ColumnOutOfRange {
        /// Line of the position.
        line: usize,
        /// Requested UTF-16 column.
        column: usize,
        /// Line length in UTF-16 code units.
        line_len: usize,
    },
    /// Range whose start comes after its end.
    #[error("invalid range {from}..{to}")]
    InvalidRange {
        /// Start position.
        from: Position,
        /// End position.
        to: Position,
    },
    /// Two changes of one transaction touch the same text.
    #[error("overlapping changes at {0}")]
    OverlappingChanges(Position),
}

/// Read access to document lines.
pub trait LineSource {
    /// Number of lines (a trailing newline yields a final empty line).
    fn line_count(&self) -> usize;

    /// Text of `line` without its line terminator.
    fn line(&self, line: usize) -> Result<String, HostError>;

    /// Text between two positions, lines joined with `\n`.
    ///
    /// The default implementation reads line by line.
    fn text_range(&self, from: Position, to: Position) -> Result<String, HostError> {
        if to < from {
            return Err(HostError::InvalidRange { from, to });
        }

        let first = self.line(from.line)?;
        let start = byte_at(&first, from)?;
        if from.line == to.line {
            let end = byte_at(&first, to)?;
            return Ok(first[start..end].to_string());
        }

        let mut out = first[start..].to_string();
        for line in from.line + 1..to.line {
            out.push('\n');
            out.push_str(&self.line(line)?);
        }
        let last = self.line(to.line)?;
        let end = byte_at(&last, to)?;
        out.push('\n');
        out.push_str(&last[..end]);
        Ok(out)
    }

    /// Text covered by `range`.
    fn range_text(&self, range: Range) -> Result<String, HostError> {
        self.text_range(range.from, range.to)
    }
}

/// A live editor: lines plus selections plus atomic commits.
pub trait EditorHost: LineSource {
    /// Current selections in the host's order.
    fn selections(&self) -> Vec<Selection>;

    /// Apply every change and replace the selection set, or change nothing on error.
    fn apply_transaction(&mut self, transaction: &Transaction) -> Result<(), HostError>;
}

fn byte_at(line_text: &str, pos: Position) -> Result<usize, HostError> {
    utf16_to_byte(line_text, pos.column).ok_or_else(|| HostError::ColumnOutOfRange {
        line: pos.line,
        column: pos.column,
        line_len: crate::text::utf16_len(line_text),
    })
}

impl<T: LineSource + ?Sized> LineSource for &T {
    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line(&self, line: usize) -> Result<String, HostError> {
        (**self).line(line)
    }

    fn text_range(&self, from: Position, to: Position) -> Result<String, HostError> {
        (**self).text_range(from, to)
    }
}

/// Lines held in a plain vector; handy for hosts that already split their text.
impl LineSource for [String] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, line: usize) -> Result<String, HostError> {
        self.get(line).cloned().ok_or(HostError::LineOutOfRange {
            line,
            line_count: self.len(),
        })
    }
}

impl LineSource for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, line: usize) -> Result<String, HostError> {
        self.as_slice().line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_text_range_within_line() {
        let doc = lines("hello world");
        assert_eq!(
            doc.text_range(Position::new(0, 6), Position::new(0, 11))
                .unwrap(),
            "world"
        );
    }

    #[test]
    fn test_text_range_across_lines() {
        let doc = lines("ab\ncd\nef");
        assert_eq!(
            doc.text_range(Position::new(0, 1), Position::new(2, 1))
                .unwrap(),
            "b\ncd\ne"
        );
    }

    #[test]
    fn test_text_range_errors() {
        let doc = lines("ab");
        assert_eq!(
            doc.text_range(Position::new(0, 1), Position::new(0, 0)),
            Err(HostError::InvalidRange {
                from: Position::new(0, 1),
                to: Position::new(0, 0),
            })
        );
        assert!(matches!(
            doc.text_range(Position::new(0, 0), Position::new(0, 5)),
            Err(HostError::ColumnOutOfRange { .. })
        ));
        assert!(matches!(
            doc.line(3),
            Err(HostError::LineOutOfRange {
                line: 3,
                line_count: 1
            })
        ));
    }
}
