//! Edit batches produced by the engine.
//!
//! A [`Transaction`] describes its edits twice:
//! - [`Transaction::changes`] are expressed in the document as it was **before** any edit of
//!   the batch (what an atomic host commit expects);
//! - [`Transaction::sequential_changes`] place edit *i* in the document as it stands after
//!   edits `0..i` have been applied, for hosts that can only apply edits one at a time.
//!
//! Both describe the same final document.

use crate::commands::command_spec;
use crate::direction::Direction;
use crate::selection::{Position, Range, Selection};
use crate::text::advance;

/// Replace `[from, to)` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Start of the replaced range.
    pub from: Position,
    /// End of the replaced range (equal to `from` for insertions).
    pub to: Position,
    /// Replacement text (may contain `\n`).
    pub text: String,
}

impl EditOperation {
    /// Insert `text` at `at`.
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self {
            from: at,
            to: at,
            text: text.into(),
        }
    }

    /// Delete `[from, to)`.
    pub fn delete(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            text: String::new(),
        }
    }

    /// Range the inserted text occupies once this edit is applied.
    pub fn inserted_range(&self) -> Range {
        Range::new(self.from, advance(self.from, &self.text))
    }
}

/// One atomic batch: edits plus the selection set to show afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Direction of the command that produced the batch.
    pub origin: Direction,
    /// Edits in pre-edit coordinates, ascending document order.
    pub changes: Vec<EditOperation>,
    /// Selections after the batch is applied.
    pub selections: Vec<Selection>,
    sequential: Vec<EditOperation>,
}

impl Transaction {
    /// An empty batch.
    pub fn new(origin: Direction) -> Self {
        Self {
            origin,
            changes: Vec::new(),
            selections: Vec::new(),
            sequential: Vec::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        change: EditOperation,
        sequential: EditOperation,
        selection: Selection,
    ) {
        self.changes.push(change);
        self.sequential.push(sequential);
        self.selections.push(selection);
    }

    /// `true` when there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The edits in the running frame, to be applied one after another.
    pub fn sequential_changes(&self) -> &[EditOperation] {
        &self.sequential
    }

    /// Undo label for this batch: the id of the command that produced it.
    pub fn label(&self) -> &'static str {
        command_spec(self.origin).id
    }

    /// A batch that removes every inserted block and restores `original` selections.
    ///
    /// Only meaningful for batches of insertions in ascending order, which is what the
    /// engine produces. Blocks inserted earlier are never moved by later insertions, so the
    /// running-frame position of a block is also its final position.
    pub fn inverse(&self, original: Vec<Selection>) -> Transaction {
        let changes = self
            .sequential
            .iter()
            .map(|edit| {
                let block = edit.inserted_range();
                EditOperation::delete(block.from, block.to)
            })
            .collect();
        // Once earlier blocks are gone, block `i` sits exactly where it was inserted.
        let sequential = self
            .changes
            .iter()
            .map(|edit| {
                let block = edit.inserted_range();
                EditOperation::delete(block.from, block.to)
            })
            .collect();

        Transaction {
            origin: self.origin,
            changes,
            selections: original,
            sequential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_range_spans_new_lines() {
        let edit = EditOperation::insert(Position::new(1, 3), "\nabc");
        assert_eq!(
            edit.inserted_range(),
            Range::new(Position::new(1, 3), Position::new(2, 3))
        );
    }

    #[test]
    fn test_inverse_swaps_frames() {
        let mut tx = Transaction::new(Direction::Down);
        tx.push(
            EditOperation::insert(Position::new(0, 1), "\na"),
            EditOperation::insert(Position::new(0, 1), "\na"),
            Selection::caret(Position::new(1, 1)),
        );
        tx.push(
            EditOperation::insert(Position::new(1, 1), "\nb"),
            EditOperation::insert(Position::new(2, 1), "\nb"),
            Selection::caret(Position::new(3, 1)),
        );

        let original = vec![
            Selection::caret(Position::new(0, 1)),
            Selection::caret(Position::new(1, 1)),
        ];
        let inverse = tx.inverse(original.clone());

        assert_eq!(
            inverse.changes,
            vec![
                EditOperation::delete(Position::new(0, 1), Position::new(1, 1)),
                EditOperation::delete(Position::new(2, 1), Position::new(3, 1)),
            ]
        );
        assert_eq!(
            inverse.sequential_changes(),
            &[
                EditOperation::delete(Position::new(0, 1), Position::new(1, 1)),
                EditOperation::delete(Position::new(1, 1), Position::new(2, 1)),
            ]
        );
        assert_eq!(inverse.selections, original);
        assert_eq!(tx.label(), "duplicate-line-down");
    }
}
