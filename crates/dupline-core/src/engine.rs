//! The duplication engine.
//!
//! [`duplicate`] turns a selection set and a [`Direction`] into a [`Transaction`]. It is a
//! pure function of its inputs: the document is only read through a [`LineSource`], and the
//! resulting edits are left for the caller to commit.
//!
//! # Processing model
//!
//! Selections are processed in ascending document order. Each one goes through three steps:
//!
//! 1. **Normalize** to an [`Operative`] range: whole touched lines for vertical directions,
//!    the selection itself for horizontal ones, or the word before a bare caret.
//! 2. **Extract** the operative text. Blank text skips the selection.
//! 3. **Place** the copy and rebuild the selection on top of it.
//!
//! Edits are expressed in pre-edit coordinates. The running [`Frame`] tracks how much the
//! edits emitted so far have shifted everything after them, and is used both to rebuild
//! selections in post-edit coordinates and to report the sequential form of each edit.
//!
//! Selections whose operative range collides with one accepted earlier in the same call are
//! skipped: a vertical range collides with anything touching its lines, a horizontal range
//! collides with any range it strictly overlaps.

use crate::direction::Direction;
use crate::host::{HostError, LineSource};
use crate::selection::{Position, Range, Selection, sort_selections};
use crate::settings::Settings;
use crate::text::{advance, floor_utf16_column, is_blank, newline_count, utf16_len};
use crate::transaction::{EditOperation, Transaction};
use crate::word::word_start_before;

/// Where the copy goes relative to the operative range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// After the last touched line, as new lines.
    LinesBelow,
    /// Before the first touched line, as new lines.
    LinesAbove,
    /// Immediately before the range, on the same line.
    Before,
    /// Immediately after the range, on the same line.
    After,
}

impl Placement {
    /// Whether the operative range is widened to whole lines.
    pub fn is_vertical(self) -> bool {
        matches!(self, Placement::LinesBelow | Placement::LinesAbove)
    }
}

/// How selection columns are rebuilt for vertical copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// Columns are kept.
    Keep,
    /// The endpoint at the selection end moves to column 0, the other one to the
    /// selection's column width.
    Reanchor,
}

/// Placement and column rule for `direction`; only `RightThenDown` looks at `is_caret`.
pub fn rule(direction: Direction, is_caret: bool) -> (Placement, ColumnRule) {
    match direction {
        Direction::Down => (Placement::LinesBelow, ColumnRule::Keep),
        Direction::Up => (Placement::LinesAbove, ColumnRule::Keep),
        Direction::Left => (Placement::Before, ColumnRule::Keep),
        Direction::Right => (Placement::After, ColumnRule::Keep),
        Direction::SelectionDown => (Placement::LinesBelow, ColumnRule::Reanchor),
        Direction::SelectionUp => (Placement::LinesAbove, ColumnRule::Reanchor),
        Direction::RightThenDown if is_caret => (Placement::LinesBelow, ColumnRule::Keep),
        Direction::RightThenDown => (Placement::After, ColumnRule::Keep),
    }
}

/// The span one selection duplicates, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operative {
    /// Direction after resolving `RightThenDown`.
    pub direction: Direction,
    /// Where the copy goes.
    pub placement: Placement,
    /// How selection columns are rebuilt.
    pub columns: ColumnRule,
    /// Text to duplicate, in pre-edit coordinates.
    pub range: Range,
}

impl Operative {
    /// Last position this operative range claims; later ranges must start after it.
    fn reach(&self) -> Position {
        if self.placement.is_vertical() {
            Position::new(self.range.to.line, usize::MAX)
        } else {
            self.range.to
        }
    }

    fn collides_with(&self, reach: Position) -> bool {
        if self.placement.is_vertical() {
            reach.line >= self.range.from.line
        } else {
            self.range.from < reach
        }
    }
}

/// Resolve the operative range of `selection`.
///
/// Returns `Ok(None)` for a bare caret at column 0 under a horizontal direction.
pub fn normalize<S>(
    selection: &Selection,
    direction: Direction,
    lines: &S,
) -> Result<Option<Operative>, HostError>
where
    S: LineSource + ?Sized,
{
    let (placement, columns) = rule(direction, selection.is_caret());
    let range = selection.range();

    let range = if placement.is_vertical() {
        let last = lines.line(range.to.line)?;
        Range {
            from: Position::new(range.from.line, 0),
            to: Position::new(range.to.line, utf16_len(&last)),
        }
    } else if !selection.is_caret() {
        range
    } else {
        let caret = selection.head;
        if caret.column == 0 {
            return Ok(None);
        }
        let text = lines.line(caret.line)?;
        let start =
            word_start_before(&text, caret.column).ok_or_else(|| HostError::ColumnOutOfRange {
                line: caret.line,
                column: caret.column,
                line_len: utf16_len(&text),
            })?;
        Range {
            from: Position::new(caret.line, start),
            to: caret,
        }
    };

    Ok(Some(Operative {
        direction: direction.resolve(selection.is_caret()),
        placement,
        columns,
        range,
    }))
}

/// Running offsets accumulated by the edits emitted so far.
#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    /// Newlines inserted so far; every later line moves down by this much.
    added_lines: usize,
    /// Pre-edit point of the last insertion and where its end landed.
    tail: Option<Tail>,
}

#[derive(Debug, Clone, Copy)]
struct Tail {
    at: Position,
    end: Position,
}

impl Frame {
    /// Where the pre-edit position `pos` sits once the edits so far are applied.
    ///
    /// `pos` must not come before any insertion point already recorded.
    fn map(&self, pos: Position) -> Position {
        match self.tail {
            Some(Tail { at, end }) if pos.line == at.line && pos.column >= at.column => {
                Position::new(end.line, end.column + (pos.column - at.column))
            }
            _ => pos.down(self.added_lines),
        }
    }

    /// Account for inserting `text` at the pre-edit position `at`.
    ///
    /// Returns the insertion point in the running frame.
    fn record(&mut self, at: Position, text: &str) -> Position {
        let mapped = self.map(at);
        self.added_lines += newline_count(text);
        self.tail = Some(Tail {
            at,
            end: advance(mapped, text),
        });
        mapped
    }
}

/// Compute the edits and selections that duplicate every selection in `direction`.
///
/// Selections that produce no copy (blank text, caret at column 0 for horizontal
/// directions, collision with an earlier range) are left out of the result. An empty
/// transaction means there is nothing to apply.
pub fn duplicate<S>(
    selections: &[Selection],
    direction: Direction,
    lines: &S,
    settings: &Settings,
) -> Result<Transaction, HostError>
where
    S: LineSource + ?Sized,
{
    let mut ordered = selections.to_vec();
    sort_selections(&mut ordered);

    let mut tx = Transaction::new(direction);
    let mut frame = Frame::default();
    let mut reach: Option<Position> = None;

    for selection in ordered {
        let Some(op) = normalize(&selection, direction, lines)? else {
            tracing::debug!(%selection, "caret at line start, nothing to duplicate");
            continue;
        };

        let content = lines.range_text(op.range)?;
        if is_blank(&content) {
            tracing::debug!(%selection, "blank operative text, skipped");
            continue;
        }
        if reach.is_some_and(|r| op.collides_with(r)) {
            tracing::debug!(%selection, "operative range overlaps an earlier one, skipped");
            continue;
        }
        reach = Some(reach.map_or(op.reach(), |r| r.max(op.reach())));

        let (change, sequential, new_selection) =
            place(&op, selection, content, &mut frame, lines, settings)?;
        tracing::trace!(
            at = %change.from,
            running_at = %sequential.from,
            selection = %new_selection,
            "duplicate {}",
            op.direction
        );
        tx.push(change, sequential, new_selection);
    }

    Ok(tx)
}

fn place<S>(
    op: &Operative,
    selection: Selection,
    content: String,
    frame: &mut Frame,
    lines: &S,
    settings: &Settings,
) -> Result<(EditOperation, EditOperation, Selection), HostError>
where
    S: LineSource + ?Sized,
{
    let range = op.range;
    // Positions are mapped before the copy is recorded: the copy of `Up`/`Left` lands
    // exactly where the original was.
    let mapped = selection.map(|p| frame.map(p));

    let (at, text, new_selection) = match op.placement {
        Placement::LinesBelow => {
            let text = format!("\n{content}");
            let span = range.line_span();
            (range.to, text, mapped.map(|p| p.down(span)))
        }
        Placement::LinesAbove => (range.from, format!("{content}\n"), mapped),
        Placement::Before => {
            let text = if settings.add_space_between {
                format!("{content} ")
            } else {
                content
            };
            (range.from, text, mapped)
        }
        Placement::After => {
            let pad = if settings.add_space_between { " " } else { "" };
            let text = format!("{pad}{content}");
            let running_at = frame.map(range.to);
            let copy_start = advance(running_at, pad);
            let copy_end = advance(running_at, &text);
            let onto_copy = selection.map(|p| if p == range.to { copy_end } else { copy_start });
            (range.to, text, onto_copy)
        }
    };

    let new_selection = match op.columns {
        ColumnRule::Keep => new_selection,
        ColumnRule::Reanchor => reanchor(selection, new_selection, lines)?,
    };

    let running_at = frame.record(at, &text);
    Ok((
        EditOperation::insert(at, text.clone()),
        EditOperation::insert(running_at, text),
        new_selection,
    ))
}

/// Rebuild columns of a vertically moved selection.
///
/// The endpoint equal to the original range end gets column 0; the other gets the column
/// distance between anchor and head, clamped to the nearest valid column of its line.
fn reanchor<S>(original: Selection, moved: Selection, lines: &S) -> Result<Selection, HostError>
where
    S: LineSource + ?Sized,
{
    let end = original.range().to;
    let width = original.anchor.column.abs_diff(original.head.column);
    let column_for = |p: Position| -> Result<usize, HostError> {
        if p == end {
            Ok(0)
        } else {
            Ok(floor_utf16_column(&lines.line(p.line)?, width))
        }
    };

    Ok(Selection::new(
        Position::new(moved.anchor.line, column_for(original.anchor)?),
        Position::new(moved.head.line, column_for(original.head)?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_normalize_vertical_widens_to_lines() {
        let lines = doc("abc\ndefgh\nij");
        let sel = Selection::new(Position::new(1, 2), Position::new(0, 1));
        let op = normalize(&sel, Direction::Up, &lines).unwrap().unwrap();
        assert_eq!(
            op.range,
            Range::new(Position::new(0, 0), Position::new(1, 5))
        );
        assert_eq!(op.placement, Placement::LinesAbove);
    }

    #[test]
    fn test_normalize_caret_takes_word_before() {
        let lines = doc("let foo");
        let op = normalize(
            &Selection::caret(Position::new(0, 7)),
            Direction::Left,
            &lines,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            op.range,
            Range::new(Position::new(0, 4), Position::new(0, 7))
        );
        assert!(
            normalize(
                &Selection::caret(Position::new(0, 0)),
                Direction::Right,
                &lines
            )
            .unwrap()
            .is_none()
        );
    }

    #[test]
    fn test_normalize_right_then_down_redispatches_per_selection() {
        let lines = doc("abc");
        let caret = normalize(
            &Selection::caret(Position::new(0, 1)),
            Direction::RightThenDown,
            &lines,
        )
        .unwrap()
        .unwrap();
        assert_eq!(caret.direction, Direction::Down);
        assert_eq!(caret.placement, Placement::LinesBelow);

        let sel = normalize(
            &Selection::new(Position::new(0, 0), Position::new(0, 2)),
            Direction::RightThenDown,
            &lines,
        )
        .unwrap()
        .unwrap();
        assert_eq!(sel.direction, Direction::Right);
        assert_eq!(sel.placement, Placement::After);
    }

    #[test]
    fn test_frame_maps_same_line_and_later_lines() {
        let mut frame = Frame::default();
        let at = frame.record(Position::new(0, 3), " foo");
        assert_eq!(at, Position::new(0, 3));
        assert_eq!(frame.map(Position::new(0, 7)), Position::new(0, 11));
        assert_eq!(frame.map(Position::new(1, 2)), Position::new(1, 2));

        frame.record(Position::new(1, 2), "\nxy");
        assert_eq!(frame.map(Position::new(1, 4)), Position::new(2, 4));
        assert_eq!(frame.map(Position::new(5, 0)), Position::new(6, 0));
    }

    #[test]
    fn test_invalid_caret_column_propagates() {
        let lines = doc("ab");
        let err = duplicate(
            &[Selection::caret(Position::new(0, 9))],
            Direction::Right,
            &lines,
            &Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HostError::ColumnOutOfRange { column: 9, .. }));
    }
}
