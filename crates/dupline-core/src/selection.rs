//! Positions, selections and ranges.
//!
//! Columns are counted in UTF-16 code units, which is what editor hosts report for caret
//! positions. Helpers in [`crate::text`] convert between these columns and `str` indices.

use std::cmp::Ordering;
use std::fmt;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in UTF-16 code units within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Same column, `delta` lines further down.
    pub fn down(self, delta: usize) -> Self {
        Self::new(self.line + delta, self.column)
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A selection: `anchor` is where it started, `head` is where the caret sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Fixed endpoint.
    pub anchor: Position,
    /// Moving endpoint (the caret).
    pub head: Position,
}

impl Selection {
    /// Create a selection from its two endpoints.
    pub const fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// An empty selection at `pos`.
    pub const fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Whether anchor and head coincide.
    pub fn is_caret(&self) -> bool {
        self.anchor == self.head
    }

    /// Endpoints sorted into document order.
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.head)
    }

    /// Apply `f` to both endpoints.
    pub fn map(self, mut f: impl FnMut(Position) -> Position) -> Self {
        Self {
            anchor: f(self.anchor),
            head: f(self.head),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_caret() {
            write!(f, "{}", self.head)
        } else {
            write!(f, "{}-{}", self.anchor, self.head)
        }
    }
}

/// A sorted pair of positions, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start (inclusive).
    pub from: Position,
    /// End (exclusive).
    pub to: Position,
}

impl Range {
    /// Build a range from two positions in any order.
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }

    /// Number of lines touched (`to.line - from.line + 1`).
    pub fn line_span(&self) -> usize {
        self.to.line - self.from.line + 1
    }
}

/// Order selections by their sorted ranges, ties broken by head then anchor.
///
/// The sort is stable, so identical selections keep their relative order.
pub(crate) fn sort_selections(selections: &mut [Selection]) {
    selections.sort_by(|a, b| {
        let (a_range, b_range) = (a.range(), b.range());
        a_range
            .from
            .cmp(&b_range.from)
            .then_with(|| a_range.to.cmp(&b_range.to))
            .then_with(|| a.head.cmp(&b.head))
            .then_with(|| a.anchor.cmp(&b.anchor))
    });
}
