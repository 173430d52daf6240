//! Duplication directions.

use std::fmt;
use std::str::FromStr;

/// Where a duplicate goes, and which text is duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Copy the touched lines below themselves; selections follow the copy.
    Down,
    /// Copy the touched lines above themselves; selections stay on the upper copy.
    Up,
    /// Copy the selection (or the word before the caret) in front of itself.
    Left,
    /// Copy the selection (or the word before the caret) after itself.
    Right,
    /// Like [`Direction::Down`], re-anchoring the selection on the copy.
    SelectionDown,
    /// Like [`Direction::Up`], re-anchoring the selection on the copy.
    SelectionUp,
    /// [`Direction::Right`] for non-empty selections, [`Direction::Down`] for carets.
    RightThenDown,
}

impl Direction {
    /// Every direction, in command table order.
    pub const ALL: [Direction; 7] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::SelectionDown,
        Direction::SelectionUp,
        Direction::RightThenDown,
    ];

    /// The direction actually used for one selection.
    ///
    /// Only [`Direction::RightThenDown`] depends on the selection; every other direction is
    /// returned unchanged.
    pub fn resolve(self, is_caret: bool) -> Direction {
        match self {
            Direction::RightThenDown if is_caret => Direction::Down,
            Direction::RightThenDown => Direction::Right,
            other => other,
        }
    }

    /// Stable kebab-case name (`selection-down`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::SelectionDown => "selection-down",
            Direction::SelectionUp => "selection-up",
            Direction::RightThenDown => "right-then-down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a direction name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}'")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}
