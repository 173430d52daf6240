//! Key chords commands can be bound to.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a key chord string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    /// The chord names no key, or an unknown one.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// The chord names more than one key.
    #[error("more than one key in '{0}'")]
    MultipleKeys(String),
}

/// Modifier keys as a bitfield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifier.
    pub const NONE: Modifiers = Modifiers(0);
    /// Control.
    pub const CTRL: Modifiers = Modifiers(0b0001);
    /// Shift.
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    /// Alt / Option.
    pub const ALT: Modifiers = Modifiers(0b0100);
    /// Cmd on macOS, Win elsewhere.
    pub const META: Modifiers = Modifiers(0b1000);

    /// Combine two modifier sets.
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in `other`.
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.contains(Modifiers::CTRL) {
            parts.push("Ctrl");
        }
        if self.contains(Modifiers::ALT) {
            parts.push("Alt");
        }
        if self.contains(Modifiers::SHIFT) {
            parts.push("Shift");
        }
        if self.contains(Modifiers::META) {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key a chord ends with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (normalized to lowercase).
    Char(char),
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
        }
    }
}

/// A key with modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Modifiers held.
    pub mods: Modifiers,
    /// The key pressed.
    pub key: KeyCode,
}

impl KeyChord {
    /// Create a chord.
    pub const fn new(mods: Modifiers, key: KeyCode) -> Self {
        Self { mods, key }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods == Modifiers::NONE {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}

impl FromStr for KeyChord {
    type Err = KeymapError;

    /// Parse strings like `alt+shift+down` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mods = Modifiers::NONE;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            let lower = part.to_lowercase();
            match lower.as_str() {
                "ctrl" | "control" => mods = mods | Modifiers::CTRL,
                "shift" => mods = mods | Modifiers::SHIFT,
                "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
                "meta" | "cmd" | "super" | "win" => mods = mods | Modifiers::META,
                _ => {
                    if key.is_some() {
                        return Err(KeymapError::MultipleKeys(s.to_string()));
                    }
                    key = Some(parse_key_code(&lower).ok_or_else(|| {
                        KeymapError::InvalidKey(s.to_string())
                    })?);
                }
            }
        }

        key.map(|key| KeyChord { mods, key })
            .ok_or_else(|| KeymapError::InvalidKey(s.to_string()))
    }
}

fn parse_key_code(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "up" | "arrowup" => Some(KeyCode::Up),
        "down" | "arrowdown" => Some(KeyCode::Down),
        "left" | "arrowleft" => Some(KeyCode::Left),
        "right" | "arrowright" => Some(KeyCode::Right),
        _ => None,
    }
}
