//! Command surface exposed to the host.
//!
//! Every [`Direction`] is a named command with an optional default key chord. The
//! [`CommandRegistry`] holds the commands currently enabled by [`Settings`]; disabling a
//! command removes its chord as well.
//!
//! # Example
//!
//! ```rust
//! use dupline_core::{CommandRegistry, EditorHost, Position, Selection, Settings, TextBuffer};
//!
//! let settings = Settings::default();
//! let registry = CommandRegistry::from_settings(&settings);
//!
//! let mut buffer = TextBuffer::new("abc");
//! buffer
//!     .set_selections(vec![Selection::caret(Position::new(0, 3))])
//!     .unwrap();
//!
//! registry
//!     .invoke("duplicate-line-down", &mut buffer, &settings)
//!     .unwrap();
//! assert_eq!(buffer.text(), "abc\nabc");
//! assert_eq!(buffer.selections(), vec![Selection::caret(Position::new(1, 3))]);
//! ```

use crate::direction::Direction;
use crate::engine::duplicate;
use crate::host::{EditorHost, HostError};
use crate::keymap::{KeyChord, KeyCode, Modifiers};
use crate::settings::Settings;
use std::collections::HashMap;
use thiserror::Error;

/// Static description of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Stable identifier, e.g. `duplicate-line-down`.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Direction the command duplicates in.
    pub direction: Direction,
    /// Chord bound when the command is enabled.
    pub default_chord: Option<KeyChord>,
}

const ALT_SHIFT: Modifiers = Modifiers::ALT.union(Modifiers::SHIFT);
const CTRL_ALT_SHIFT: Modifiers = ALT_SHIFT.union(Modifiers::CTRL);

/// All commands, one per direction, in [`Direction::ALL`] order.
pub const COMMANDS: [CommandSpec; 7] = [
    CommandSpec {
        id: "duplicate-line-down",
        name: "Duplicate line down",
        direction: Direction::Down,
        default_chord: Some(KeyChord::new(ALT_SHIFT, KeyCode::Down)),
    },
    CommandSpec {
        id: "duplicate-line-up",
        name: "Duplicate line up",
        direction: Direction::Up,
        default_chord: Some(KeyChord::new(ALT_SHIFT, KeyCode::Up)),
    },
    CommandSpec {
        id: "duplicate-line-left",
        name: "Duplicate line left",
        direction: Direction::Left,
        default_chord: Some(KeyChord::new(ALT_SHIFT, KeyCode::Left)),
    },
    CommandSpec {
        id: "duplicate-line-right",
        name: "Duplicate line right",
        direction: Direction::Right,
        default_chord: Some(KeyChord::new(ALT_SHIFT, KeyCode::Right)),
    },
    CommandSpec {
        id: "duplicate-selection-down",
        name: "Duplicate selection down",
        direction: Direction::SelectionDown,
        default_chord: Some(KeyChord::new(CTRL_ALT_SHIFT, KeyCode::Down)),
    },
    CommandSpec {
        id: "duplicate-selection-up",
        name: "Duplicate selection up",
        direction: Direction::SelectionUp,
        default_chord: Some(KeyChord::new(CTRL_ALT_SHIFT, KeyCode::Up)),
    },
    CommandSpec {
        id: "duplicate-right-then-down",
        name: "Duplicate right, or down for carets",
        direction: Direction::RightThenDown,
        default_chord: None,
    },
];

/// The command for `direction`.
pub fn command_spec(direction: Direction) -> &'static CommandSpec {
    match direction {
        Direction::Down => &COMMANDS[0],
        Direction::Up => &COMMANDS[1],
        Direction::Left => &COMMANDS[2],
        Direction::Right => &COMMANDS[3],
        Direction::SelectionDown => &COMMANDS[4],
        Direction::SelectionUp => &COMMANDS[5],
        Direction::RightThenDown => &COMMANDS[6],
    }
}

/// The command with identifier `id`.
pub fn find_command(id: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.id == id)
}

/// Errors from invoking a command through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No command has this identifier.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    /// The command exists but is disabled in the settings.
    #[error("command '{0}' is disabled")]
    Disabled(&'static str),
    /// The host rejected a read or the commit.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// What one command invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// A transaction was committed.
    Applied {
        /// Selections that produced a copy.
        duplicated: usize,
        /// Selections that were skipped.
        skipped: usize,
    },
    /// Every selection was skipped; nothing was committed.
    NoOp {
        /// Selections that were skipped.
        skipped: usize,
    },
}

/// Duplicate the host's selections in `direction` and commit the result.
pub fn execute<H>(
    host: &mut H,
    direction: Direction,
    settings: &Settings,
) -> Result<ExecuteOutcome, HostError>
where
    H: EditorHost + ?Sized,
{
    let selections = host.selections();
    let transaction = duplicate(&selections, direction, &*host, settings)?;
    let skipped = selections.len() - transaction.selections.len();

    if transaction.is_empty() {
        tracing::debug!(%direction, skipped, "nothing to duplicate");
        return Ok(ExecuteOutcome::NoOp { skipped });
    }

    host.apply_transaction(&transaction)?;
    let duplicated = transaction.changes.len();
    tracing::debug!(duplicated, skipped, "{} applied", transaction.label());
    Ok(ExecuteOutcome::Applied {
        duplicated,
        skipped,
    })
}

/// Commands currently enabled, with their chords.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    enabled: Vec<Direction>,
    chords: HashMap<KeyChord, Direction>,
}

impl CommandRegistry {
    /// Register every command `settings` enables.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::default();
        registry.sync(settings);
        registry
    }

    /// Bring the registry in line with `settings`.
    pub fn sync(&mut self, settings: &Settings) {
        for direction in Direction::ALL {
            self.set_enabled(direction, settings.is_enabled(direction));
        }
    }

    /// Register or unregister one command together with its chord.
    pub fn set_enabled(&mut self, direction: Direction, enabled: bool) {
        let spec = command_spec(direction);
        if enabled {
            if !self.enabled.contains(&direction) {
                self.enabled.push(direction);
                self.enabled
                    .sort_by_key(|d| Direction::ALL.iter().position(|x| x == d));
            }
            if let Some(chord) = spec.default_chord {
                self.chords.insert(chord, direction);
            }
            tracing::trace!(command = spec.id, "registered");
        } else {
            self.enabled.retain(|d| *d != direction);
            self.chords.retain(|_, d| *d != direction);
            tracing::trace!(command = spec.id, "unregistered");
        }
    }

    /// Whether the command for `direction` is registered.
    pub fn is_enabled(&self, direction: Direction) -> bool {
        self.enabled.contains(&direction)
    }

    /// Registered commands in table order.
    pub fn commands(&self) -> impl Iterator<Item = &'static CommandSpec> + '_ {
        self.enabled.iter().map(|d| command_spec(*d))
    }

    /// The registered command bound to `chord`.
    pub fn command_for_chord(&self, chord: &KeyChord) -> Option<&'static CommandSpec> {
        self.chords.get(chord).map(|d| command_spec(*d))
    }

    /// Run a registered command by id.
    pub fn invoke<H>(
        &self,
        id: &str,
        host: &mut H,
        settings: &Settings,
    ) -> Result<ExecuteOutcome, CommandError>
    where
        H: EditorHost + ?Sized,
    {
        let spec = find_command(id).ok_or_else(|| CommandError::UnknownCommand(id.to_string()))?;
        if !self.is_enabled(spec.direction) {
            return Err(CommandError::Disabled(spec.id));
        }
        Ok(execute(host, spec.direction, settings)?)
    }

    /// Run the command bound to `chord`, if any.
    pub fn invoke_chord<H>(
        &self,
        chord: &KeyChord,
        host: &mut H,
        settings: &Settings,
    ) -> Result<Option<ExecuteOutcome>, HostError>
    where
        H: EditorHost + ?Sized,
    {
        match self.command_for_chord(chord) {
            Some(spec) => execute(host, spec.direction, settings).map(Some),
            None => Ok(None),
        }
    }
}
