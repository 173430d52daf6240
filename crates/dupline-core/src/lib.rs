#![warn(missing_docs)]
//! Dupline Core - directional duplication of lines and selections
//!
//! # Overview
//!
//! `dupline-core` is a headless kernel for "duplicate line" style editor commands. Given the
//! current multi-cursor selection set and a [`Direction`], it computes the text to insert,
//! where to insert it and where every selection ends up afterwards. It never touches the
//! document itself; the host editor commits the resulting [`Transaction`] atomically.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Commands & Settings (registry, key chords) │  ← Host-facing API
//! ├─────────────────────────────────────────────┤
//! │  Duplication Engine (normalize/place/fold)  │  ← Pure transform
//! ├─────────────────────────────────────────────┤
//! │  Transactions (pre-edit + running frames)   │  ← Edit batches
//! ├─────────────────────────────────────────────┤
//! │  Host contract (LineSource / EditorHost)    │  ← Document access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use dupline_core::{Direction, Position, Selection, Settings, duplicate};
//!
//! let lines = vec!["abc".to_string()];
//! let carets = [Selection::caret(Position::new(0, 3))];
//!
//! let tx = duplicate(&carets, Direction::Right, &lines, &Settings::default()).unwrap();
//! assert_eq!(tx.changes[0].text, " abc");
//! assert_eq!(tx.selections, vec![Selection::caret(Position::new(0, 7))]);
//! ```
//!
//! # Module Description
//!
//! - [`engine`] - the duplication transform
//! - [`transaction`] - edit batches and their inverse
//! - [`host`] - traits the host editor implements
//! - [`buffer`] - rope-backed reference host
//! - [`line_ending`] - LF / CRLF handling for hosts
//! - [`commands`] - command table and registry
//! - [`settings`] - persisted configuration
//! - [`keymap`] - key chords
//!
//! # Coordinates
//!
//! Lines and columns are zero-based; columns count UTF-16 code units, matching what editor
//! hosts report for carets.

pub mod buffer;
pub mod commands;
pub mod direction;
pub mod engine;
pub mod host;
pub mod keymap;
pub mod line_ending;
pub mod selection;
pub mod settings;
pub mod text;
pub mod transaction;
mod word;

pub use buffer::TextBuffer;
pub use commands::{
    COMMANDS, CommandError, CommandRegistry, CommandSpec, ExecuteOutcome, command_spec, execute,
    find_command,
};
pub use direction::{Direction, ParseDirectionError};
pub use engine::{ColumnRule, Operative, Placement, duplicate, normalize};
pub use host::{EditorHost, HostError, LineSource};
pub use keymap::{KeyChord, KeyCode, KeymapError, Modifiers};
pub use line_ending::LineEnding;
pub use selection::{Position, Range, Selection};
pub use settings::{Settings, SettingsError, SettingsStore, StoredSettings};
pub use transaction::{EditOperation, Transaction};
pub use word::word_start_before;
