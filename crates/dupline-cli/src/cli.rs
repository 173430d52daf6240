//! Command-line argument parsing
//!
//! Selections use the same `LINE:COL` / `LINE:COL-LINE:COL` form the library prints, with
//! 0-based lines and UTF-16 columns.

use clap::Parser;
use dupline_core::{Direction, Position, Selection, command_spec, find_command};
use std::path::PathBuf;

/// Duplicate lines and selections of a file in a direction
#[derive(Parser, Debug)]
#[command(name = "dupline", version, about = "Duplicate lines and selections in a direction")]
pub struct CliArgs {
    /// File to edit
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Direction: down, up, left, right, selection-down, selection-up, right-then-down
    #[arg(short, long, value_name = "DIR", conflicts_with = "command")]
    pub direction: Option<Direction>,

    /// Command id, e.g. duplicate-line-down
    #[arg(short, long, value_name = "ID")]
    pub command: Option<String>,

    /// Caret `LINE:COL` or selection `LINE:COL-LINE:COL` (anchor-head); repeatable
    #[arg(short, long = "select", value_name = "SEL", value_parser = parse_selection)]
    pub selections: Vec<Selection>,

    /// Settings file (defaults to the user configuration directory)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Update and persist a setting, e.g. addSpaceBetween=false; repeatable
    #[arg(long = "set", value_name = "KEY=BOOL")]
    pub assignments: Vec<String>,

    /// Print every command with its state and chord
    #[arg(long)]
    pub list_commands: bool,

    /// Write the result back to FILE instead of printing it
    #[arg(short, long)]
    pub in_place: bool,

    /// Print the resulting selections to stderr
    #[arg(long)]
    pub print_selections: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// The command to run, if a duplication was requested.
    pub fn command_id(&self) -> Result<Option<&'static str>, String> {
        if let Some(direction) = self.direction {
            return Ok(Some(command_spec(direction).id));
        }
        match &self.command {
            Some(id) => find_command(id)
                .map(|spec| Some(spec.id))
                .ok_or_else(|| format!("unknown command '{id}'")),
            None => Ok(None),
        }
    }
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (line, column) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{s}'"))?;
    let line = line
        .trim()
        .parse()
        .map_err(|e| format!("invalid line in '{s}': {e}"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|e| format!("invalid column in '{s}': {e}"))?;
    Ok(Position::new(line, column))
}

/// Parse `LINE:COL` or `LINE:COL-LINE:COL`.
pub fn parse_selection(s: &str) -> Result<Selection, String> {
    match s.split_once('-') {
        Some((anchor, head)) => Ok(Selection::new(
            parse_position(anchor)?,
            parse_position(head)?,
        )),
        None => Ok(Selection::caret(parse_position(s)?)),
    }
}
