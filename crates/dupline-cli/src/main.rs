mod cli;
mod logging;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use cli::CliArgs;
use dupline_core::{
    COMMANDS, CommandRegistry, EditorHost, ExecuteOutcome, Settings, SettingsStore, TextBuffer,
};
use std::fs;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init(args.verbose);
    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let settings_path = match &args.settings {
        Some(path) => path.clone(),
        None => SettingsStore::default_path()
            .context("no configuration directory on this platform, pass --settings")?,
    };
    let mut store = SettingsStore::load(&settings_path)?;
    tracing::debug!(path = %store.path().display(), "settings ready");

    if !args.assignments.is_empty() {
        let mut settings = *store.settings();
        for assignment in &args.assignments {
            settings.assign(assignment)?;
        }
        store.update(|s| *s = settings)?;
    }

    if args.list_commands {
        print_commands(store.settings());
    }

    let Some(command_id) = args.command_id().map_err(|e| anyhow!(e))? else {
        if args.assignments.is_empty() && !args.list_commands {
            bail!("nothing to do, pass --direction or --command");
        }
        return Ok(());
    };

    let file = args
        .file
        .as_ref()
        .context("a FILE is required to duplicate")?;
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut buffer = TextBuffer::new(&text);
    if !args.selections.is_empty() {
        buffer
            .set_selections(args.selections.clone())
            .context("invalid --select")?;
    }

    let settings = *store.settings();
    let registry = CommandRegistry::from_settings(&settings);
    let outcome = registry.invoke(command_id, &mut buffer, &settings)?;
    tracing::info!(?outcome, "{command_id}");

    if args.in_place {
        if matches!(outcome, ExecuteOutcome::Applied { .. }) {
            fs::write(file, buffer.text())
                .with_context(|| format!("failed to write {}", file.display()))?;
        }
    } else {
        print!("{}", buffer.text());
    }

    if args.print_selections {
        for selection in buffer.selections() {
            eprintln!("{selection}");
        }
    }

    Ok(())
}

fn print_commands(settings: &Settings) {
    for spec in &COMMANDS {
        let state = if settings.is_enabled(spec.direction) {
            "enabled"
        } else {
            "disabled"
        };
        let chord = spec
            .default_chord
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<28} {:<9} {chord}", spec.id, state);
    }
}
