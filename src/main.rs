use anyhow::{Context, Result};
use canvas_input::config::Config;
use canvas_input::input::{ActionKind, Callback, Category, InputState};
use canvas_input::replay::ScriptSource;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "canvas-input")]
#[command(
    version,
    about = "Input normalization and shortcut detection for canvas applications"
)]
struct Cli {
    /// Replay raw input events from a TOML script
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Config file to use instead of ~/.config/canvas-input/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script) = cli.script else {
        println!("canvas-input: input normalization and shortcut detection");
        println!();
        println!("Usage:");
        println!("  canvas-input --script events.toml    Replay raw events and print what fires");
        println!("  canvas-input --help                  Show help");
        println!();
        println!("Shortcuts to watch are read from ~/.config/canvas-input/config.toml:");
        println!("  [[shortcuts]]");
        println!("  name = \"quit\"");
        println!("  keys = \"ControlLeft+KeyQ\"");
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    run_script(&script, &config)
}

fn run_script(path: &Path, config: &Config) -> Result<()> {
    let mut source = ScriptSource::from_path(path)?;
    log::info!("Loaded {} events from {}", source.events().len(), path.display());
    let mut state = InputState::new();

    let echo_pointer = config.replay.echo_pointer;
    for kind in [ActionKind::Began, ActionKind::Changed, ActionKind::Ended] {
        state.bind_action(
            kind,
            Callback::new(move |event, input| {
                if event.category == Category::PointerMove && !echo_pointer {
                    return Ok(());
                }
                let ui = if input.consumed_by_ui() { " (ui)" } else { "" };
                println!("{kind:?}: {event}{ui}");
                Ok(())
            }),
        );
    }

    for shortcut in &config.shortcuts {
        let combo = shortcut
            .keys
            .to_combo()
            .map_err(anyhow::Error::msg)
            .context("Invalid shortcut in config")?;
        let label = shortcut.name.clone().unwrap_or_else(|| combo.id());
        let bound = state.bind_shortcut(
            &combo.keys,
            Callback::new(move |event, _| {
                println!("shortcut {label} {:?}", event.phase);
                Ok(())
            }),
            shortcut.options,
        );
        if bound.is_none() {
            log::warn!("Shortcut {} has no usable keys", combo.id());
        }
    }

    for binding in state.shortcuts().bindings() {
        log::debug!("Shortcut {} bound with {:?}", binding.id(), binding.options());
    }

    let summary = source.replay(&mut state)?;

    println!(
        "Replayed {} events ({} default actions prevented, {} propagations stopped)",
        summary.events, summary.prevented_defaults, summary.stopped_propagations
    );
    if summary.held_keys.is_empty() {
        println!("Held at end: none");
    } else {
        println!("Held at end: {}", summary.held_keys.join(", "));
    }

    Ok(())
}
