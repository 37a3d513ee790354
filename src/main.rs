//! number-pick — the "Start a New Game!" screen of a guess-the-number game.
//!
//! This is the crate root. It declares the module tree, defines the CLI, and
//! plays the part of the parent game controller: it opens the start screen,
//! receives the chosen number through the `on_start_game` callback, and
//! reports it once the terminal has been restored.
//!
//! ## Module structure
//!
//! - `number` — Digit filter and the 1..=99 range check
//! - `start`  — Screen state record, events, and the reducer
//! - `alert`  — Blocking modal that presents the invalid-number alert
//! - `screen` — Terminal rendering, focus ring, and the event loop
//! - `theme`  — Color palettes
//! - `config` — Optional TOML config file merged with CLI flags
//! - `logging` — File-backed `tracing` subscriber

// ── Module declarations ─────────────────────────────────────────────────────
mod alert;
mod config;
mod logging;
mod number;
mod screen;
mod start;
mod theme;

// ── Imports ─────────────────────────────────────────────────────────────────

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::config::{FileConfig, Settings, default_config_path};
use crate::screen::{Outcome, run_start_screen};
use crate::theme::{Theme, ThemeMode};

// ── CLI ─────────────────────────────────────────────────────────────────────

/// The top-level CLI struct. `#[derive(Parser)]` generates the argument parser.
///
/// Every flag is optional: unset flags fall back to the config file, then to
/// built-in defaults.
#[derive(Parser)]
#[command(name = "number-pick", about = "Pick a number between 1 and 99 to start a game")]
struct Cli {
    /// Color palette
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Log filter, e.g. `info` or `number_pick=debug` (RUST_LOG overrides)
    #[arg(long)]
    log_level: Option<String>,

    /// File to append log lines to
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,
}

// ── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicit `--config` must exist; the default location is optional.
    let file = match (&cli.config, default_config_path()) {
        (Some(path), _) => {
            if !path.is_file() {
                anyhow::bail!("config file {} not found", path.display());
            }
            FileConfig::load(path)?
        }
        (None, Some(path)) => FileConfig::load(&path)?,
        (None, None) => FileConfig::default(),
    };
    let settings = Settings::merge(file, cli.theme, cli.log_level, cli.log_file);

    logging::init(&settings.log_file, &settings.log_level)?;
    info!(?settings, "number-pick starting");

    // The parent's half of the contract: a callback the screen calls once
    // with the accepted number. It only records the number here; printing
    // waits until the terminal is back to normal.
    let mut chosen = None;
    let outcome = run_start_screen(Theme::for_mode(settings.theme), |number| {
        chosen = Some(number);
    })
    .await
    .context("running the start screen")?;

    match chosen {
        Some(number) => {
            info!(number, "handing number to the game");
            println!("Starting game with {number}");
        }
        None => info!(?outcome, "quit without starting a game"),
    }
    Ok(())
}
