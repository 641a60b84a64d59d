//! Subcommand implementations.

pub mod check;
pub mod export;
pub mod game;
pub mod notations;
pub mod stats;
pub mod watch;

use anyhow::{Context, Result};
use yams_core::{History, YamsConfig};

/// History from the configured path; a missing file is an empty history.
pub fn load_history(config: &YamsConfig) -> Result<History> {
    History::load_or_default(&config.history_path)
        .with_context(|| format!("Failed to load history {}", config.history_path.display()))
}
