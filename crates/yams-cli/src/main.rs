mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use yams_core::{CellKey, YamsConfig};

#[derive(Parser)]
#[command(name = "yams", version)]
#[command(about = "Yams scoresheet rules and statistics")]
struct Cli {
    /// Config file (defaults to <config dir>/yams/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// History file, overriding the configured one
    #[arg(long, global = true, env = "YAMS_HISTORY")]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Player and app-wide statistics over completed games
    Stats {
        /// Print the full JSON document instead of the leaderboard
        #[arg(long)]
        json: bool,
    },
    /// List games, or show one game in detail
    Game { id: Option<u32> },
    /// Show what a raw entry would be stored and displayed as
    Check {
        /// Cell key, e.g. ones, max, smallStraight, yams
        key: CellKey,
        /// Raw value; omit for an empty submission
        #[arg(allow_negative_numbers = true)]
        value: Option<i32>,
        /// Notation name (defaults to the configured one)
        #[arg(short, long)]
        notation: Option<String>,
        /// Current value of the max/min counterpart cell
        #[arg(long, allow_negative_numbers = true)]
        counterpart: Option<i32>,
    },
    /// List stored and built-in notations
    Notations,
    /// Export per-player statistics
    Export {
        /// Output file (defaults to the configured export path)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ExportKind::Tsv)]
        format: ExportKind,
    },
    /// Reprint the leaderboard whenever the history file changes
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Tab-separated, one row per player
    Tsv,
    /// One JSON object per line
    Ndjson,
    /// Single JSON document with app-wide stats
    Json,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("yams").join("config.toml"))
}

fn load_config(cli: &Cli) -> YamsConfig {
    let mut config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => match YamsConfig::load(&path) {
            Ok(config) => config,
            Err(e) if e.is_not_found() && cli.config.is_none() => {
                debug!("No config at {}, using defaults", path.display());
                YamsConfig::default()
            }
            Err(e) => {
                warn!("Failed to load config {}: {}, using defaults", path.display(), e);
                YamsConfig::default()
            }
        },
        None => YamsConfig::default(),
    };
    if let Some(history) = &cli.history {
        config.history_path = history.clone();
    }
    config
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("yams=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli);

    match cli.command {
        Command::Stats { json } => commands::stats::run(&config, json),
        Command::Game { id } => commands::game::run(&config, id),
        Command::Check {
            key,
            value,
            notation,
            counterpart,
        } => commands::check::run(&config, key, value, notation.as_deref(), counterpart),
        Command::Notations => commands::notations::run(&config),
        Command::Export { output, format } => {
            commands::export::run(&config, output.as_deref(), format)
        }
        Command::Watch { interval_ms } => commands::watch::run(&config, interval_ms),
    }
}
