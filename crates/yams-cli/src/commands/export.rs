//! Export command for per-player statistics.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use yams_core::export::{ExportFormat, JsonExporter, generate_stats_json, generate_stats_tsv};
use yams_core::{StatsService, YamsConfig};

use super::load_history;
use crate::ExportKind;

pub fn run(config: &YamsConfig, output: Option<&Path>, format: ExportKind) -> Result<()> {
    let history = load_history(config)?;
    let (players, app) = StatsService::compute(&history.players, &history.games);

    let content = match format {
        ExportKind::Tsv => generate_stats_tsv(&players),
        ExportKind::Ndjson => JsonExporter.format_rows(&players),
        ExportKind::Json => generate_stats_json(&players, &app, chrono::Utc::now())?,
    };

    let path = output.unwrap_or(config.export_path.as_path());
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Exported {} players to {}", players.len(), path.display());
    Ok(())
}
