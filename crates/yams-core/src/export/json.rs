//! JSON export format implementation

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use crate::error::Result;
use crate::stats::{AppStats, PlayerStats};

use super::format::ExportFormat;

/// JSON exporter (one object per line, NDJSON format)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self) -> Option<String> {
        None
    }

    fn format_row(&self, stats: &PlayerStats) -> String {
        format_json_entry(stats).to_string()
    }
}

pub fn format_json_entry(stats: &PlayerStats) -> JsonValue {
    json!({
        "player_id": stats.player_id,
        "name": stats.name,
        "games": stats.games_played,
        "wins": stats.wins,
        "average": stats.average,
        "best": stats.best,
        "worst": stats.worst,
        "yams_rate": stats.yams_rate,
        "history": stats.score_history,
    })
}

/// Full stats export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub app: &'a AppStats,
    pub players: &'a [PlayerStats],
}

/// Pretty-printed document with app-wide and per-player stats
pub fn generate_stats_json(
    players: &[PlayerStats],
    app: &AppStats,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let document = StatsDocument {
        generated_at,
        app,
        players,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
