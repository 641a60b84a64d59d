//! TSV export format implementation

use crate::stats::PlayerStats;

use super::format::ExportFormat;

/// TSV (Tab-Separated Values) exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter;

impl ExportFormat for TsvExporter {
    fn header(&self) -> Option<String> {
        Some(format_tsv_header())
    }

    fn format_row(&self, stats: &PlayerStats) -> String {
        format_tsv_row(stats)
    }
}

pub fn format_tsv_header() -> String {
    [
        "player",
        "games",
        "wins",
        "average",
        "best",
        "worst",
        "yamsrate",
        "history",
    ]
    .join("\t")
}

fn optional(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Tabs and newlines in names would break the row
fn sanitize(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}

pub fn format_tsv_row(stats: &PlayerStats) -> String {
    let history: Vec<String> = stats.score_history.iter().map(|s| s.to_string()).collect();
    [
        sanitize(&stats.name),
        stats.games_played.to_string(),
        stats.wins.to_string(),
        format!("{:.1}", stats.average),
        optional(stats.best),
        optional(stats.worst),
        format!("{:.2}", stats.yams_rate),
        history.join(","),
    ]
    .join("\t")
}

/// Whole TSV document, header included
pub fn generate_stats_tsv(stats: &[PlayerStats]) -> String {
    TsvExporter.format_rows(stats)
}
