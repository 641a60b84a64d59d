//! Export of computed statistics.
//!
//! - **TSV**: one row per player, for spreadsheets
//! - **JSON**: NDJSON rows, or a single document with app-wide stats
//! - **Console**: colored leaderboard and game summaries

mod console;
mod format;
mod json;
mod tsv;

pub use console::{format_game_summary, format_leaderboard};
pub use format::ExportFormat;
pub use json::{JsonExporter, StatsDocument, generate_stats_json};
pub use tsv::{TsvExporter, format_tsv_header, generate_stats_tsv};
