//! ExportFormat trait definition

use crate::stats::PlayerStats;

/// Common interface for per-player stats export formats
pub trait ExportFormat {
    /// Header line, if the format has one
    fn header(&self) -> Option<String>;

    fn format_row(&self, stats: &PlayerStats) -> String;

    fn format_rows(&self, stats: &[PlayerStats]) -> String {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for row in stats {
            output.push_str(&self.format_row(row));
            output.push('\n');
        }
        output
    }
}
