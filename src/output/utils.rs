//! Shared utility functions for output formatting

use crate::aggregate::{ReportLine, ReportTotals};
use crate::tree::format_size;

use super::config::OutputConfig;

/// Render a size as `<n> byte`, or human-readable when configured.
pub fn size_text(bytes: u64, config: &OutputConfig) -> String {
    if config.human_sizes {
        format_size(bytes)
    } else {
        format!("{} byte", bytes)
    }
}

/// Indentation for a report line.
pub fn indent_for(line: &ReportLine, config: &OutputConfig) -> String {
    config.indent.repeat(line.level)
}

/// Render a report line without colors: `<indent><name> - <size>`.
pub fn plain_line(line: &ReportLine, config: &OutputConfig) -> String {
    format!(
        "{}{} - {}",
        indent_for(line, config),
        line.name,
        size_text(line.size, config)
    )
}

/// Render the trailing summary line.
pub fn total_line(totals: &ReportTotals, config: &OutputConfig) -> String {
    let summary = &totals.summary;
    let mut text = format!(
        "{} directories, {} files, {} total",
        summary.directories.saturating_sub(1),
        summary.files,
        size_text(totals.total, config)
    );
    if summary.failed > 0 {
        text.push_str(&format!(", {} unreadable", summary.failed));
    }
    text
}
