//! Output configuration types

const DEFAULT_INDENT: &str = "\t";

/// Configuration for report formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Print sizes as `1.5K` instead of `1536 byte`.
    pub human_sizes: bool,
    /// Marker repeated once per indentation level.
    pub indent: String,
    /// Only print lines whose level is below this. Totals are unaffected.
    pub max_level: Option<usize>,
    /// Print a summary line after the last block.
    pub show_total: bool,
}

impl OutputConfig {
    /// Check if a line at `level` should be printed.
    pub fn shows_level(&self, level: usize) -> bool {
        self.max_level.is_none_or(|max| level < max)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            human_sizes: false,
            indent: DEFAULT_INDENT.to_string(),
            max_level: None,
            show_total: false,
        }
    }
}
