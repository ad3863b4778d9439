//! Report formatting and display
//!
//! This module provides `ReportSink` implementations:
//! - Console output with colors, streamed block by block
//! - JSON lines output
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Shared line rendering helpers
//! - `streaming` - Streaming formatter for console output
//! - `json` - JSON output

mod config;
mod json;
mod streaming;
mod utils;

pub use config::OutputConfig;
pub use json::JsonFormatter;
pub use streaming::StreamingFormatter;
pub use utils::{plain_line, size_text, total_line};
