//! treesize - cumulative directory sizes, reported once per top-level subtree

pub mod aggregate;
pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{
    ReportCollector, ReportGroup, ReportLine, ReportSink, ReportTotals, SizeAggregator, report_sizes,
};
pub use error::{Error, Result};
pub use output::{JsonFormatter, OutputConfig, StreamingFormatter};
pub use tree::{DirectoryWalker, EntryMeta, TreeVisitor, WalkControl, WalkSummary, WalkerConfig};
