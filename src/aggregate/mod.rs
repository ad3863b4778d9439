//! Per-directory size aggregation
//!
//! `SizeAggregator` consumes the events of a `DirectoryWalker` and flushes one
//! `ReportGroup` per depth-1 subtree of the walk root to a `ReportSink`.
//!
//! - `map` - insertion-ordered running totals
//! - `state` - traversal root, depth reference and phase
//! - `aggregator` - the event dispatcher
//! - `report` - report lines, groups and sinks

mod aggregator;
mod map;
mod report;
mod state;

use std::path::Path;

pub use aggregator::SizeAggregator;
pub use map::AccumulationMap;
pub use report::{ReportCollector, ReportGroup, ReportLine, ReportSink, ReportTotals};
pub use state::{Phase, TraversalState};

use crate::error::Result;
use crate::tree::{DirectoryWalker, WalkerConfig};

/// Walk `root`, stream report blocks to `sink`, then hand it the totals.
///
/// Returns the sink so buffered sinks can be inspected.
pub fn report_sizes<S: ReportSink>(
    root: &Path,
    config: WalkerConfig,
    sink: S,
) -> Result<(S, ReportTotals)> {
    let mut aggregator = SizeAggregator::new(sink);
    let summary = DirectoryWalker::new(config).walk(root, &mut aggregator)?;

    let totals = ReportTotals {
        root: root.to_path_buf(),
        total: aggregator.state().root_total(),
        summary,
    };
    let mut sink = aggregator.into_sink();
    sink.finish(&totals)?;
    Ok((sink, totals))
}
