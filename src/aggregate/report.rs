//! Report groups and the sink they are flushed to

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::tree::WalkSummary;

/// One directory line of a report block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub name: String,
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    /// Indentation level within the block. The depth-1 directory is level 0.
    pub level: usize,
    pub size: u64,
}

/// The completed report block for one depth-1 subtree of the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGroup {
    pub lines: Vec<ReportLine>,
}

impl ReportGroup {
    /// The depth-1 directory this block describes.
    pub fn head(&self) -> Option<&ReportLine> {
        self.lines.first()
    }
}

/// Whole-walk totals, available once the root has been closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    #[serde(serialize_with = "lossy_path")]
    pub root: PathBuf,
    /// Bytes under the root: its own files plus every depth-1 subtree.
    pub total: u64,
    pub summary: WalkSummary,
}

/// Paths that are not valid UTF-8 are written with replacement characters.
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Receives report blocks as they are flushed.
pub trait ReportSink {
    fn write_group(&mut self, group: &ReportGroup) -> Result<()>;

    fn finish(&mut self, _totals: &ReportTotals) -> Result<()> {
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn write_group(&mut self, group: &ReportGroup) -> Result<()> {
        (**self).write_group(group)
    }

    fn finish(&mut self, totals: &ReportTotals) -> Result<()> {
        (**self).finish(totals)
    }
}

/// Keeps every flushed group in memory.
#[derive(Debug, Default)]
pub struct ReportCollector {
    pub groups: Vec<ReportGroup>,
    pub totals: Option<ReportTotals>,
}

impl ReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the line for a directory by base name, across all groups.
    pub fn line(&self, name: &str) -> Option<&ReportLine> {
        self.groups
            .iter()
            .flat_map(|g| g.lines.iter())
            .find(|l| l.name == name)
    }
}

impl ReportSink for ReportCollector {
    fn write_group(&mut self, group: &ReportGroup) -> Result<()> {
        self.groups.push(group.clone());
        Ok(())
    }

    fn finish(&mut self, totals: &ReportTotals) -> Result<()> {
        self.totals = Some(totals.clone());
        Ok(())
    }
}
