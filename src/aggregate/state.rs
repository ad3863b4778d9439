//! Traversal state owned by the aggregator for a single walk

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::tree::path_depth;

use super::map::AccumulationMap;

/// Where the aggregator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No directory has been entered yet.
    NotStarted,
    /// Root recorded; sizes are being merged.
    Accumulating,
    /// A depth-1 subtree closed and its block is being written.
    FlushingGroup,
    /// The root closed. Any further event is a contract violation.
    Terminated,
}

#[derive(Debug)]
pub struct TraversalState {
    pub(super) root: Option<PathBuf>,
    pub(super) root_depth: usize,
    /// Files directly in the root plus every closed depth-1 subtree.
    pub(super) root_total: u64,
    pub(super) map: AccumulationMap,
    pub(super) phase: Phase,
}

impl Default for TraversalState {
    fn default() -> Self {
        Self {
            root: None,
            root_depth: 0,
            root_total: 0,
            map: AccumulationMap::new(),
            phase: Phase::NotStarted,
        }
    }
}

impl TraversalState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn root_total(&self) -> u64 {
        self.root_total
    }

    pub fn map(&self) -> &AccumulationMap {
        &self.map
    }

    pub(super) fn start(&mut self, root: &Path) {
        self.root = Some(root.to_path_buf());
        self.root_depth = path_depth(root);
        self.phase = Phase::Accumulating;
    }

    /// Fail unless the state can accept a traversal event for `path`.
    pub(super) fn ensure_accumulating(&self, path: &Path) -> Result<&Path> {
        match (self.phase, self.root.as_deref()) {
            (Phase::Accumulating, Some(root)) => Ok(root),
            (Phase::NotStarted, _) => Err(Error::invariant(path, "event before the root was entered")),
            (Phase::Terminated, _) => Err(Error::invariant(path, "event after the root was closed")),
            _ => Err(Error::invariant(path, "event while a report block was being flushed")),
        }
    }

    /// Depth of `path` relative to the root. The root itself is level 0.
    pub(super) fn relative_level(&self, path: &Path) -> Result<usize> {
        let inside = self.root.as_deref().is_some_and(|root| path.starts_with(root));
        if !inside {
            return Err(Error::invariant(path, "path is outside the traversal root"));
        }
        Ok(path_depth(path).saturating_sub(self.root_depth))
    }

    /// Drop the working map once the walk is over.
    pub(super) fn terminate(&mut self) {
        self.map.clear();
        self.phase = Phase::Terminated;
    }
}
