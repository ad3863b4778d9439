//! Traversal events delivered by `DirectoryWalker`

use std::io;
use std::path::Path;

use crate::error::Result;

/// Basic metadata handed to `enter_directory` and `visit_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub is_dir: bool,
    /// Byte length for files. Directories report 0.
    pub len: u64,
}

impl EntryMeta {
    pub fn dir() -> Self {
        Self { is_dir: true, len: 0 }
    }

    pub fn file(len: u64) -> Self {
        Self { is_dir: false, len }
    }
}

/// What the walker should do after a callback returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Stop immediately. No further events are emitted.
    Terminate,
}

/// Callback sink for a depth-first walk.
///
/// For any directory D, `enter_directory(D)` precedes every event for D's
/// descendants, and those precede `exit_directory(D)`. An `Err` from any
/// callback aborts the walk and is returned from `DirectoryWalker::walk`.
pub trait TreeVisitor {
    fn enter_directory(&mut self, path: &Path, meta: EntryMeta) -> Result<WalkControl>;

    fn visit_file(&mut self, path: &Path, meta: EntryMeta) -> Result<WalkControl>;

    fn exit_directory(&mut self, path: &Path) -> Result<WalkControl>;

    /// Called in place of `enter_directory` or `visit_file` for entries that
    /// could not be read.
    fn visit_failed(&mut self, path: &Path, error: &io::Error) -> Result<WalkControl>;
}
