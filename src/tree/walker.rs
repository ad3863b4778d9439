//! DirectoryWalker - explicit stack depth-first walk emitting visitor events

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::config::WalkerConfig;
use super::filter::FileFilter;
use super::visitor::{EntryMeta, TreeVisitor, WalkControl};

/// Counters gathered while walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    /// Directories entered, root included.
    pub directories: u64,
    pub files: u64,
    /// Entries reported through `visit_failed`.
    pub failed: u64,
    /// Bytes of every visited file.
    pub bytes: u64,
    /// True when a visitor asked the walk to stop.
    pub terminated: bool,
}

/// A listing item still to be visited.
enum Pending {
    Child(PathBuf),
    /// An entry of the directory that could not be read.
    Failed(io::Error),
}

/// One open directory on the walk stack.
struct Frame {
    path: PathBuf,
    pending: std::vec::IntoIter<Pending>,
}

/// Depth-first walker that reports enter/visit/exit events to a `TreeVisitor`.
///
/// Siblings are visited in file-name order. Symlinks are never followed.
pub struct DirectoryWalker {
    config: WalkerConfig,
}

impl DirectoryWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk `root` and stream events to `visitor`.
    ///
    /// Fails before any event is emitted when `root` is missing, unreadable
    /// or not a directory.
    pub fn walk<V: TreeVisitor>(&self, root: &Path, visitor: &mut V) -> Result<WalkSummary> {
        let meta = fs::metadata(root).map_err(|source| Error::RootNotFound {
            path: root.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(Error::RootNotDirectory(root.to_path_buf()));
        }
        let children = read_children(root).map_err(|source| Error::RootNotFound {
            path: root.to_path_buf(),
            source,
        })?;

        let mut filter = FileFilter::new(self.config.ignore_patterns.clone());
        if self.config.use_gitignore {
            filter = filter.with_gitignore(root)?;
        }

        let mut summary = WalkSummary {
            directories: 1,
            ..Default::default()
        };
        if visitor.enter_directory(root, EntryMeta::dir())? == WalkControl::Terminate {
            summary.terminated = true;
            return Ok(summary);
        }

        let stack = vec![Frame {
            path: root.to_path_buf(),
            pending: children.into_iter(),
        }];
        drain(stack, &filter, visitor, &mut summary)?;

        Ok(summary)
    }
}

/// Run the walk until the stack is empty or a visitor terminates it.
fn drain<V: TreeVisitor>(
    mut stack: Vec<Frame>,
    filter: &FileFilter,
    visitor: &mut V,
    summary: &mut WalkSummary,
) -> Result<()> {
    loop {
        let next = match stack.last_mut() {
            Some(frame) => frame.pending.next().map(|item| (frame.path.clone(), item)),
            None => break,
        };

        let control = match next {
            Some((_, Pending::Child(child))) => {
                visit_entry(&child, filter, visitor, &mut stack, summary)?
            }
            Some((dir, Pending::Failed(e))) => {
                summary.failed += 1;
                visitor.visit_failed(&dir, &e)?
            }
            None => match stack.pop() {
                Some(frame) => visitor.exit_directory(&frame.path)?,
                None => break,
            },
        };

        if control == WalkControl::Terminate {
            summary.terminated = true;
            break;
        }
    }
    Ok(())
}

/// Emit the event for a single child entry, pushing a frame for directories.
fn visit_entry<V: TreeVisitor>(
    path: &Path,
    filter: &FileFilter,
    visitor: &mut V,
    stack: &mut Vec<Frame>,
    summary: &mut WalkSummary,
) -> Result<WalkControl> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => {
            summary.failed += 1;
            return visitor.visit_failed(path, &e);
        }
    };

    let file_type = meta.file_type();
    if file_type.is_symlink() {
        debug!("skipping symlink {}", path.display());
        return Ok(WalkControl::Continue);
    }
    if filter.is_ignored(path, file_type.is_dir()) {
        debug!("ignoring {}", path.display());
        return Ok(WalkControl::Continue);
    }

    if file_type.is_dir() {
        let children = match read_children(path) {
            Ok(c) => c,
            Err(e) => {
                summary.failed += 1;
                return visitor.visit_failed(path, &e);
            }
        };
        summary.directories += 1;
        let control = visitor.enter_directory(path, EntryMeta::dir())?;
        if control == WalkControl::Continue {
            stack.push(Frame {
                path: path.to_path_buf(),
                pending: children.into_iter(),
            });
        }
        Ok(control)
    } else if file_type.is_file() {
        summary.files += 1;
        summary.bytes += meta.len();
        visitor.visit_file(path, EntryMeta::file(meta.len()))
    } else {
        debug!("skipping special file {}", path.display());
        Ok(WalkControl::Continue)
    }
}

/// List a directory's children. Fails only if the directory cannot be opened.
fn read_children(path: &Path) -> io::Result<Vec<Pending>> {
    let entries = fs::read_dir(path)?.map(|entry| entry.map(|e| e.path()));
    Ok(order_listing(entries))
}

/// Unreadable entries first, then children sorted by file name.
fn order_listing(entries: impl IntoIterator<Item = io::Result<PathBuf>>) -> Vec<Pending> {
    let mut failed = Vec::new();
    let mut children = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => children.push(path),
            Err(e) => failed.push(Pending::Failed(e)),
        }
    }
    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    failed
        .into_iter()
        .chain(children.into_iter().map(Pending::Child))
        .collect()
}
