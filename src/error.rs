//! Error types for treesize

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a walk.
///
/// Per-entry access failures are not represented here: they are reported
/// through `TreeVisitor::visit_failed` and the walk keeps going.
#[derive(Error, Debug)]
pub enum Error {
    /// The starting path does not exist or its metadata cannot be read.
    #[error("cannot access '{}': {source}", .path.display())]
    RootNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The starting path exists but is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    /// The event stream broke the enter/visit/exit ordering contract.
    #[error("traversal invariant violated at '{}': {reason}", .path.display())]
    Invariant { path: PathBuf, reason: &'static str },

    /// A `.gitignore` file could not be parsed.
    #[error("invalid gitignore: {0}")]
    Gitignore(#[from] ignore::Error),

    /// Writing the report failed.
    #[error("error writing output: {0}")]
    Io(#[from] std::io::Error),

    #[error("error encoding JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invariant(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        Error::Invariant {
            path: path.into(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
