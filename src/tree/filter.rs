//! Entry filtering for the directory walker

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::Result;

use super::utils::should_ignore_path;

/// Decides which entries the walker skips entirely.
///
/// Skipped entries produce no events, so their bytes never reach any total.
#[derive(Debug, Default)]
pub struct FileFilter {
    patterns: Vec<String>,
    gitignore: Option<Gitignore>,
}

impl FileFilter {
    /// Create a filter from name globs only.
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            gitignore: None,
        }
    }

    /// Also honour the `.gitignore` found directly in `root`, if there is one.
    pub fn with_gitignore(mut self, root: &Path) -> Result<Self> {
        let file = root.join(".gitignore");
        if !file.is_file() {
            tracing::debug!("no .gitignore in {}", root.display());
            return Ok(self);
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&file) {
            return Err(err.into());
        }
        self.gitignore = Some(builder.build()?);
        Ok(self)
    }

    /// Check if an entry should be skipped.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if should_ignore_path(path, &self.patterns) {
            return true;
        }
        self.gitignore
            .as_ref()
            .is_some_and(|gi| gi.matched_path_or_any_parents(path, is_dir).is_ignore())
    }
}
