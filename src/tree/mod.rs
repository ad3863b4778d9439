//! Directory walking
//!
//! `DirectoryWalker` performs a depth-first walk and reports each directory
//! entry, file and directory exit to a `TreeVisitor`. Walks are sequential;
//! every callback finishes before the next entry is read.

mod config;
mod filter;
mod utils;
mod visitor;
mod walker;

// Re-export public types
pub use config::WalkerConfig;
pub use filter::FileFilter;
pub use utils::{entry_name, format_size, glob_match, path_depth, should_ignore_path};
pub use visitor::{EntryMeta, TreeVisitor, WalkControl};
pub use walker::{DirectoryWalker, WalkSummary};
