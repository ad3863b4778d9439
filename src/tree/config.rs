//! Configuration types for the directory walker

/// Configuration for directory walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Skip entries whose file name matches one of these globs.
    pub ignore_patterns: Vec<String>,
    /// Honour the `.gitignore` at the root of the walk.
    pub use_gitignore: bool,
}
