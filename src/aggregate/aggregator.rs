//! SizeAggregator - turns walk events into per-subtree size reports

use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::tree::{EntryMeta, TreeVisitor, WalkControl, entry_name, path_depth};

use super::report::{ReportGroup, ReportLine, ReportSink};
use super::state::{Phase, TraversalState};

/// Event dispatcher applying the accumulation, flush and termination rules.
///
/// Each directory's total lives in the accumulation map from its
/// `enter_directory` until the next depth-1 subtree starts. When a directory
/// closes its total is folded into its parent, except at depth 1 where the
/// whole map is flushed as one report block instead.
pub struct SizeAggregator<S: ReportSink> {
    state: TraversalState,
    sink: S,
}

impl<S: ReportSink> SizeAggregator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: TraversalState::default(),
            sink,
        }
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn flush(&mut self) -> Result<()> {
        let base = self.state.root_depth + 1;
        let lines = self
            .state
            .map
            .iter()
            .map(|(path, size)| ReportLine {
                name: entry_name(path),
                path: path.to_path_buf(),
                level: path_depth(path).saturating_sub(base),
                size,
            })
            .collect();
        let group = ReportGroup { lines };
        debug!(lines = group.lines.len(), "flushing report block");

        self.state.phase = Phase::FlushingGroup;
        self.sink.write_group(&group)?;
        self.state.phase = Phase::Accumulating;
        Ok(())
    }
}

impl<S: ReportSink> TreeVisitor for SizeAggregator<S> {
    fn enter_directory(&mut self, path: &Path, _meta: EntryMeta) -> Result<WalkControl> {
        if self.state.phase == Phase::NotStarted {
            self.state.start(path);
            return Ok(WalkControl::Continue);
        }
        self.state.ensure_accumulating(path)?;

        let level = self.state.relative_level(path)?;
        if level == 0 {
            return Err(Error::invariant(path, "root entered twice"));
        }
        if level == 1 {
            self.state.map.clear();
        }
        if !self.state.map.insert(path) {
            return Err(Error::invariant(path, "directory entered twice"));
        }
        Ok(WalkControl::Continue)
    }

    fn visit_file(&mut self, path: &Path, meta: EntryMeta) -> Result<WalkControl> {
        let root = self.state.ensure_accumulating(path)?;
        let Some(parent) = path.parent() else {
            return Err(Error::invariant(path, "file has no parent directory"));
        };

        if parent == root {
            self.state.root_total += meta.len;
        } else {
            self.state.relative_level(parent)?;
            self.state.map.add(parent, meta.len);
        }
        Ok(WalkControl::Continue)
    }

    fn exit_directory(&mut self, path: &Path) -> Result<WalkControl> {
        let root = self.state.ensure_accumulating(path)?;
        if path == root {
            self.state.terminate();
            return Ok(WalkControl::Terminate);
        }

        let level = self.state.relative_level(path)?;
        let Some(size) = self.state.map.get(path) else {
            return Err(Error::invariant(path, "closed a directory that was never entered"));
        };

        if level == 1 {
            self.state.root_total += size;
            self.flush()?;
        } else {
            let Some(parent) = path.parent() else {
                return Err(Error::invariant(path, "directory has no parent"));
            };
            self.state.map.add(parent, size);
        }
        Ok(WalkControl::Continue)
    }

    fn visit_failed(&mut self, path: &Path, error: &io::Error) -> Result<WalkControl> {
        self.state.ensure_accumulating(path)?;
        warn!("cannot access '{}': {}", path.display(), error);
        Ok(WalkControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ReportCollector;
    use std::path::PathBuf;

    fn agg() -> SizeAggregator<ReportCollector> {
        SizeAggregator::new(ReportCollector::new())
    }

    fn enter(a: &mut SizeAggregator<ReportCollector>, p: &str) {
        assert_eq!(
            a.enter_directory(Path::new(p), EntryMeta::dir()).unwrap(),
            WalkControl::Continue
        );
    }

    fn file(a: &mut SizeAggregator<ReportCollector>, p: &str, len: u64) {
        a.visit_file(Path::new(p), EntryMeta::file(len)).unwrap();
    }

    fn exit(a: &mut SizeAggregator<ReportCollector>, p: &str) -> WalkControl {
        a.exit_directory(Path::new(p)).unwrap()
    }

    fn summary(group: &ReportGroup) -> Vec<(String, usize, u64)> {
        group
            .lines
            .iter()
            .map(|l| (l.name.clone(), l.level, l.size))
            .collect()
    }

    #[test]
    fn test_root_files_are_not_lines() {
        let mut a = agg();
        enter(&mut a, "/r");
        file(&mut a, "/r/a.txt", 100);
        enter(&mut a, "/r/sub");
        file(&mut a, "/r/sub/b.txt", 50);
        file(&mut a, "/r/sub/c.txt", 25);
        exit(&mut a, "/r/sub");
        assert_eq!(exit(&mut a, "/r"), WalkControl::Terminate);

        assert_eq!(a.state().root_total(), 175);
        let sink = a.into_sink();
        assert_eq!(sink.groups.len(), 1);
        assert_eq!(summary(&sink.groups[0]), vec![("sub".to_string(), 0, 75)]);
    }

    #[test]
    fn test_nested_sizes_fold_upward() {
        let mut a = agg();
        enter(&mut a, "/r");
        enter(&mut a, "/r/x");
        file(&mut a, "/r/x/f", 1);
        enter(&mut a, "/r/x/y");
        file(&mut a, "/r/x/y/g", 10);
        enter(&mut a, "/r/x/y/z");
        file(&mut a, "/r/x/y/z/h", 100);
        exit(&mut a, "/r/x/y/z");
        exit(&mut a, "/r/x/y");
        enter(&mut a, "/r/x/empty");
        exit(&mut a, "/r/x/empty");
        exit(&mut a, "/r/x");
        exit(&mut a, "/r");

        let sink = a.into_sink();
        assert_eq!(
            summary(&sink.groups[0]),
            vec![
                ("x".to_string(), 0, 111),
                ("y".to_string(), 1, 110),
                ("z".to_string(), 2, 100),
                ("empty".to_string(), 1, 0),
            ]
        );
    }

    #[test]
    fn test_groups_are_isolated() {
        let mut a = agg();
        enter(&mut a, "/r");
        enter(&mut a, "/r/x");
        file(&mut a, "/r/x/one", 10);
        exit(&mut a, "/r/x");
        enter(&mut a, "/r/y");
        file(&mut a, "/r/y/two", 20);
        exit(&mut a, "/r/y");
        exit(&mut a, "/r");

        let sink = a.into_sink();
        assert_eq!(sink.groups.len(), 2);
        assert_eq!(summary(&sink.groups[0]), vec![("x".to_string(), 0, 10)]);
        assert_eq!(summary(&sink.groups[1]), vec![("y".to_string(), 0, 20)]);
    }

    #[test]
    fn test_flush_leaves_map_until_next_subtree() {
        let mut a = agg();
        enter(&mut a, "/r");
        enter(&mut a, "/r/x");
        exit(&mut a, "/r/x");
        assert_eq!(a.state().root(), Some(Path::new("/r")));
        assert_eq!(a.sink().groups.len(), 1);
        assert_eq!(a.state().map().get(Path::new("/r/x")), Some(0));
        file(&mut a, "/r/loose", 3);
        enter(&mut a, "/r/y");
        assert_eq!(a.state().map().get(Path::new("/r/x")), None);
        assert_eq!(a.state().map().len(), 1);
    }

    #[test]
    fn test_termination_discards_state() {
        let mut a = agg();
        enter(&mut a, "/r");
        enter(&mut a, "/r/x");
        exit(&mut a, "/r/x");
        assert_eq!(exit(&mut a, "/r"), WalkControl::Terminate);
        assert_eq!(a.state().phase(), Phase::Terminated);
        assert!(a.state().map().is_empty());

        let err = a
            .visit_file(Path::new("/r/late"), EntryMeta::file(1))
            .unwrap_err();
        assert!(matches!(err, Error::Invariant { .. }));
    }

    #[test]
    fn test_exit_of_unknown_directory_is_fatal() {
        let mut a = agg();
        enter(&mut a, "/r");
        enter(&mut a, "/r/x");
        let err = a.exit_directory(Path::new("/r/x/ghost")).unwrap_err();
        assert!(matches!(err, Error::Invariant { .. }));
    }

    #[test]
    fn test_event_before_root_is_fatal() {
        let mut a = agg();
        let err = a
            .visit_file(Path::new("/r/a"), EntryMeta::file(1))
            .unwrap_err();
        assert!(matches!(err, Error::Invariant { .. }));
    }

    #[test]
    fn test_path_outside_root_is_fatal() {
        let mut a = agg();
        enter(&mut a, "/r");
        let err = a
            .enter_directory(Path::new("/elsewhere/x"), EntryMeta::dir())
            .unwrap_err();
        assert!(matches!(err, Error::Invariant { .. }));
    }

    #[test]
    fn test_failed_entry_contributes_nothing() {
        let mut a = agg();
        enter(&mut a, "/r");
        enter(&mut a, "/r/x");
        file(&mut a, "/r/x/ok", 4);
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        a.visit_failed(Path::new("/r/x/locked"), &err).unwrap();
        exit(&mut a, "/r/x");
        exit(&mut a, "/r");

        let sink = a.into_sink();
        assert_eq!(summary(&sink.groups[0]), vec![("x".to_string(), 0, 4)]);
    }

    #[test]
    fn test_line_paths_are_kept() {
        let mut a = agg();
        enter(&mut a, "/r");
        enter(&mut a, "/r/x");
        exit(&mut a, "/r/x");
        exit(&mut a, "/r");
        let sink = a.into_sink();
        assert_eq!(sink.groups[0].lines[0].path, PathBuf::from("/r/x"));
        assert_eq!(sink.groups[0].head().map(|l| l.name.as_str()), Some("x"));
    }
}
