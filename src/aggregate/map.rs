//! Insertion-ordered directory totals

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Running byte totals keyed by directory path.
///
/// Iteration follows the order in which paths were first inserted, which is
/// the order directories were entered during the walk.
#[derive(Debug, Default)]
pub struct AccumulationMap {
    entries: Vec<(PathBuf, u64)>,
    index: HashMap<PathBuf, usize>,
}

impl AccumulationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `path` with a zero total. Returns false if it was already present.
    pub fn insert(&mut self, path: &Path) -> bool {
        if self.index.contains_key(path) {
            return false;
        }
        self.index.insert(path.to_path_buf(), self.entries.len());
        self.entries.push((path.to_path_buf(), 0));
        true
    }

    /// Add `bytes` to the total of `path`, creating the entry at 0 first if absent.
    pub fn add(&mut self, path: &Path, bytes: u64) {
        self.insert(path);
        if let Some(&i) = self.index.get(path) {
            self.entries[i].1 += bytes;
        }
    }

    pub fn get(&self, path: &Path) -> Option<u64> {
        self.index.get(path).map(|&i| self.entries[i].1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, u64)> {
        self.entries.iter().map(|(p, size)| (p.as_path(), *size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let mut map = AccumulationMap::new();
        map.insert(Path::new("/r/z"));
        map.insert(Path::new("/r/a"));
        map.add(Path::new("/r/m"), 4);

        let order: Vec<_> = map.iter().map(|(p, _)| p.to_path_buf()).collect();
        assert_eq!(
            order,
            vec![
                PathBuf::from("/r/z"),
                PathBuf::from("/r/a"),
                PathBuf::from("/r/m")
            ]
        );
    }

    #[test]
    fn test_add_accumulates() {
        let mut map = AccumulationMap::new();
        assert!(map.insert(Path::new("/r/a")));
        map.add(Path::new("/r/a"), 10);
        map.add(Path::new("/r/a"), 5);
        assert_eq!(map.get(Path::new("/r/a")), Some(15));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_twice_keeps_total() {
        let mut map = AccumulationMap::new();
        map.add(Path::new("/r/a"), 3);
        assert!(!map.insert(Path::new("/r/a")));
        assert_eq!(map.get(Path::new("/r/a")), Some(3));
    }

    #[test]
    fn test_clear() {
        let mut map = AccumulationMap::new();
        map.add(Path::new("/r/a"), 3);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(Path::new("/r/a")), None);
    }
}
