use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Where a package was first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    /// Added from configuration rather than found in a source file.
    Manual,
}

/// Ordered set of unique import paths. Iteration order is first-insertion
/// order; re-adding a known path changes nothing.
#[derive(Debug, Default)]
pub struct PackageSet {
    entries: IndexMap<String, Origin>,
}

impl PackageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `path` was not present before.
    pub fn add(&mut self, path: &str, origin: Origin) -> bool {
        if self.entries.contains_key(path) {
            return false;
        }
        self.entries.insert(path.to_string(), origin);
        true
    }

    pub fn add_from_file(&mut self, path: &str, file: &Path) -> bool {
        if self.entries.contains_key(path) {
            return false;
        }
        self.add(path, Origin::File(file.to_path_buf()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All unique paths in first-seen order.
    pub fn result(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Origin)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
