//! Read-only access to a bundle of module sources.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A read-only tree of module source files, keyed by relative path.
pub trait BundleSource {
    /// Relative paths of every regular file in the bundle, in stable order.
    fn files(&self) -> Vec<PathBuf>;

    /// Contents of the file at `path`, if present.
    fn contents(&self, path: &Path) -> Option<&[u8]>;
}

/// An in-memory bundle for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    entries: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous contents at the same path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), contents.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl BundleSource for MemoryBundle {
    fn files(&self) -> Vec<PathBuf> {
        self.entries.keys().cloned().collect()
    }

    fn contents(&self, path: &Path) -> Option<&[u8]> {
        self.entries.get(path).map(|v| v.as_slice())
    }
}
