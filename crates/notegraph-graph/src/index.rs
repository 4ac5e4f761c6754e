//! Inverted filename index used to resolve unqualified wikilinks

use crate::walk::{relative_dir, walk_files};
use notegraph_core::Result;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Mapping from bare file name to every vault directory containing it.
///
/// Directories are relative to the vault root (the root is the empty path)
/// and listed in traversal order. File names are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    entries: HashMap<String, Vec<PathBuf>>,
    files: usize,
}

impl InvertedIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `root` once, pruning directories named in `excluded` at every level
    pub fn build(root: &Path, excluded: &BTreeSet<String>) -> Result<Self> {
        let mut index = Self::new();

        for entry in walk_files(root, excluded) {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            index.insert(name, relative_dir(root, entry.path()));
        }

        log::debug!(
            "Indexed {} files under {} distinct names",
            index.files,
            index.entries.len()
        );
        Ok(index)
    }

    /// Record that `dir` contains a file called `name`
    pub fn insert(&mut self, name: impl Into<String>, dir: impl Into<PathBuf>) {
        self.entries.entry(name.into()).or_default().push(dir.into());
        self.files += 1;
    }

    /// Directories containing a file called `name`
    pub fn directories(&self, name: &str) -> Option<&[PathBuf]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct file names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of files indexed
    pub fn file_count(&self) -> usize {
        self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(name, dirs)| (name.as_str(), dirs.as_slice()))
    }
}
