//! Vault traversal shared by the index builder and the document scanner

use notegraph_core::{Error, Result};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Canonicalise a vault root, requiring an existing directory
pub fn canonical_root(root: &Path) -> Result<PathBuf> {
    let canonical = std::fs::canonicalize(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_not_found(root),
        _ => Error::io(e),
    })?;

    if !canonical.is_dir() {
        return Err(Error::invalid_path(format!(
            "Vault root is not a directory: {}",
            root.display()
        )));
    }

    Ok(canonical)
}

/// Every non-directory entry under `root`, top-down.
///
/// Symbolic links to directories are skipped without being followed.
///
/// Within a directory, files come before subdirectories and both are sorted
/// by name, so a directory's own files are visited before anything nested
/// below it. Directories named in `excluded` are pruned at every depth before
/// they are descended into. The root itself is never pruned.
pub fn walk_files<'a>(
    root: &'a Path,
    excluded: &'a BTreeSet<String>,
) -> impl Iterator<Item = Result<DirEntry>> + 'a {
    WalkDir::new(root)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(move |entry| !is_excluded_dir(entry, excluded))
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => None,
            // Linked directories are neither descended into nor listed
            Ok(entry) if entry.path_is_symlink() && entry.path().is_dir() => None,
            Ok(entry) => Some(Ok(entry)),
            Err(err) => Some(Err(Error::io(io::Error::from(err)))),
        })
}

fn is_excluded_dir(entry: &DirEntry, excluded: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excluded.contains(name))
}

/// Directory of `path` relative to `root`; the root itself is the empty path
pub fn relative_dir(root: &Path, path: &Path) -> PathBuf {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
