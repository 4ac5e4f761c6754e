//! Wikilink label resolution against the inverted index.
//!
//! Mirrors the vault's "shortest path" convention: an unqualified label is
//! looked up by file name and must be unique, a path-qualified label is
//! trusted as written.

use crate::index::InvertedIndex;
use notegraph_core::{Error, NoteGraphConfig, Result};
use std::path::{Path, PathBuf};

/// Resolution settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Extension (without dot) appended to labels that have none
    pub note_extension: String,
    /// Drop `#heading` / `#^block` suffixes before resolving
    pub strip_subpath: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            note_extension: "md".to_string(),
            strip_subpath: true,
        }
    }
}

impl From<&NoteGraphConfig> for ResolverOptions {
    fn from(config: &NoteGraphConfig) -> Self {
        Self {
            note_extension: config.note_extension.clone(),
            strip_subpath: config.strip_subpath,
        }
    }
}

/// Resolves link labels against one index
#[derive(Debug, Clone)]
pub struct LinkResolver<'a> {
    index: &'a InvertedIndex,
    options: ResolverOptions,
}

impl<'a> LinkResolver<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self::with_options(index, ResolverOptions::default())
    }

    pub fn with_options(index: &'a InvertedIndex, options: ResolverOptions) -> Self {
        Self { index, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve a raw label to a vault-relative path.
    ///
    /// Returns `Ok(None)` when the target file does not exist anywhere in the
    /// vault, and [`Error::AmbiguousReference`] when an unqualified name exists
    /// in more than one directory.
    pub fn resolve(&self, label: &str) -> Result<Option<PathBuf>> {
        // Anything after the first pipe is display text
        let target = label.split_once('|').map_or(label, |(target, _)| target);

        let target = if self.options.strip_subpath {
            match target.find('#') {
                Some(0) => return Ok(None),
                Some(pos) => &target[..pos],
                None => target,
            }
        } else {
            target
        };

        if target.is_empty() {
            return Ok(None);
        }

        let candidate = if Path::new(target).extension().is_none() {
            PathBuf::from(format!("{}.{}", target, self.options.note_extension))
        } else {
            PathBuf::from(target)
        };

        let Some(file_name) = candidate.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let Some(dirs) = self.index.directories(file_name) else {
            return Ok(None);
        };

        let has_dir = candidate
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty());
        if has_dir {
            return Ok(Some(candidate));
        }

        match dirs {
            [dir] => Ok(Some(dir.join(file_name))),
            _ => Err(Error::ambiguous_reference(label, dirs.to_vec())),
        }
    }
}

/// Resolve `label` against `index` with default options
pub fn resolve(index: &InvertedIndex, label: &str) -> Result<Option<PathBuf>> {
    LinkResolver::new(index).resolve(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.insert("Note A.md", "");
        index.insert("Deep.md", "folder/sub");
        index.insert("x.md", "one");
        index.insert("x.md", "two");
        index.insert("diagram.png", "assets");
        index.insert("Report v1.2", "");
        index
    }

    #[test]
    fn test_bare_label_gets_note_extension() {
        let index = index();
        assert_eq!(
            resolve(&index, "Note A").unwrap(),
            resolve(&index, "Note A.md").unwrap()
        );
        assert_eq!(
            resolve(&index, "Note A").unwrap(),
            Some(PathBuf::from("Note A.md"))
        );
    }

    #[test]
    fn test_alias_ignored() {
        let index = index();
        assert_eq!(
            resolve(&index, "Note A|Display Text").unwrap(),
            resolve(&index, "Note A").unwrap()
        );
    }

    #[test]
    fn test_only_first_pipe_splits() {
        let index = index();
        assert_eq!(
            resolve(&index, "Note A|a|b").unwrap(),
            Some(PathBuf::from("Note A.md"))
        );
    }

    #[test]
    fn test_unique_name_gets_directory() {
        assert_eq!(
            resolve(&index(), "Deep").unwrap(),
            Some(PathBuf::from("folder/sub/Deep.md"))
        );
    }

    #[test]
    fn test_ambiguous_name_is_error() {
        let err = resolve(&index(), "x").unwrap_err();
        match err {
            Error::AmbiguousReference { label, candidates } => {
                assert_eq!(label, "x");
                assert_eq!(candidates, vec![PathBuf::from("one"), PathBuf::from("two")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_qualified_label_trusted_verbatim() {
        let index = index();
        assert_eq!(
            resolve(&index, "two/x").unwrap(),
            Some(PathBuf::from("two/x.md"))
        );
        // Not checked against the directory list
        assert_eq!(
            resolve(&index, "elsewhere/x").unwrap(),
            Some(PathBuf::from("elsewhere/x.md"))
        );
    }

    #[test]
    fn test_missing_file_is_none() {
        let index = index();
        assert_eq!(resolve(&index, "missing").unwrap(), None);
        assert_eq!(resolve(&index, "folder/missing").unwrap(), None);
    }

    #[test]
    fn test_attachment_with_extension() {
        assert_eq!(
            resolve(&index(), "diagram.png").unwrap(),
            Some(PathBuf::from("assets/diagram.png"))
        );
    }

    #[test]
    fn test_dotted_name_used_verbatim() {
        // "v1.2" reads as an extension, so no ".md" is appended
        assert_eq!(
            resolve(&index(), "Report v1.2").unwrap(),
            Some(PathBuf::from("Report v1.2"))
        );
    }

    #[test]
    fn test_subpath_stripped() {
        let index = index();
        assert_eq!(
            resolve(&index, "Note A#Heading").unwrap(),
            Some(PathBuf::from("Note A.md"))
        );
        assert_eq!(
            resolve(&index, "Note A#^block|alias").unwrap(),
            Some(PathBuf::from("Note A.md"))
        );
        assert_eq!(resolve(&index, "#Local heading").unwrap(), None);
    }

    #[test]
    fn test_subpath_kept_when_disabled() {
        let index = index();
        let resolver = LinkResolver::with_options(
            &index,
            ResolverOptions {
                strip_subpath: false,
                ..ResolverOptions::default()
            },
        );
        assert_eq!(resolver.resolve("Note A#Heading").unwrap(), None);
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(resolve(&index(), "").unwrap(), None);
        assert_eq!(resolve(&index(), "|alias").unwrap(), None);
    }
}
