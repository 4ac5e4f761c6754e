//! Document scanner: walks the vault and parses every Markdown note

use crate::walk::walk_files;
use notegraph_core::{Error, NoteGraphConfig, Result};
use notegraph_parser::{ParsedNote, parse_note};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A note that parsed successfully
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedNote {
    /// Path relative to the vault root
    pub path: PathBuf,
    /// Absolute path of the file
    pub source_file: PathBuf,
    pub parsed: ParsedNote,
}

/// Why a Markdown file did not become a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Front-matter block is not a valid YAML mapping
    Frontmatter(String),
    /// File content is not valid UTF-8
    NotUtf8,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Frontmatter(reason) => write!(f, "could not process front-matter: {}", reason),
            SkipReason::NotUtf8 => write!(f, "content is not valid UTF-8"),
        }
    }
}

/// A Markdown file skipped during scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    /// Path relative to the vault root
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Per-document scan result
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Parsed(ScannedNote),
    Skipped(SkippedDocument),
}

/// Walks a vault and parses its Markdown notes
pub struct DocumentScanner<'a> {
    root: &'a Path,
    config: &'a NoteGraphConfig,
}

impl<'a> DocumentScanner<'a> {
    /// `root` should already be canonical; relative paths are taken against it
    pub fn new(root: &'a Path, config: &'a NoteGraphConfig) -> Self {
        Self { root, config }
    }

    /// Lazily scan the vault in traversal order.
    ///
    /// Non-Markdown files are ignored. Filesystem errors are yielded as `Err`
    /// and should abort the scan.
    pub fn iter(&self) -> impl Iterator<Item = Result<ScanOutcome>> + '_ {
        walk_files(self.root, &self.config.excluded_dirs)
            .filter(|entry| match entry {
                Ok(entry) => self.is_note(entry.path()),
                Err(_) => true,
            })
            .map(|entry| entry.and_then(|entry| self.scan_file(entry.path())))
    }

    /// Scan the whole vault eagerly
    pub fn scan(&self) -> Result<Vec<ScanOutcome>> {
        self.iter().collect()
    }

    fn is_note(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.config.note_extension)
    }

    fn scan_file(&self, source_file: &Path) -> Result<ScanOutcome> {
        let path = source_file
            .strip_prefix(self.root)
            .map(Path::to_path_buf)
            .map_err(|_| {
                Error::invalid_path(format!(
                    "{} is outside the vault root",
                    source_file.display()
                ))
            })?;

        let bytes = std::fs::read(source_file)?;
        let Ok(content) = String::from_utf8(bytes) else {
            return Ok(ScanOutcome::Skipped(SkippedDocument {
                path,
                reason: SkipReason::NotUtf8,
            }));
        };

        match parse_note(source_file, &content) {
            Ok(parsed) => Ok(ScanOutcome::Parsed(ScannedNote {
                path,
                source_file: source_file.to_path_buf(),
                parsed,
            })),
            Err(Error::FrontmatterError { reason, .. }) => Ok(ScanOutcome::Skipped(SkippedDocument {
                path,
                reason: SkipReason::Frontmatter(reason),
            })),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn scan(root: &Path) -> Vec<ScanOutcome> {
        let root = root.canonicalize().unwrap();
        let config = NoteGraphConfig::default();
        DocumentScanner::new(&root, &config).scan().unwrap()
    }

    #[test]
    fn test_only_markdown_scanned() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.md", b"# A\n[[b]]");
        write(temp.path(), "image.png", b"\x89PNG");
        write(temp.path(), "notes.txt", b"text");

        let outcomes = scan(temp.path());
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            ScanOutcome::Parsed(note) => {
                assert_eq!(note.path, PathBuf::from("a.md"));
                assert_eq!(note.parsed.title, "A");
                assert_eq!(note.parsed.links, vec!["b"]);
                assert!(note.source_file.is_absolute());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_bad_frontmatter_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bad.md", b"---\ntitle: [oops\n---\nBody");

        let outcomes = scan(temp.path());
        match &outcomes[..] {
            [ScanOutcome::Skipped(skipped)] => {
                assert_eq!(skipped.path, PathBuf::from("bad.md"));
                assert!(matches!(skipped.reason, SkipReason::Frontmatter(_)));
            }
            other => panic!("unexpected outcomes: {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_frontmatter_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "open.md", b"---\ntitle: Open\n[[a]]");

        let outcomes = scan(temp.path());
        assert!(matches!(
            &outcomes[..],
            [ScanOutcome::Skipped(SkippedDocument {
                reason: SkipReason::Frontmatter(_),
                ..
            })]
        ));
    }

    #[test]
    fn test_non_utf8_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "latin1.md", b"caf\xe9");

        let outcomes = scan(temp.path());
        assert!(matches!(
            &outcomes[..],
            [ScanOutcome::Skipped(SkippedDocument {
                reason: SkipReason::NotUtf8,
                ..
            })]
        ));
    }

    #[test]
    fn test_excluded_dirs_not_scanned() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".trash/gone.md", b"# Gone");
        write(temp.path(), "sub/.obsidian/cfg.md", b"# Config");
        write(temp.path(), "sub/kept.md", b"# Kept");

        let outcomes = scan(temp.path());
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            &outcomes[0],
            ScanOutcome::Parsed(note) if note.path == Path::new("sub/kept.md")
        ));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::Frontmatter("bad indent".to_string());
        assert!(reason.to_string().contains("front-matter"));
    }
}
