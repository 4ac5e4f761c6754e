//! # NoteGraph Parser
//!
//! Markdown note parsing for graph construction, built on `pulldown-cmark`
//! and a small regex layer.
//!
//! This crate provides:
//! - Front-matter extraction (YAML block at the top of a note)
//! - Wikilink label extraction (`[[label]]`, in document order)
//! - Title derivation (metadata `title`, first H1, file name)
//!
//! ## Quick Start
//!
//! ```
//! use notegraph_parser::parse_note;
//! use std::path::Path;
//!
//! let content = "---\ntags: [graph]\n---\n# Heading\n\n[[WikiLink]] and [[Other|alias]].\n";
//! let note = parse_note(Path::new("/vault/my-note.md"), content).unwrap();
//!
//! assert_eq!(note.title, "Heading");
//! assert_eq!(note.links, vec!["WikiLink", "Other|alias"]);
//! assert_eq!(note.metadata.tags(), vec!["graph"]);
//! ```

use notegraph_core::{Frontmatter, Result};
use std::path::Path;

pub mod frontmatter;
pub mod title;
pub mod wikilinks;

pub use frontmatter::{parse_frontmatter, split_frontmatter};
pub use title::{derive_title, first_h1};
pub use wikilinks::extract_labels;

/// A Markdown note split into its graph-relevant parts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNote {
    pub metadata: Frontmatter,
    /// Body content after the front-matter block
    pub body: String,
    pub title: String,
    /// Raw wikilink labels in document order
    pub links: Vec<String>,
}

/// Parse a note read from `source_file`.
///
/// Fails only when the front-matter block is malformed.
pub fn parse_note(source_file: &Path, content: &str) -> Result<ParsedNote> {
    let (metadata, body) = parse_frontmatter(source_file, content)?;
    let title = derive_title(&metadata, body, source_file);
    let links = extract_labels(body);

    log::trace!(
        "Parsed {}: title={:?}, {} links",
        source_file.display(),
        title,
        links.len()
    );

    Ok(ParsedNote {
        metadata,
        body: body.to_string(),
        title,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_without_frontmatter() {
        let note = parse_note(Path::new("a.md"), "Links to [[b]] and [[c]]").unwrap();
        assert!(note.metadata.is_empty());
        assert_eq!(note.title, "a.md");
        assert_eq!(note.links, vec!["b", "c"]);
    }

    #[test]
    fn test_links_in_frontmatter_not_extracted() {
        let content = "---\nrelated: \"[[hidden]]\"\n---\nBody [[visible]]";
        let note = parse_note(Path::new("a.md"), content).unwrap();
        assert_eq!(note.links, vec!["visible"]);
        assert_eq!(note.body, "Body [[visible]]");
    }

    #[test]
    fn test_malformed_frontmatter_fails() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(parse_note(Path::new("bad.md"), content).is_err());
    }
}
