//! Core data models representing vault notes and graph nodes.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Immutable**: Built once per graph-build run, read-only afterwards

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier assigned to a note during one graph-build run.
///
/// Ids start at 1 and are only stable within a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl NoteId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsed front-matter block of a note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl Frontmatter {
    /// Wrap an already parsed mapping
    pub fn new(data: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Scalar value rendered as text (strings verbatim, numbers and bools formatted)
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Extract tags from frontmatter
    pub fn tags(&self) -> Vec<String> {
        self.string_list("tags")
    }

    /// Extract aliases from frontmatter
    pub fn aliases(&self) -> Vec<String> {
        self.string_list("aliases")
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        match self.data.get(key) {
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            _ => vec![],
        }
    }
}

/// A Markdown note that became a graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: NoteId,
    /// Path relative to the vault root; unique within the vault
    pub path: PathBuf,
    pub title: String,
    /// Absolute path of the originating file
    pub source_file: PathBuf,
    pub metadata: Frontmatter,
}

/// Node payload of the note graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoteNode {
    /// Scanned Markdown document with full attributes
    Document(Document),
    /// Resolved link target that never became a document
    Unscanned { id: NoteId, path: PathBuf },
}

impl NoteNode {
    pub fn id(&self) -> NoteId {
        match self {
            NoteNode::Document(doc) => doc.id,
            NoteNode::Unscanned { id, .. } => *id,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            NoteNode::Document(doc) => &doc.path,
            NoteNode::Unscanned { path, .. } => path,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            NoteNode::Document(doc) => Some(doc),
            NoteNode::Unscanned { .. } => None,
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, NoteNode::Document(_))
    }

    /// Title for display; unscanned nodes fall back to their file name
    pub fn title(&self) -> String {
        match self {
            NoteNode::Document(doc) => doc.title.clone(),
            NoteNode::Unscanned { path, .. } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frontmatter(value: serde_json::Value) -> Frontmatter {
        match value {
            serde_json::Value::Object(map) => Frontmatter::new(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_frontmatter_tags_and_aliases() {
        let fm = frontmatter(json!({"tags": ["rust", "graph"], "aliases": "Alias"}));
        assert_eq!(fm.tags(), vec!["rust", "graph"]);
        assert_eq!(fm.aliases(), vec!["Alias"]);
    }

    #[test]
    fn test_frontmatter_get_text() {
        let fm = frontmatter(json!({"title": "Hello", "year": 2021, "list": [1]}));
        assert_eq!(fm.get_text("title"), Some("Hello".to_string()));
        assert_eq!(fm.get_text("year"), Some("2021".to_string()));
        assert_eq!(fm.get_text("list"), None);
        assert_eq!(fm.get_text("missing"), None);
    }

    #[test]
    fn test_unscanned_node_title() {
        let node = NoteNode::Unscanned {
            id: NoteId(3),
            path: PathBuf::from("assets/diagram.png"),
        };
        assert_eq!(node.id(), NoteId(3));
        assert_eq!(node.title(), "diagram.png");
        assert!(!node.is_document());
        assert!(node.document().is_none());
    }

    #[test]
    fn test_note_id_display() {
        assert_eq!(NoteId(42).to_string(), "42");
    }
}
