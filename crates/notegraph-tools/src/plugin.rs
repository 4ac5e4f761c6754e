//! Plugin capability interface

use notegraph_core::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input handed to a plugin invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequest {
    /// Vault the request operates on
    pub vault_path: PathBuf,
    /// Note the user is currently looking at, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_path: Option<PathBuf>,
    /// Selected text, empty when nothing is selected
    #[serde(default)]
    pub text: String,
}

impl PluginRequest {
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note_path: impl Into<PathBuf>) -> Self {
        self.note_path = Some(note_path.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// A single named operation over a vault.
///
/// Results are JSON objects with the payload under `contents`.
pub trait Plugin: Send + Sync {
    /// Registry name
    fn name(&self) -> &str;

    /// Run the plugin
    fn execute(&self, request: &PluginRequest) -> Result<serde_json::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = PluginRequest::new("/vault")
            .with_note("a.md")
            .with_text("hi");
        assert_eq!(request.vault_path, PathBuf::from("/vault"));
        assert_eq!(request.note_path, Some(PathBuf::from("a.md")));
        assert_eq!(request.text, "hi");
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: PluginRequest =
            serde_json::from_str(r#"{"vault_path": "/vault"}"#).unwrap();
        assert_eq!(request, PluginRequest::new("/vault"));
    }
}
