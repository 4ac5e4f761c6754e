//! Configuration types for graph building and analytics.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Names of the built-in plugins, in registration order
pub const BUILTIN_PLUGINS: [&str; 4] = ["hello", "to_upper_case", "random", "graph_rank"];

/// How the graph builder reacts to an ambiguous wiki-link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    /// Abort the build on the first ambiguous link
    #[default]
    Strict,
    /// Record ambiguous links in the build report and skip them
    Lenient,
}

/// PageRank parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following a link rather than teleporting
    pub damping: f64,
    pub max_iterations: usize,
    /// Per-node L1 convergence tolerance
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.8,
            max_iterations: 100,
            tolerance: 1.0e-6,
        }
    }
}

impl PageRankConfig {
    /// Override the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(Error::config_error(format!(
                "PageRank damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::config_error("PageRank max_iterations must be > 0"));
        }
        if !(self.tolerance > 0.0) {
            return Err(Error::config_error("PageRank tolerance must be > 0"));
        }
        Ok(())
    }
}

/// Global NoteGraph configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteGraphConfig {
    /// Directory names pruned at every level of the vault walk
    pub excluded_dirs: BTreeSet<String>,
    /// Extension (without dot) of notes that become graph nodes
    pub note_extension: String,
    /// Drop `#heading` / `#^block` suffixes from link targets before resolving
    pub strip_subpath: bool,
    pub resolution: ResolutionPolicy,
    pub pagerank: PageRankConfig,
    /// Plugins registered at startup
    pub plugins: Vec<String>,
    /// Maximum number of notes returned by the `random` plugin
    pub random_sample_limit: usize,
    pub log_level: String,
}

impl Default for NoteGraphConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: [".git", ".obsidian", ".trash"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            note_extension: "md".to_string(),
            strip_subpath: true,
            resolution: ResolutionPolicy::Strict,
            pagerank: PageRankConfig::default(),
            plugins: BUILTIN_PLUGINS.iter().map(|s| s.to_string()).collect(),
            random_sample_limit: 20,
            log_level: "info".to_string(),
        }
    }
}

impl NoteGraphConfig {
    /// Create new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder
    pub fn builder() -> NoteGraphConfigBuilder {
        NoteGraphConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.note_extension.is_empty() {
            return Err(Error::config_error("note_extension cannot be empty"));
        }
        if self.note_extension.starts_with('.') {
            return Err(Error::config_error(
                "note_extension must not start with '.'",
            ));
        }
        if self.excluded_dirs.iter().any(|d| d.is_empty() || d.contains('/')) {
            return Err(Error::config_error(
                "excluded_dirs entries must be bare directory names",
            ));
        }
        self.pagerank.validate()?;
        Ok(())
    }

    /// True when `name` is pruned from vault walks
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, yaml).map_err(|e| {
            Error::config_error(format!(
                "Failed to save config to {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration from a YAML file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Builder for NoteGraphConfig
#[derive(Debug, Default)]
pub struct NoteGraphConfigBuilder {
    config: NoteGraphConfig,
}

impl NoteGraphConfigBuilder {
    /// Create a new builder seeded with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory name to prune
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_dirs.insert(name.into());
        self
    }

    /// Set the note extension (without dot)
    pub fn note_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.note_extension = ext.into();
        self
    }

    pub fn strip_subpath(mut self, strip: bool) -> Self {
        self.config.strip_subpath = strip;
        self
    }

    pub fn resolution(mut self, policy: ResolutionPolicy) -> Self {
        self.config.resolution = policy;
        self
    }

    pub fn pagerank(mut self, pagerank: PageRankConfig) -> Self {
        self.config.pagerank = pagerank;
        self
    }

    /// Replace the enabled plugin list
    pub fn plugins<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.plugins = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn random_sample_limit(mut self, limit: usize) -> Self {
        self.config.random_sample_limit = limit;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<NoteGraphConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = NoteGraphConfig::default();
        assert!(config.is_excluded(".obsidian"));
        assert!(config.is_excluded(".git"));
        assert!(config.is_excluded(".trash"));
        assert_eq!(config.note_extension, "md");
        assert_eq!(config.pagerank.damping, 0.8);
        assert_eq!(config.resolution, ResolutionPolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = NoteGraphConfig::builder()
            .exclude_dir("archive")
            .resolution(ResolutionPolicy::Lenient)
            .plugins(["hello"])
            .build()
            .unwrap();

        assert!(config.is_excluded("archive"));
        assert_eq!(config.resolution, ResolutionPolicy::Lenient);
        assert_eq!(config.plugins, vec!["hello".to_string()]);
    }

    #[test]
    fn test_invalid_damping() {
        let result = NoteGraphConfig::builder()
            .pagerank(PageRankConfig::default().with_damping(1.5))
            .build();
        assert!(matches!(result, Err(Error::ConfigError { .. })));
    }

    #[test]
    fn test_invalid_extension() {
        assert!(NoteGraphConfig::builder().note_extension(".md").build().is_err());
        assert!(NoteGraphConfig::builder().note_extension("").build().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notegraph.yaml");

        let config = NoteGraphConfig::builder()
            .exclude_dir("templates")
            .random_sample_limit(5)
            .build()
            .unwrap();
        config.save(&path).unwrap();

        let loaded = NoteGraphConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("partial.yaml");
        std::fs::write(&path, "resolution: lenient\npagerank:\n  damping: 0.85\n").unwrap();

        let loaded = NoteGraphConfig::load(&path).unwrap();
        assert_eq!(loaded.resolution, ResolutionPolicy::Lenient);
        assert_eq!(loaded.pagerank.damping, 0.85);
        assert_eq!(loaded.pagerank.max_iterations, 100);
        assert_eq!(loaded.note_extension, "md");
    }
}
