//! Plugin registry populated from configuration

use crate::builtin::{GraphRankPlugin, HelloPlugin, RandomPlugin, UpperCasePlugin};
use crate::plugin::{Plugin, PluginRequest};
use notegraph_core::{Error, NoteGraphConfig, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

/// Named plugins available for execution
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Arc<dyn Plugin>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every plugin named in `config.plugins`.
    ///
    /// Fails with [`Error::PluginNotFound`] on a name that is not built in.
    pub fn from_config(config: &NoteGraphConfig) -> Result<Self> {
        let mut registry = Self::new();
        for name in &config.plugins {
            let plugin = builtin(name, config).ok_or_else(|| Error::plugin_not_found(name))?;
            registry.register(plugin);
        }
        log::debug!("Registered plugins: {:?}", registry.names());
        Ok(registry)
    }

    /// Add a plugin, replacing any plugin with the same name
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.plugins.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run the plugin called `name`
    #[instrument(skip(self, request), fields(vault = %request.vault_path.display()))]
    pub fn execute(&self, name: &str, request: &PluginRequest) -> Result<serde_json::Value> {
        let plugin = self.get(name).ok_or_else(|| Error::plugin_not_found(name))?;
        plugin.execute(request).map_err(|e| match e {
            Error::PluginError { .. } | Error::PluginNotFound { .. } => e,
            other => Error::plugin_error(name, other.to_string()),
        })
    }
}

fn builtin(name: &str, config: &NoteGraphConfig) -> Option<Arc<dyn Plugin>> {
    let plugin: Arc<dyn Plugin> = match name {
        "hello" => Arc::new(HelloPlugin),
        "to_upper_case" => Arc::new(UpperCasePlugin),
        "random" => Arc::new(RandomPlugin::new(config.clone())),
        "graph_rank" => Arc::new(GraphRankPlugin::new(config.clone())),
        _ => return None,
    };
    Some(plugin)
}
