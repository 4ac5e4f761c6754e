//! # Vault Plugins
//!
//! Capability interface for named vault operations plus the built-in
//! plugins. Plugins are registered once at startup from the configured list of
//! names; there is no runtime discovery.
//!
//! ## Built-in Plugins
//!
//! - `hello` - greeting naming the plugin
//! - `to_upper_case` - uppercases the selected text
//! - `random` - random sample of vault notes with random scores
//! - `graph_rank` - highest PageRank notes of the vault
//!
//! ## Example
//!
//! ```
//! use notegraph_core::NoteGraphConfig;
//! use notegraph_tools::{PluginRegistry, PluginRequest};
//!
//! let registry = PluginRegistry::from_config(&NoteGraphConfig::default())?;
//! let request = PluginRequest::new("/vault").with_text("shout");
//! let result = registry.execute("to_upper_case", &request)?;
//! assert_eq!(result["contents"], "SHOUT");
//! # Ok::<(), notegraph_core::Error>(())
//! ```

pub mod builtin;
pub mod plugin;
pub mod registry;

pub use builtin::{
    GraphRankPlugin, HelloPlugin, RandomPlugin, SampleInfo, SampledNote, UpperCasePlugin,
};
pub use plugin::{Plugin, PluginRequest};
pub use registry::PluginRegistry;

pub mod prelude {
    pub use crate::plugin::{Plugin, PluginRequest};
    pub use crate::registry::PluginRegistry;
    pub use notegraph_core::prelude::*;
}
