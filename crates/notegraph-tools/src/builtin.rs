//! Built-in plugins

use crate::plugin::{Plugin, PluginRequest};
use notegraph_core::prelude::*;
use notegraph_graph::walk::{canonical_root, walk_files};
use notegraph_graph::{GraphBuilder, pagerank, top_ranked};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;

/// Greets the caller
#[derive(Debug, Default, Clone)]
pub struct HelloPlugin;

impl Plugin for HelloPlugin {
    fn name(&self) -> &str {
        "hello"
    }

    fn execute(&self, _request: &PluginRequest) -> Result<serde_json::Value> {
        Ok(json!({ "contents": format!("Hello from {}", self.name()) }))
    }
}

/// Uppercases the selected text
#[derive(Debug, Default, Clone)]
pub struct UpperCasePlugin;

impl Plugin for UpperCasePlugin {
    fn name(&self) -> &str {
        "to_upper_case"
    }

    fn execute(&self, request: &PluginRequest) -> Result<serde_json::Value> {
        Ok(json!({ "contents": request.text.to_uppercase() }))
    }
}

/// One entry of a random sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledNote {
    /// Absolute path of the note
    pub path: PathBuf,
    /// File name without the note extension
    pub name: String,
    pub info: SampleInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleInfo {
    pub score: f64,
}

/// Random sample of vault notes with random scores, best first.
///
/// Each note is kept with probability one half until `limit` notes are taken.
#[derive(Debug, Clone)]
pub struct RandomPlugin {
    config: NoteGraphConfig,
    seed: Option<u64>,
}

impl RandomPlugin {
    pub fn new(config: NoteGraphConfig) -> Self {
        Self { config, seed: None }
    }

    /// Fix the random sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sample(&self, request: &PluginRequest) -> Result<Vec<SampledNote>> {
        let root = canonical_root(&request.vault_path)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let limit = self.config.random_sample_limit;
        let suffix = format!(".{}", self.config.note_extension);

        let mut items = Vec::new();
        for entry in walk_files(&root, &self.config.excluded_dirs) {
            if items.len() >= limit {
                break;
            }
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy();
            let Some(name) = file_name.strip_suffix(&suffix) else {
                continue;
            };
            if !rng.gen_bool(0.5) {
                continue;
            }
            items.push(SampledNote {
                path: entry.path().to_path_buf(),
                name: name.to_string(),
                info: SampleInfo {
                    score: rng.gen_range(0.0..1.0),
                },
            });
        }

        items.sort_by(|a, b| b.info.score.total_cmp(&a.info.score));
        Ok(items)
    }
}

impl Plugin for RandomPlugin {
    fn name(&self) -> &str {
        "random"
    }

    fn execute(&self, request: &PluginRequest) -> Result<serde_json::Value> {
        let items = self.sample(request)?;
        log::debug!("Sampled {} notes", items.len());
        Ok(json!({ "contents": items }))
    }
}

/// Highest PageRank notes of the request's vault
#[derive(Debug, Clone)]
pub struct GraphRankPlugin {
    config: NoteGraphConfig,
    limit: usize,
}

impl GraphRankPlugin {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new(config: NoteGraphConfig) -> Self {
        Self {
            config,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Plugin for GraphRankPlugin {
    fn name(&self) -> &str {
        "graph_rank"
    }

    fn execute(&self, request: &PluginRequest) -> Result<serde_json::Value> {
        let built = GraphBuilder::new(self.config.clone()).build(&request.vault_path)?;
        let scores = pagerank(&built.graph, &self.config.pagerank)?;
        let ranked = top_ranked(&built.graph, &built.page_ref, &scores, self.limit);
        Ok(json!({ "contents": ranked }))
    }
}
