//! NoteGraph CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use notegraph::{
    LogFormat, OutputFormat, StatsOptions, format_stats, init_logging, load_config, resolve_label,
    run_stats, to_json,
};
use notegraph_tools::{PluginRegistry, PluginRequest};
use std::path::PathBuf;
use std::time::Duration;

/// NoteGraph - wiki-link graph analytics for Markdown vaults
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit log lines as JSON
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print graph statistics, PageRank leaders and diameter
    Stats {
        /// Path to the vault directory
        #[arg(short, long, env = "NOTEGRAPH_VAULT_PATH")]
        vault: PathBuf,

        /// Treat links as undirected
        #[arg(long, action = clap::ArgAction::SetTrue)]
        undirected: bool,

        /// Number of top-ranked notes to list
        #[arg(long, default_value = "10")]
        top: usize,

        /// PageRank damping factor (overrides the configuration)
        #[arg(long)]
        damping: Option<f64>,

        /// Abort the build after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Output format (human, json)
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Resolve a wiki-link label to a vault path
    Resolve {
        /// Path to the vault directory
        #[arg(short, long, env = "NOTEGRAPH_VAULT_PATH")]
        vault: PathBuf,

        /// Label as written between [[ and ]]
        label: String,
    },

    /// List registered plugins
    Plugins,

    /// Run a plugin and print its JSON result
    Run {
        /// Plugin name
        plugin: String,

        /// Path to the vault directory
        #[arg(short, long, env = "NOTEGRAPH_VAULT_PATH")]
        vault: PathBuf,

        /// Note the request refers to
        #[arg(long)]
        note: Option<PathBuf>,

        /// Selected text passed to the plugin
        #[arg(long, default_value = "")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_logging(
        &level,
        if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Human
        },
    );

    log::debug!("NoteGraph v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Stats {
            vault,
            undirected,
            top,
            damping,
            timeout_secs,
            format,
        } => {
            if let Some(damping) = damping {
                config.pagerank = config.pagerank.with_damping(damping);
                config.validate()?;
            }
            let options = StatsOptions {
                directed: !undirected,
                top,
            };
            let report = run_stats(
                vault,
                config,
                options,
                timeout_secs.map(Duration::from_secs),
            )
            .await?;
            println!("{}", format_stats(&report, format)?);
        }
        Command::Resolve { vault, label } => {
            let resolved = resolve_label(&vault, &label, &config)
                .with_context(|| format!("Failed to resolve [[{}]]", label))?;
            match resolved {
                Some(path) => println!("{}", path.display()),
                None => println!("[[{}]] is unresolved", label),
            }
        }
        Command::Plugins => {
            let registry = PluginRegistry::from_config(&config)?;
            for name in registry.names() {
                println!("{}", name);
            }
        }
        Command::Run {
            plugin,
            vault,
            note,
            text,
        } => {
            let registry = PluginRegistry::from_config(&config)?;
            let mut request = PluginRequest::new(vault).with_text(text);
            if let Some(note) = note {
                request = request.with_note(note);
            }
            let result = tokio::task::spawn_blocking(move || registry.execute(&plugin, &request))
                .await
                .context("Plugin worker panicked")??;
            println!("{}", to_json(&result)?);
        }
    }

    Ok(())
}
