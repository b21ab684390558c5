//! CLI for the iconsync icon pipeline.

mod commands;
mod observer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use iconsync_core::config::{self, IconsyncConfig};
use std::path::{Path, PathBuf};

use commands::{run_completions, run_list, run_normalize, run_pipeline};

/// Project-local config file picked up when `--config` is not given.
const LOCAL_CONFIG: &str = "iconsync.toml";

/// Top-level CLI for iconsync.
#[derive(Debug, Parser)]
#[command(name = "iconsync")]
#[command(about = "Generate color-parameterized icon modules from a design file", long_about = None)]
pub struct Cli {
    /// Config file (default: ./iconsync.toml, else ~/.config/iconsync/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch icons and write one module per collection.
    Run {
        /// Only run this collection (repeatable). Default: all, in config order.
        #[arg(long = "collection", short = 'c', value_name = "NAME")]
        collections: Vec<String>,
        /// Write modules here instead of the configured output_dir.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// List configured collections.
    List,

    /// Print the normalized template fragment of a local SVG file.
    Normalize {
        /// Path to the SVG file.
        path: PathBuf,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                collections,
                output_dir,
            } => {
                let cfg = load_config(cli.config.as_deref())?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_pipeline(cfg, &collections, output_dir).await?;
            }
            CliCommand::List => {
                let cfg = load_config(cli.config.as_deref())?;
                run_list(&cfg)?;
            }
            CliCommand::Normalize { path } => run_normalize(&path)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

fn load_config(explicit: Option<&Path>) -> Result<IconsyncConfig> {
    if let Some(path) = explicit {
        return config::load_from(path);
    }
    let local = Path::new(LOCAL_CONFIG);
    if local.is_file() {
        return config::load_from(local);
    }
    config::load_or_init()
}

#[cfg(test)]
mod tests;
