//! `iconsync run [--collection NAME]... [--output-dir DIR]` – run the pipeline.

use anyhow::{bail, Context, Result};
use iconsync_core::api::FigmaClient;
use iconsync_core::config::{CollectionConfig, IconsyncConfig};
use iconsync_core::pipeline::{CollectionOutcome, Pipeline, PipelineSettings};
use iconsync_core::storage::WriteOutcome;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::observer::ConsoleObserver;

/// Environment variables checked for the API token, in order.
pub(crate) const TOKEN_VARS: [&str; 2] = ["FIGMA_TOKEN", "FIGMA_PERSONAL_ACCESS_TOKEN"];

pub async fn run_pipeline(
    mut cfg: IconsyncConfig,
    only: &[String],
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = output_dir {
        cfg.output_dir = dir;
    }
    cfg.validate()?;

    let selected = select_collections(&cfg.collections, only)?;
    if selected.is_empty() {
        println!("No collections configured.");
        return Ok(());
    }

    let token = api_token(|name| std::env::var(name).ok())?;
    let client = FigmaClient::from_config(&cfg, &token)?;
    let pipeline = Pipeline::new(
        Arc::new(client),
        PipelineSettings::from_config(&cfg),
        Arc::new(ConsoleObserver::new()),
    );

    let outcomes = pipeline.run_collections(&selected).await;
    print_summary(&outcomes);

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        bail!("{} of {} collection(s) failed", failed, outcomes.len());
    }
    Ok(())
}

/// Configured collections, filtered to `only` (config order kept). Unknown names are an error.
pub(crate) fn select_collections(
    all: &[CollectionConfig],
    only: &[String],
) -> Result<Vec<CollectionConfig>> {
    if only.is_empty() {
        return Ok(all.to_vec());
    }
    for name in only {
        if !all.iter().any(|c| &c.name == name) {
            bail!("unknown collection: {}", name);
        }
    }
    Ok(all
        .iter()
        .filter(|c| only.contains(&c.name))
        .cloned()
        .collect())
}

/// First non-empty token among `TOKEN_VARS`.
pub(crate) fn api_token(lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .with_context(|| format!("no API token: set {}", TOKEN_VARS.join(" or ")))
}

fn print_summary(outcomes: &[CollectionOutcome]) {
    println!();
    for o in outcomes {
        if let Some(err) = &o.error {
            println!("  {:<16} failed: {}", o.name, err);
            continue;
        }
        let what = match o.write {
            Some(WriteOutcome::Unchanged) => "unchanged",
            _ => "written",
        };
        print!(
            "  {:<16} {} icons, {} ({})",
            o.name,
            o.icons_written,
            what,
            o.artifact.display()
        );
        match &o.warning {
            Some(w) => println!(" – {}", w),
            None => println!(),
        }
    }
}
