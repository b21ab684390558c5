//! `iconsync list` – show configured collections.

use anyhow::Result;
use iconsync_core::api::api_node_id;
use iconsync_core::config::{CollectionConfig, IconsyncConfig};
use iconsync_core::pipeline::artifact_path;

pub fn run_list(cfg: &IconsyncConfig) -> Result<()> {
    if cfg.collections.is_empty() {
        println!("No collections configured.");
        return Ok(());
    }
    println!("{:<16} {:<12} {}", "NAME", "NODE", "OUTPUT");
    for c in &cfg.collections {
        println!("{}", row(cfg, c));
    }
    Ok(())
}

pub(crate) fn row(cfg: &IconsyncConfig, c: &CollectionConfig) -> String {
    format!(
        "{:<16} {:<12} {}",
        c.name,
        api_node_id(&c.node_id),
        artifact_path(&cfg.output_dir, &c.name).display()
    )
}
