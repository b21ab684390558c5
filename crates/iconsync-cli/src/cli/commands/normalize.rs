//! `iconsync normalize <file>` – show what the normalizer makes of one SVG.

use anyhow::{Context, Result};
use iconsync_core::normalize;
use std::path::Path;

pub fn run_normalize(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if !normalize::has_wrapper(&raw) {
        eprintln!("warning: {} has no <svg> wrapper", path.display());
    }
    println!("{}", normalize::normalize(&raw));
    Ok(())
}
