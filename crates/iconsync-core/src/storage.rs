//! Artifact persistence: whole-file atomic replace.
//!
//! The module text is written to a temp file in the destination directory,
//! synced, then renamed over the old artifact. Readers see either the old or
//! the new file, never a partial one.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::checksum;

/// What `write_artifact` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// New content was written.
    Written,
    /// The existing file already had identical content; left untouched.
    Unchanged,
}

/// Atomically replace `path` with `contents`, creating parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> Result<WriteOutcome> {
    if path.is_file() {
        let existing = checksum::sha256_path(path)?;
        if existing == checksum::sha256_bytes(contents.as_bytes()) {
            tracing::debug!("artifact unchanged: {}", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir: {}", dir.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .context("write artifact temp file")?;
    temp.as_file().sync_all().context("sync artifact temp file")?;
    temp.persist(path)
        .with_context(|| format!("rename temp file to {}", path.display()))?;

    tracing::info!("wrote {}", path.display());
    Ok(WriteOutcome::Written)
}
