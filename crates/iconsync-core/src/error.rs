//! Error taxonomy for the icon pipeline.
//!
//! Collection-fatal conditions are `PipelineError`; per-asset failures are
//! `FetchFailure` values collected by the fetcher and never propagated past it.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

use crate::api::ApiError;

/// Conditions that end one collection's run in the `Failed` state.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The node-tree request failed or the root was not present in the response.
    #[error("could not load node tree for root {root}: {message}")]
    NodeTree { root: String, message: String },

    /// No leaf-instance nodes were found under the root; usually a wrong root id.
    #[error("no icons found under root {root}")]
    EmptyResult { root: String },

    /// A URL resolution chunk failed. `start..end` indexes the requested id list.
    #[error("URL resolution failed for ids {start}..{end}{}: {message}", fmt_status(.status))]
    Resolution {
        start: usize,
        end: usize,
        status: Option<u32>,
        message: String,
    },

    /// The generated artifact could not be written.
    #[error("failed to write artifact: {0:#}")]
    Persist(anyhow::Error),
}

fn fmt_status(status: &Option<u32>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl PipelineError {
    /// Build a resolution error for the chunk `range` from the upstream error.
    pub fn resolution(range: Range<usize>, err: &ApiError) -> Self {
        PipelineError::Resolution {
            start: range.start,
            end: range.end,
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// One asset whose content could not be downloaded.
#[derive(Debug)]
pub struct FetchFailure {
    pub id: String,
    pub name: String,
    pub error: ApiError,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to fetch {} ({}): {}", self.name, self.id, self.error)
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Recoverable shortfall: some extracted icons did not make it into the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialFetchWarning {
    /// Icons that entered the stage (extracted, or resolved for the fetcher alone).
    pub requested: usize,
    /// Icons whose content was downloaded.
    pub fetched: usize,
    /// Icons the API returned no download location for.
    pub unresolved: usize,
}

impl PartialFetchWarning {
    /// Total number of icons missing from the output.
    pub fn dropped(&self) -> usize {
        self.requested.saturating_sub(self.fetched)
    }
}

impl fmt::Display for PartialFetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to fetch {} of {} icons",
            self.dropped(),
            self.requested
        )?;
        if self.unresolved > 0 {
            write!(f, " ({} had no download URL)", self.unresolved)?;
        }
        Ok(())
    }
}
