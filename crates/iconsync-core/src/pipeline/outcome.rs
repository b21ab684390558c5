//! Result of one collection's run.

use std::path::PathBuf;

use crate::error::PartialFetchWarning;
use crate::storage::WriteOutcome;

use super::state::CollectionState;

#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub name: String,
    /// `Persisted` or `Failed`.
    pub state: CollectionState,
    /// Artifact location (set whenever the run got far enough to know it).
    pub artifact: PathBuf,
    /// Icons emitted into the artifact.
    pub icons_written: usize,
    pub write: Option<WriteOutcome>,
    /// Set when some extracted icons are missing from the artifact.
    pub warning: Option<PartialFetchWarning>,
    /// Failure description for `Failed` runs.
    pub error: Option<String>,
}

impl CollectionOutcome {
    pub fn is_success(&self) -> bool {
        self.state == CollectionState::Persisted
    }
}
