//! Progress and diagnostics observer.
//!
//! Pipeline stages report `(current, total)` ticks and plain warning/error
//! lines through this trait; what happens with them (progress bar, log file,
//! nothing) is up to the caller.

use crate::pipeline::CollectionState;

/// Receives progress ticks and diagnostic lines from the pipeline.
pub trait ProgressObserver: Send + Sync {
    /// `current` of `total` items done in the current stage.
    fn report(&self, current: usize, total: usize);

    /// A collection entered `state`.
    fn transition(&self, collection: &str, state: CollectionState) {
        tracing::debug!(collection, state = ?state, "collection state");
    }

    /// Recoverable problem worth surfacing.
    fn warn(&self, line: &str) {
        tracing::warn!("{}", line);
    }

    /// Failure of one asset or one collection.
    fn error(&self, line: &str) {
        tracing::error!("{}", line);
    }
}

/// Observer that drops progress ticks and forwards lines to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn report(&self, current: usize, total: usize) {
        tracing::trace!(current, total, "progress");
    }
}

/// Fraction complete in [0.0, 1.0]; an empty stage counts as complete.
pub fn fraction(current: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (current as f64 / total as f64).min(1.0)
}
