//! Pipeline orchestrator.
//!
//! Runs each configured collection through
//! extract → resolve URLs → fetch → normalize → generate → persist,
//! one collection at a time in declared order. A failed collection is
//! reported and the next one still runs.

mod outcome;
mod run;
mod state;

pub use outcome::CollectionOutcome;
pub use run::{artifact_path, Pipeline, PipelineSettings};
pub use state::CollectionState;
