//! CLI command handlers. Each command is in its own file.

mod completions;
pub(crate) mod list;
mod normalize;
pub(crate) mod run;

pub use completions::run_completions;
pub use list::run_list;
pub use normalize::run_normalize;
pub use run::run_pipeline;
