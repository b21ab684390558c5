//! Per-collection state machine.

use std::fmt;

/// Where a collection is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionState {
    Idle,
    Extracting,
    ResolvingUrls,
    FetchingContent,
    Normalizing,
    Generating,
    Persisted,
    Failed,
}

impl CollectionState {
    /// Legal moves. Fetching never fails a collection; writing the artifact can.
    pub fn can_transition_to(self, next: CollectionState) -> bool {
        use CollectionState::*;
        matches!(
            (self, next),
            (Idle, Extracting)
                | (Extracting, ResolvingUrls)
                | (Extracting, Failed)
                | (ResolvingUrls, FetchingContent)
                | (ResolvingUrls, Failed)
                | (FetchingContent, Normalizing)
                | (Normalizing, Generating)
                | (Generating, Persisted)
                | (Generating, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CollectionState::Persisted | CollectionState::Failed)
    }

    /// `(step, of)` for the working states, used for `[2/5]`-style output.
    pub fn step(self) -> Option<(usize, usize)> {
        let n = match self {
            CollectionState::Extracting => 1,
            CollectionState::ResolvingUrls => 2,
            CollectionState::FetchingContent => 3,
            CollectionState::Normalizing => 4,
            CollectionState::Generating => 5,
            _ => return None,
        };
        Some((n, 5))
    }
}

impl fmt::Display for CollectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CollectionState::Idle => "idle",
            CollectionState::Extracting => "fetching icon nodes",
            CollectionState::ResolvingUrls => "resolving icon URLs",
            CollectionState::FetchingContent => "fetching icon files",
            CollectionState::Normalizing => "normalizing markup",
            CollectionState::Generating => "writing module",
            CollectionState::Persisted => "done",
            CollectionState::Failed => "failed",
        };
        f.write_str(s)
    }
}
