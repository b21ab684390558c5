//! Terminal observer: stage lines and a progress bar on stderr.

use iconsync_core::pipeline::CollectionState;
use iconsync_core::progress::{fraction, ProgressObserver};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) const BAR_WIDTH: usize = 20;

/// Draws a single-line bar that later lines overwrite cleanly.
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    bar_active: AtomicBool,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print `line` on its own line, wiping a half-drawn bar first.
    fn line(&self, line: &str) {
        let mut err = std::io::stderr().lock();
        if self.bar_active.swap(false, Ordering::SeqCst) {
            let _ = write!(err, "\r\x1b[2K");
        }
        let _ = writeln!(err, "{}", line);
    }
}

impl ProgressObserver for ConsoleObserver {
    fn report(&self, current: usize, total: usize) {
        let mut err = std::io::stderr().lock();
        if current >= total {
            if self.bar_active.swap(false, Ordering::SeqCst) {
                let _ = write!(err, "\r\x1b[2K");
                let _ = err.flush();
            }
            return;
        }
        self.bar_active.store(true, Ordering::SeqCst);
        let _ = write!(err, "\r      Progress: {}", render_bar(current, total));
        let _ = err.flush();
    }

    fn transition(&self, collection: &str, state: CollectionState) {
        tracing::debug!(collection, state = ?state, "collection state");
        match state {
            CollectionState::Extracting => {
                self.line(&format!("Getting {} icons", collection));
                self.line(&format!("   [1/5] {}...", state));
            }
            CollectionState::Persisted => self.line(&format!("   => {} done", collection)),
            CollectionState::Failed => self.line(&format!("   => {} failed", collection)),
            _ => {
                if let Some((n, of)) = state.step() {
                    self.line(&format!("   [{}/{}] {}...", n, of, state));
                }
            }
        }
    }

    fn warn(&self, line: &str) {
        tracing::warn!("{}", line);
        self.line(&format!("   warning: {}", line));
    }

    fn error(&self, line: &str) {
        tracing::error!("{}", line);
        self.line(&format!("   error: {}", line));
    }
}

/// `[████████------------] (8/20)`
pub(crate) fn render_bar(current: usize, total: usize) -> String {
    let filled = (fraction(current, total) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] ({}/{})",
        "█".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        current.min(total),
        total
    )
}
