//! Interrupt handling for a running crawl
//!
//! The first interrupt asks the coordinator to stop after its in-flight
//! batch so the domain store is still saved. A second interrupt means the
//! user does not want to wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status used when the process is terminated by a repeated interrupt
pub const FORCED_EXIT_CODE: i32 = 130;

/// What the process should do about an interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// Let the crawl finish its batch and save
    GracefulStop,
    /// Exit immediately without saving
    ForceExit,
}

/// Tracks interrupts against a coordinator's stop flag
#[derive(Debug, Clone)]
pub struct InterruptGuard {
    stop: Arc<AtomicBool>,
}

impl InterruptGuard {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }

    /// Records one interrupt and returns the action to take
    pub fn on_interrupt(&self) -> InterruptAction {
        if self.stop.swap(true, Ordering::SeqCst) {
            InterruptAction::ForceExit
        } else {
            InterruptAction::GracefulStop
        }
    }

    /// Listens for Ctrl-C until the process exits
    ///
    /// Meant to run in its own task. Returns only if the signal listener
    /// cannot be installed.
    pub async fn watch_ctrl_c(self) {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Unable to listen for Ctrl-C: {}", e);
                return;
            }
            match self.on_interrupt() {
                InterruptAction::GracefulStop => tracing::warn!(
                    "Ctrl-C received, stopping after in-flight requests (press again to quit now)"
                ),
                InterruptAction::ForceExit => {
                    tracing::error!("Second Ctrl-C received, exiting without saving");
                    std::process::exit(FORCED_EXIT_CODE);
                }
            }
        }
    }
}
