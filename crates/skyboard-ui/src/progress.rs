//! Startup progress and loading indicators.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default time a finished progress bar stays full.
pub const DEFAULT_HOLD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressData {
    pub count: usize,
    pub total: usize,
    pub percent: u8,
}

impl ProgressData {
    /// Percent complete, rounded. `current` is clamped to `total`, and an
    /// empty batch is 0%.
    pub fn calculate(current: usize, total: usize) -> Self {
        if total == 0 {
            return Self {
                count: 0,
                total: 0,
                percent: 0,
            };
        }

        let count = current.min(total);
        let percent = (count as f64 / total as f64 * 100.0).round() as u8;
        Self {
            count,
            total,
            percent,
        }
    }
}

pub trait ProgressIndicator: Send + Sync {
    /// Values above 100 are clamped.
    fn set_percent(&self, percent: u8);

    /// Show full, then reset to zero after `hold`.
    fn complete(&self, hold: Duration);
}

pub trait LoadingIndicator: Send + Sync {
    fn start(&self);
    fn stop(&self);
}

/// Progress bar state, logged as it changes.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    percent: Arc<AtomicU8>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::SeqCst)
    }
}

impl ProgressIndicator for Progress {
    fn set_percent(&self, percent: u8) {
        let percent = percent.min(100);
        self.percent.store(percent, Ordering::SeqCst);
        tracing::debug!(percent, "Progress");
    }

    fn complete(&self, hold: Duration) {
        self.set_percent(100);

        let percent = self.percent.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(hold).await;
                    percent.store(0, Ordering::SeqCst);
                });
            }
            Err(_) => percent.store(0, Ordering::SeqCst),
        }
    }
}

/// Busy indicator shown while reports load.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    running: Arc<AtomicBool>,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for Spinner {
    fn start(&self) {
        if !self.running.swap(true, Ordering::SeqCst) {
            tracing::info!("Loading reports...");
        }
    }

    fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            tracing::info!("Loading finished");
        }
    }
}
