//! Clock implementations.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use strictly_tictactoe::Timestamp;
use tracing::debug;

use crate::ports::Clock;

/// Wall clock in Unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Hand-driven clock. Clones share one time source, so a test can keep a
/// handle while the registry owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        let now = self.now.fetch_add(secs, Ordering::SeqCst) + secs;
        debug!(now, "Manual clock advanced");
    }

    /// Sets the clock, never moving it backwards.
    pub fn set(&self, at: Timestamp) {
        self.now.fetch_max(at, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
