use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotone wall-clock seam used by every time-gated entry point.
///
/// Engines hold an `Arc<dyn Clock>` so that tests can drive schedules
/// deterministically with a [`ManualClock`].
pub trait Clock: std::fmt::Debug + Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now_seconds(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Settable clock for deterministic tests and simulations.
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: AtomicU64,
}

impl ManualClock {
    pub fn new(start_seconds: u64) -> Self {
        Self {
            seconds: AtomicU64::new(start_seconds),
        }
    }

    /// Jump to an absolute timestamp.
    pub fn set(&self, seconds: u64) {
        self.seconds.store(seconds, Ordering::SeqCst);
    }

    /// Advance the clock by `delta` seconds.
    pub fn advance(&self, delta: u64) {
        self.seconds.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> u64 {
        self.seconds.load(Ordering::SeqCst)
    }
}
