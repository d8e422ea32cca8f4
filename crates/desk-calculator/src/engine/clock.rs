//! Time sources for the error-recovery deadline

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary origin
pub trait Clock: std::fmt::Debug {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall-clock time based on [`Instant`]
///
/// Not usable on `wasm32-unknown-unknown`; the browser binding brings its own.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Starts a clock at the current instant
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for deterministic tests
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock stopped at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    /// Moves time forward
    pub fn advance(&self, duration: Duration) {
        self.advance_ms(duration.as_millis() as u64);
    }

    /// Moves time forward by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jumps to an absolute time
    pub fn set_ms(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms())
    }
}
