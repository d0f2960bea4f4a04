//! Periodic tick registration seam

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

/// Callback invoked once per elapsed period with the handle it was registered under
pub type TickCallback = Arc<dyn Fn(TickHandle) + Send + Sync>;

/// Cancellation token for one periodic tick registration.
///
/// Handles are never reused: every registration gets a fresh id, so a stale
/// handle can always be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Allocate a process-unique handle
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Scheduling primitive driving the countdown engine
pub trait TickScheduler: Send + Sync {
    /// Start invoking `callback` once per `period` until cancelled
    fn register(&self, period: Duration, callback: TickCallback) -> TickHandle;

    /// Stop the registration; no callback for `handle` may start after this returns
    fn cancel(&self, handle: TickHandle);
}
