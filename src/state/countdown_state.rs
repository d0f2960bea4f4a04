//! Countdown state structure and its view

use serde::{Deserialize, Serialize};

use crate::timer::TickHandle;

/// Mutable countdown state, owned exclusively by the countdown engine
#[derive(Debug, Clone, Default)]
pub struct CountdownState {
    pub(crate) total_seconds: u64,
    pub(crate) remaining_seconds: u64,
    pub(crate) message: String,
    pub(crate) running: bool,
    pub(crate) tick_handle: Option<TickHandle>,
}

impl CountdownState {
    /// Create a stopped state with no cycle configured yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialize for a fresh cycle
    pub(crate) fn begin(&mut self, total_seconds: u64, message: String, handle: TickHandle) {
        self.total_seconds = total_seconds;
        self.remaining_seconds = total_seconds;
        self.message = message;
        self.running = true;
        self.tick_handle = Some(handle);
    }

    /// Clear to the stopped invariant, keeping total and message for inspection.
    /// Returns the registration that has to be cancelled, if any.
    pub(crate) fn halt(&mut self) -> Option<TickHandle> {
        self.running = false;
        self.remaining_seconds = 0;
        self.tick_handle.take()
    }

    /// Whether `handle` is the live registration for this state
    pub(crate) fn is_current(&self, handle: TickHandle) -> bool {
        self.running && self.tick_handle == Some(handle)
    }

    pub fn view(&self) -> CountdownStateView {
        CountdownStateView {
            running: self.running,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            message: self.message.clone(),
        }
    }
}

/// Read-only copy of the countdown state returned by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownStateView {
    pub running: bool,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub message: String,
}
