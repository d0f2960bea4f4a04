//! Outbound collaborator interface of the countdown engine

use crate::state::ProgressSnapshot;

/// Receives reminders and progress updates from the engine.
///
/// Both methods are called while the engine holds its state lock, so
/// implementations must return promptly and must not call back into the engine.
pub trait ReminderSink: Send + Sync {
    /// Show the reminder; returns whether it was delivered
    fn deliver_notification(&self, message: &str) -> bool;

    /// Push a progress snapshot to the display
    fn publish_progress(&self, snapshot: &ProgressSnapshot);

    /// Whether any display is currently listening for progress
    fn has_observer(&self) -> bool {
        true
    }
}
