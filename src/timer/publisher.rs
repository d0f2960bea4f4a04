//! Progress publisher

use chrono::Utc;
use tracing::trace;

use super::ReminderSink;
use crate::state::{CountdownState, ProgressSnapshot};

/// Snapshot `state` and hand it to the display.
///
/// With no display attached the snapshot is dropped; that is not an error.
pub fn publish(sink: &dyn ReminderSink, state: &CountdownState) {
    if !sink.has_observer() {
        trace!("No display attached, dropping progress snapshot");
        return;
    }

    let snapshot = ProgressSnapshot::capture(state, Utc::now());
    trace!("Publishing progress {} ({:.1}%)", snapshot.clock(), snapshot.progress_percent);
    sink.publish_progress(&snapshot);
}
