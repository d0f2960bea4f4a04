//! Notification dispatcher

use tracing::debug;

use super::ReminderSink;
use crate::error::EngineError;

/// Deliver one reminder carrying `message`
pub fn dispatch(sink: &dyn ReminderSink, message: &str) -> Result<(), EngineError> {
    debug!("Dispatching reminder: {}", message);
    if sink.deliver_notification(message) {
        Ok(())
    } else {
        Err(EngineError::NotificationUnavailable)
    }
}
