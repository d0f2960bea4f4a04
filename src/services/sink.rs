//! Production reminder sink: notification queue plus progress channel

use crate::{
    state::ProgressSnapshot,
    timer::ReminderSink,
};
use super::{NotificationQueue, ProgressChannel};

#[derive(Debug, Clone)]
pub struct AppSink {
    notifications: NotificationQueue,
    display: ProgressChannel,
}

impl AppSink {
    pub fn new(notifications: NotificationQueue, display: ProgressChannel) -> Self {
        Self { notifications, display }
    }
}

impl ReminderSink for AppSink {
    /// Queues the reminder; delivery failures are logged by the notification task
    fn deliver_notification(&self, message: &str) -> bool {
        self.notifications.enqueue(message)
    }

    fn publish_progress(&self, snapshot: &ProgressSnapshot) {
        self.display.publish(snapshot);
    }

    fn has_observer(&self) -> bool {
        self.display.has_observer()
    }
}
