//! Desktop reminder notifications
//!
//! Showing a desktop notification is a blocking D-Bus round trip, so reminders
//! are queued to a background task that shows them on the blocking pool.

use std::sync::Arc;
use notify_rust::Notification;
use tokio::{runtime::Handle, sync::mpsc, task};
use tracing::{debug, error, info, warn};

const TITLE: &str = "👁️ Eye Care Reminder";
const APP_NAME: &str = "blink-now";

/// How reminders reach the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notifier {
    /// Native desktop notification
    Desktop,
    /// Log line only, for headless sessions
    LogOnly,
}

impl Notifier {
    /// Show `message` as a reminder, returning whether it was delivered.
    /// Blocks on the notification daemon for `Desktop`.
    pub fn show(&self, message: &str) -> bool {
        match self {
            Notifier::Desktop => show_desktop(TITLE, message),
            Notifier::LogOnly => {
                info!("Reminder: {}", message);
                true
            }
        }
    }
}

fn show_desktop(title: &str, body: &str) -> bool {
    match Notification::new()
        .appname(APP_NAME)
        .summary(title)
        .body(body)
        .show()
    {
        Ok(_) => true,
        Err(e) => {
            error!("Failed to show notification: {}", e);
            false
        }
    }
}

/// Blocking delivery function run by the notification task
pub type Deliver = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Hands reminders to a background task without waiting for delivery
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<String>,
}

impl NotificationQueue {
    /// Spawn the notification task for `notifier` on `runtime`
    pub fn spawn(notifier: Notifier, runtime: &Handle) -> Self {
        Self::spawn_with(runtime, Arc::new(move |message: &str| notifier.show(message)))
    }

    /// Spawn the notification task around an arbitrary blocking `deliver`
    pub fn spawn_with(runtime: &Handle, deliver: Deliver) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(notification_task(rx, deliver));
        Self { tx }
    }

    /// Queue `message`; returns false only when the notification task is gone
    pub fn enqueue(&self, message: &str) -> bool {
        match self.tx.send(message.to_string()) {
            Ok(()) => true,
            Err(_) => {
                warn!("Notification task has stopped, reminder dropped");
                false
            }
        }
    }
}

async fn notification_task(mut rx: mpsc::UnboundedReceiver<String>, deliver: Deliver) {
    debug!("Starting notification task");

    while let Some(message) = rx.recv().await {
        let deliver = Arc::clone(&deliver);
        match task::spawn_blocking(move || deliver(&message)).await {
            Ok(true) => debug!("Reminder delivered"),
            Ok(false) => warn!("Reminder could not be delivered"),
            Err(e) => warn!("Notification worker failed: {}", e),
        }
    }

    debug!("Notification task finished");
}
