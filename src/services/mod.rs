//! Collaborators around the countdown engine
//!
//! Desktop notifications, the progress channel observed by displays, the
//! persisted settings file and login autostart registration.

pub mod autostart;
pub mod display;
pub mod notification;
pub mod settings;
pub mod sink;

// Re-export main types
pub use autostart::Autostart;
pub use display::ProgressChannel;
pub use notification::{NotificationQueue, Notifier};
pub use settings::{Settings, SettingsStore, SettingsUpdate};
pub use sink::AppSink;
