//! BlinkNow - An eye care reminder service
//!
//! A repeating countdown interrupts the user with a desktop notification
//! every few minutes. Displays follow the countdown through a progress
//! stream and drive it through a small command surface.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use commands::{CommandResult, CommandSurface, IntervalBounds};
pub use config::Config;
pub use error::{EngineError, SettingsError};
pub use state::{AppState, CountdownStateView, ProgressSnapshot};
pub use timer::{CountdownEngine, ReminderSink, TickScheduler};
pub use utils::signals::shutdown_signal;
