//! Countdown timer core
//!
//! The engine owns the countdown state and is driven by a [`TickScheduler`].
//! Every tick publishes a progress snapshot; every completed cycle dispatches
//! exactly one reminder through the [`ReminderSink`].

pub mod dispatcher;
pub mod engine;
pub mod publisher;
pub mod sink;
pub mod tick;

#[cfg(any(test, feature = "testing-support"))]
pub mod testing;

// Re-export main types
pub use engine::{CountdownEngine, TICK_PERIOD};
pub use sink::ReminderSink;
pub use tick::{TickCallback, TickHandle, TickScheduler};
