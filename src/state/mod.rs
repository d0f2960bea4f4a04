//! State management module
//!
//! This module contains the countdown state, its progress snapshot and the
//! shared application state handed to the HTTP layer.

pub mod app_state;
pub mod countdown_state;
pub mod progress;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::{CountdownState, CountdownStateView};
pub use progress::ProgressSnapshot;
