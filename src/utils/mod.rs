//! Process utilities
//!
//! Signal handling used by the binary to stop the reminder before exiting.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
