//! Background tasks module
//!
//! This module contains the tokio tasks that drive the countdown alongside
//! the HTTP server.

pub mod ticker;

// Re-export main types
pub use ticker::TokioTicker;
