//! Command surface: validated start/stop/status over the countdown engine

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::EngineError,
    state::CountdownStateView,
    timer::CountdownEngine,
};

/// Longest reminder message accepted from callers, in characters
pub const MAX_MESSAGE_CHARS: usize = 200;

/// Inclusive range of accepted intervals, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalBounds {
    pub min: u64,
    pub max: u64,
}

impl Default for IntervalBounds {
    fn default() -> Self {
        Self { min: 1, max: 120 }
    }
}

impl IntervalBounds {
    /// Check `interval` against the bounds, returning it as whole minutes.
    /// A lower bound of zero is treated as one.
    pub fn check(&self, interval: i64) -> Result<u32, EngineError> {
        let min = self.min.max(1);
        u64::try_from(interval)
            .ok()
            .filter(|minutes| (min..=self.max).contains(minutes))
            .and_then(|minutes| u32::try_from(minutes).ok())
            .ok_or(EngineError::InvalidInterval {
                value: interval,
                min,
                max: self.max,
            })
    }
}

/// Trim `message` and check it is non-empty and at most [`MAX_MESSAGE_CHARS`] long
pub fn validate_message(message: &str) -> Result<&str, EngineError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(EngineError::EmptyMessage);
    }
    let len = message.chars().count();
    if len > MAX_MESSAGE_CHARS {
        return Err(EngineError::MessageTooLong { len, max: MAX_MESSAGE_CHARS });
    }
    Ok(message)
}

/// Uniform result envelope returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<(), EngineError>> for CommandResult {
    fn from(result: Result<(), EngineError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::failed(e),
        }
    }
}

/// Synchronous façade in front of one engine
#[derive(Debug, Clone)]
pub struct CommandSurface {
    engine: Arc<CountdownEngine>,
    bounds: IntervalBounds,
}

impl CommandSurface {
    pub fn new(engine: Arc<CountdownEngine>, bounds: IntervalBounds) -> Self {
        Self { engine, bounds }
    }

    pub fn bounds(&self) -> IntervalBounds {
        self.bounds
    }

    /// Check caller input, returning the interval and trimmed message to start with
    pub fn validate<'a>(
        &self,
        interval: i64,
        message: &'a str,
    ) -> Result<(u32, &'a str), EngineError> {
        Ok((self.bounds.check(interval)?, validate_message(message)?))
    }

    /// Start a repeating reminder every `interval` minutes
    pub fn start(&self, interval: i64, message: &str) -> CommandResult {
        self.try_start(interval, message).into()
    }

    /// Like [`CommandSurface::start`], keeping the typed error
    pub fn try_start(&self, interval: i64, message: &str) -> Result<(), EngineError> {
        let result = self
            .validate(interval, message)
            .and_then(|(minutes, message)| self.engine.start(minutes, message));

        match &result {
            Ok(()) => info!("Start command accepted: {} minutes", interval),
            Err(e) => warn!("Start command rejected: {}", e),
        }
        result
    }

    pub fn stop(&self) -> CommandResult {
        self.engine.stop().into()
    }

    pub fn status(&self) -> Result<CountdownStateView, EngineError> {
        self.engine.status()
    }
}
