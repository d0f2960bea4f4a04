//! Countdown engine: the repeating reminder state machine
//!
//! ```text
//! Stopped --start--> Running --tick--> Running (notify + reset at zero)
//!    ^                  |
//!    +-------stop-------+
//! ```
//!
//! Every transition runs under one lock, so ticks, `start` and `stop` never
//! interleave on the state.

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};
use tracing::{debug, error, info, warn};

use super::{dispatcher, publisher, ReminderSink, TickHandle, TickScheduler};
use crate::{
    error::EngineError,
    state::{CountdownState, CountdownStateView},
};

/// Period between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owner of the single countdown state
pub struct CountdownEngine {
    state: Mutex<CountdownState>,
    sink: Arc<dyn ReminderSink>,
    scheduler: Arc<dyn TickScheduler>,
    /// Handed to tick callbacks so a dropped engine ends its ticks quietly
    this: Weak<CountdownEngine>,
}

impl CountdownEngine {
    /// Create a stopped engine wired to its collaborators
    pub fn new(sink: Arc<dyn ReminderSink>, scheduler: Arc<dyn TickScheduler>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            state: Mutex::new(CountdownState::new()),
            sink,
            scheduler,
            this: this.clone(),
        })
    }

    /// Begin a repeating cycle of `interval_minutes`, reminding with `message`
    pub fn start(&self, interval_minutes: u32, message: &str) -> Result<(), EngineError> {
        if interval_minutes == 0 {
            return Err(EngineError::InvalidInterval {
                value: 0,
                min: 1,
                max: u64::from(u32::MAX),
            });
        }
        if message.trim().is_empty() {
            return Err(EngineError::EmptyMessage);
        }

        let mut state = self.lock()?;
        if state.running {
            warn!("Start rejected, a countdown is already running");
            return Err(EngineError::AlreadyRunning);
        }

        let total_seconds = u64::from(interval_minutes) * 60;
        let engine = self.this.clone();
        let handle = self.scheduler.register(
            TICK_PERIOD,
            Arc::new(move |handle: TickHandle| {
                if let Some(engine) = engine.upgrade() {
                    engine.on_tick(handle);
                }
            }),
        );

        state.begin(total_seconds, message.to_string(), handle);
        info!(
            "Countdown started: {} minutes ({}), message={:?}",
            interval_minutes, handle, message
        );

        publisher::publish(self.sink.as_ref(), &state);
        Ok(())
    }

    /// Stop the countdown. Stopping a stopped engine succeeds.
    pub fn stop(&self) -> Result<(), EngineError> {
        let mut state = self.lock()?;
        match state.halt() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                info!("Countdown stopped ({})", handle);
            }
            None => debug!("Stop requested while already stopped"),
        }
        Ok(())
    }

    pub fn status(&self) -> Result<CountdownStateView, EngineError> {
        Ok(self.lock()?.view())
    }

    fn on_tick(&self, handle: TickHandle) {
        let mut state = match self.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("Dropping tick: {}", e);
                return;
            }
        };

        if !state.is_current(handle) {
            debug!("Ignoring stale {}", handle);
            return;
        }

        state.remaining_seconds = state.remaining_seconds.saturating_sub(1);
        publisher::publish(self.sink.as_ref(), &state);

        if state.remaining_seconds == 0 {
            info!("Cycle complete, sending reminder");
            if let Err(e) = dispatcher::dispatch(self.sink.as_ref(), &state.message) {
                warn!("{}, countdown continues", e);
            }
            state.remaining_seconds = state.total_seconds;
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, CountdownState>, EngineError> {
        self.state
            .lock()
            .map_err(|e| EngineError::StateLock(e.to_string()))
    }
}

impl std::fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
