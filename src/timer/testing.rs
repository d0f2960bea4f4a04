//! In-memory collaborators for driving the engine by hand

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Duration,
};

use super::{ReminderSink, TickCallback, TickHandle, TickScheduler};
use crate::state::ProgressSnapshot;

#[derive(Default)]
struct Registrations {
    active: Vec<(TickHandle, TickCallback)>,
    retired: Vec<(TickHandle, TickCallback)>,
    registered: Vec<TickHandle>,
    last_period: Option<Duration>,
}

/// Tick scheduler whose ticks are fired explicitly by the test
#[derive(Default)]
pub struct ManualTicker {
    inner: Mutex<Registrations>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire one tick on every active registration
    pub fn tick(&self) {
        let callbacks: Vec<(TickHandle, TickCallback)> = self.inner.lock().unwrap().active.clone();
        for (handle, callback) in callbacks {
            callback(handle);
        }
    }

    pub fn tick_n(&self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Invoke a cancelled registration, as if its tick was already in flight
    pub fn fire_retired(&self, handle: TickHandle) {
        let callback = self
            .inner
            .lock()
            .unwrap()
            .retired
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, cb)| cb.clone());
        if let Some(callback) = callback {
            callback(handle);
        }
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().unwrap().active.len()
    }

    pub fn cancelled_count(&self) -> usize {
        self.inner.lock().unwrap().retired.len()
    }

    /// Every handle ever handed out, in registration order
    pub fn handles(&self) -> Vec<TickHandle> {
        self.inner.lock().unwrap().registered.clone()
    }

    pub fn last_period(&self) -> Option<Duration> {
        self.inner.lock().unwrap().last_period
    }
}

impl TickScheduler for ManualTicker {
    fn register(&self, period: Duration, callback: TickCallback) -> TickHandle {
        let handle = TickHandle::next();
        let mut inner = self.inner.lock().unwrap();
        inner.active.push((handle, callback));
        inner.registered.push(handle);
        inner.last_period = Some(period);
        handle
    }

    fn cancel(&self, handle: TickHandle) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(pos) = inner.active.iter().position(|(h, _)| *h == handle) {
            let entry = inner.active.remove(pos);
            inner.retired.push(entry);
        }
    }
}

/// Sink that records everything the engine sends it
#[derive(Default)]
pub struct RecordingSink {
    snapshots: Mutex<Vec<ProgressSnapshot>>,
    notifications: Mutex<Vec<String>>,
    failing: AtomicBool,
    detached: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<ProgressSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    /// Every delivery attempt, including failed ones
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    /// Make subsequent deliveries report failure
    pub fn fail_notifications(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn detach_display(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn attach_display(&self) {
        self.detached.store(false, Ordering::SeqCst);
    }
}

impl ReminderSink for RecordingSink {
    fn deliver_notification(&self, message: &str) -> bool {
        self.notifications.lock().unwrap().push(message.to_string());
        !self.failing.load(Ordering::SeqCst)
    }

    fn publish_progress(&self, snapshot: &ProgressSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }

    fn has_observer(&self) -> bool {
        !self.detached.load(Ordering::SeqCst)
    }
}
