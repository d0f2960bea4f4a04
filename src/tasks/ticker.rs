//! Tokio-driven tick scheduler

use std::{
    collections::HashMap,
    sync::Mutex,
    time::Duration,
};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error};

use crate::timer::{TickCallback, TickHandle, TickScheduler};

/// Runs each registration as a tokio task ticking on an interval
#[derive(Debug)]
pub struct TokioTicker {
    runtime: Handle,
    tasks: Mutex<HashMap<TickHandle, JoinHandle<()>>>,
}

impl TokioTicker {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    pub fn active_count(&self) -> usize {
        self.tasks.lock().map(|tasks| tasks.len()).unwrap_or(0)
    }
}

impl TickScheduler for TokioTicker {
    fn register(&self, period: Duration, callback: TickCallback) -> TickHandle {
        let handle = TickHandle::next();

        let task = self.runtime.spawn(async move {
            // First tick one full period after registration
            let mut interval = interval_at(Instant::now() + period, period);
            // After a stall, resume one period apart instead of bursting
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                callback(handle);
            }
        });

        match self.tasks.lock() {
            Ok(mut tasks) => {
                tasks.insert(handle, task);
                debug!("Registered {} every {:?}", handle, period);
            }
            Err(e) => {
                error!("Failed to track {}: {}", handle, e);
                task.abort();
            }
        }
        handle
    }

    fn cancel(&self, handle: TickHandle) {
        let task = match self.tasks.lock() {
            Ok(mut tasks) => tasks.remove(&handle),
            Err(e) => {
                error!("Failed to cancel {}: {}", handle, e);
                return;
            }
        };
        if let Some(task) = task {
            task.abort();
            debug!("Cancelled {}", handle);
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        if let Ok(tasks) = self.tasks.get_mut() {
            for (_, task) in tasks.drain() {
                task.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tokio::time::sleep;

    fn counter() -> (Arc<AtomicUsize>, TickCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let callback: TickCallback = Arc::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, callback)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_until_cancelled() {
        let ticker = TokioTicker::new(Handle::current());
        let (count, callback) = counter();

        let handle = ticker.register(Duration::from_secs(1), callback);
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        ticker.cancel(handle);
        assert_eq!(ticker.active_count(), 0);
        sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_before_first_period() {
        let ticker = TokioTicker::new(Handle::current());
        let (count, callback) = counter();

        ticker.register(Duration::from_secs(1), callback);
        sleep(Duration::from_millis(900)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_one_registration_leaves_others() {
        let ticker = TokioTicker::new(Handle::current());
        let (first_count, first) = counter();
        let (second_count, second) = counter();

        let first_handle = ticker.register(Duration::from_secs(1), first);
        ticker.register(Duration::from_secs(1), second);
        ticker.cancel(first_handle);
        sleep(Duration::from_millis(2500)).await;

        assert_eq!(first_count.load(Ordering::SeqCst), 0);
        assert_eq!(second_count.load(Ordering::SeqCst), 2);
    }
}
