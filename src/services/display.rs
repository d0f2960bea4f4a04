//! Progress channel feeding display observers

use std::sync::Arc;
use tokio::sync::watch;

use crate::state::ProgressSnapshot;

/// Latest progress snapshot, shared with whoever is watching the timer
#[derive(Debug, Clone)]
pub struct ProgressChannel {
    tx: Arc<watch::Sender<Option<ProgressSnapshot>>>,
}

impl ProgressChannel {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Attach a display
    pub fn subscribe(&self) -> watch::Receiver<Option<ProgressSnapshot>> {
        self.tx.subscribe()
    }

    pub fn has_observer(&self) -> bool {
        self.tx.receiver_count() > 0
    }

    pub fn publish(&self, snapshot: &ProgressSnapshot) {
        self.tx.send_replace(Some(snapshot.clone()));
    }
}

impl Default for ProgressChannel {
    fn default() -> Self {
        Self::new()
    }
}
