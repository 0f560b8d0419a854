//! SnapshotBus implementation

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::subscriber::{Slot, SubscriberHandle};
use crate::domain::Snapshot;

/// Fan-out channel from the coordinator to live subscribers
///
/// Each subscriber gets its own `watch` slot; `publish` replaces the slot
/// contents with `send_replace`, which never waits on the receiver.
pub struct SnapshotBus {
    state: Mutex<BusState>,
}

struct BusState {
    slots: Vec<watch::Sender<Slot>>,
    closed: bool,
    published: u64,
}

impl SnapshotBus {
    pub fn new() -> Self {
        debug!("SnapshotBus::new: creating snapshot bus");
        Self {
            state: Mutex::new(BusState {
                slots: Vec::new(),
                closed: false,
                published: 0,
            }),
        }
    }

    /// Deliver a snapshot to every attached subscriber
    ///
    /// Never blocks. Pending undelivered snapshots are overwritten and
    /// subscribers whose handle was dropped are pruned.
    pub fn publish(&self, snapshot: Arc<Snapshot>) {
        let mut state = self.state.lock();
        if state.closed {
            warn!(n = snapshot.n, "SnapshotBus::publish: bus is closed, dropping snapshot");
            return;
        }

        state.slots.retain(|tx| !tx.is_closed());
        for tx in &state.slots {
            tx.send_replace(Some(snapshot.clone()));
        }
        state.published += 1;
        debug!(n = snapshot.n, subscribers = state.slots.len(), "SnapshotBus::publish");
    }

    /// Attach a new subscriber with an empty mailbox
    ///
    /// Subscribing to a closed bus returns a handle that is already at
    /// end-of-stream.
    pub fn subscribe(&self) -> SubscriberHandle {
        let (tx, rx) = watch::channel(None);
        let mut state = self.state.lock();
        if state.closed {
            debug!("SnapshotBus::subscribe: bus closed, returning ended handle");
            // Dropping tx here ends the stream for rx
            return SubscriberHandle::new(rx);
        }

        state.slots.push(tx);
        debug!(subscribers = state.slots.len(), "SnapshotBus::subscribe: new subscriber");
        SubscriberHandle::new(rx)
    }

    /// Mark the bus closed; subscribers see end-of-stream after draining
    ///
    /// Calling this more than once has no further effect.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            debug!("SnapshotBus::close: already closed");
            return;
        }
        state.closed = true;
        let dropped = state.slots.len();
        state.slots.clear();
        info!(subscribers = dropped, published = state.published, "Snapshot bus closed");
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of subscribers whose handle is still alive
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().slots.iter().filter(|tx| !tx.is_closed()).count()
    }

    /// Number of snapshots accepted by `publish`
    pub fn published_count(&self) -> u64 {
        self.state.lock().published
    }
}

impl Default for SnapshotBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a snapshot bus wrapped in an Arc for shared ownership
pub fn create_snapshot_bus() -> Arc<SnapshotBus> {
    Arc::new(SnapshotBus::new())
}
