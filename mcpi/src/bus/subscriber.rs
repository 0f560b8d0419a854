//! Subscriber side of the snapshot bus

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;

use crate::domain::Snapshot;

/// Single-slot mailbox contents; `None` until the first publish
pub(crate) type Slot = Option<Arc<Snapshot>>;

/// Result of a non-blocking receive
#[derive(Debug)]
pub enum TryRecv {
    /// A snapshot that had not been seen yet
    Snapshot(Arc<Snapshot>),
    /// Nothing new since the last receive
    Empty,
    /// The bus closed and the mailbox is drained
    Closed,
}

/// A live subscriber attached to a [`SnapshotBus`](super::SnapshotBus)
///
/// Holds at most the newest snapshot not yet received. Dropping the handle
/// detaches it from the bus.
pub struct SubscriberHandle {
    rx: watch::Receiver<Slot>,
}

impl SubscriberHandle {
    pub(crate) fn new(rx: watch::Receiver<Slot>) -> Self {
        Self { rx }
    }

    /// Wait for the next snapshot
    ///
    /// Returns `None` once the bus is closed and nothing is pending.
    pub async fn recv(&mut self) -> Option<Arc<Snapshot>> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(snapshot) = self.rx.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
    }

    /// Take the pending snapshot without waiting
    pub fn try_recv(&mut self) -> TryRecv {
        // `changed()` resolves immediately when a value is pending or the
        // sender is gone, and stays pending otherwise.
        match self.rx.changed().now_or_never() {
            Some(Ok(())) => match self.rx.borrow_and_update().clone() {
                Some(snapshot) => TryRecv::Snapshot(snapshot),
                None => TryRecv::Empty,
            },
            Some(Err(_)) => TryRecv::Closed,
            None => TryRecv::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_recv_empty_then_closed() {
        let (tx, rx) = watch::channel(None);
        let mut handle = SubscriberHandle::new(rx);

        assert!(matches!(handle.try_recv(), TryRecv::Empty));
        drop(tx);
        assert!(matches!(handle.try_recv(), TryRecv::Closed));
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_sender_dropped() {
        let (tx, rx) = watch::channel(None);
        let mut handle = SubscriberHandle::new(rx);
        drop(tx);
        assert!(handle.recv().await.is_none());
    }
}
