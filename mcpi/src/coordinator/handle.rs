//! CoordinatorHandle - client interface for submitting samples

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::messages::{CoordRequest, CoordinatorMetrics, FinalizeOutcome};
use crate::domain::Sample;
use crate::error::{McpiError, Result};

/// Handle for producers to interact with the Coordinator
///
/// Cloneable; every clone feeds the same FIFO queue.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<CoordRequest>,
}

impl CoordinatorHandle {
    pub(crate) fn new(tx: mpsc::Sender<CoordRequest>) -> Self {
        Self { tx }
    }

    /// Queue a sample; returns once it is enqueued, not processed
    pub async fn submit(&self, sample: Sample) -> Result<()> {
        self.tx
            .send(CoordRequest::Submit { sample })
            .await
            .map_err(|_| McpiError::CoordinatorClosed)
    }

    /// Queue a sample from a thread outside the async runtime
    ///
    /// Panics if called from within an async context, like
    /// [`mpsc::Sender::blocking_send`].
    pub fn blocking_submit(&self, sample: Sample) -> Result<()> {
        self.tx
            .blocking_send(CoordRequest::Submit { sample })
            .map_err(|_| McpiError::CoordinatorClosed)
    }

    /// Ask the Coordinator to finalize and wait until it has
    ///
    /// Every request queued before this one is processed first.
    pub async fn finalize(&self) -> Result<FinalizeOutcome> {
        debug!("CoordinatorHandle::finalize: called");
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(CoordRequest::Finalize { reply_tx })
            .await
            .map_err(|_| McpiError::CoordinatorClosed)?;

        debug!("CoordinatorHandle::finalize: waiting for reply");
        reply_rx.await.map_err(|_| McpiError::NoReply)
    }

    /// Get current coordinator metrics
    pub async fn metrics(&self) -> Result<CoordinatorMetrics> {
        debug!("CoordinatorHandle::metrics: called");
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send(CoordRequest::GetMetrics { reply_tx })
            .await
            .map_err(|_| McpiError::CoordinatorClosed)?;

        reply_rx.await.map_err(|_| McpiError::NoReply)
    }

    /// Whether the Coordinator has stopped accepting requests
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_enqueues_request() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx);

        handle.submit(Sample::new(0.25, 0.75)).await.unwrap();

        match rx.recv().await.unwrap() {
            CoordRequest::Submit { sample } => assert_eq!(sample, Sample::new(0.25, 0.75)),
            other => panic!("Wrong request: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_closed_channel() {
        let (tx, rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx);
        drop(rx);

        assert!(handle.is_closed());
        assert!(matches!(
            handle.submit(Sample::new(0.0, 0.0)).await,
            Err(McpiError::CoordinatorClosed)
        ));
        assert!(matches!(handle.finalize().await, Err(McpiError::CoordinatorClosed)));
        assert!(matches!(handle.metrics().await, Err(McpiError::CoordinatorClosed)));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_no_reply() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx);

        let responder = tokio::spawn(async move {
            // Drop the reply sender without answering
            let _ = rx.recv().await;
        });

        assert!(matches!(handle.metrics().await, Err(McpiError::NoReply)));
        responder.await.unwrap();
    }

    #[test]
    fn test_blocking_submit_outside_runtime() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx);

        let producer = std::thread::spawn(move || handle.blocking_submit(Sample::new(1.0, 2.0)));
        producer.join().unwrap().unwrap();

        assert!(matches!(rx.try_recv(), Ok(CoordRequest::Submit { .. })));
    }
}
