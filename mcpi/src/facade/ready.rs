//! One-shot readiness rendezvous between the transport and the facade

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{McpiError, Result};

/// Create a connected trigger/waiter pair
pub fn ready_signal() -> (ReadyTrigger, ReadyWaiter) {
    let (tx, rx) = oneshot::channel();
    (
        ReadyTrigger {
            tx: Arc::new(Mutex::new(Some(tx))),
        },
        ReadyWaiter { rx: Some(rx) },
    )
}

/// Fires readiness at most once; cheap to clone into request handlers
#[derive(Clone)]
pub struct ReadyTrigger {
    tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl ReadyTrigger {
    /// Signal readiness; returns true only for the call that fired
    pub fn fire(&self) -> bool {
        match self.tx.lock().take() {
            Some(tx) => {
                debug!("ReadyTrigger::fire: signalling ready");
                // The waiter may already be gone, that is fine
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }

    pub fn is_fired(&self) -> bool {
        self.tx.lock().is_none()
    }
}

/// Waits for the matching [`ReadyTrigger`] to fire
pub struct ReadyWaiter {
    rx: Option<oneshot::Receiver<()>>,
}

impl ReadyWaiter {
    /// Suspend until ready; returns immediately once it has been observed
    pub async fn wait(&mut self) -> Result<()> {
        let Some(rx) = self.rx.as_mut() else {
            return Ok(());
        };
        rx.await.map_err(|_| McpiError::ReadySignalDropped)?;
        self.rx = None;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.rx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fire_before_wait() {
        let (trigger, mut waiter) = ready_signal();

        assert!(trigger.fire());
        assert!(!trigger.fire());
        assert!(trigger.is_fired());

        waiter.wait().await.unwrap();
        assert!(waiter.is_ready());
        // Subsequent waits return immediately
        waiter.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_blocks_until_fired() {
        let (trigger, mut waiter) = ready_signal();

        let pending = tokio::time::timeout(Duration::from_millis(50), waiter.wait()).await;
        assert!(pending.is_err());

        let remote = trigger.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            remote.fire();
        });

        waiter.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_trigger_errors() {
        let (trigger, mut waiter) = ready_signal();
        drop(trigger);

        assert!(matches!(waiter.wait().await, Err(McpiError::ReadySignalDropped)));
    }
}
