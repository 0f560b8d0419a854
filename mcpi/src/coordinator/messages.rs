//! Message types for the Coordinator

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::domain::Sample;

/// Internal requests to the Coordinator task
#[derive(Debug)]
pub(crate) enum CoordRequest {
    /// Accept one sample
    Submit { sample: Sample },

    /// Force a final snapshot, close the bus and stop
    Finalize {
        reply_tx: oneshot::Sender<FinalizeOutcome>,
    },

    /// Get current metrics
    GetMetrics {
        reply_tx: oneshot::Sender<CoordinatorMetrics>,
    },
}

/// Terminal state reported by finalize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub n: u64,
    pub inner: u64,
    pub outer: u64,
    #[serde(rename = "pi")]
    pub estimate: Option<f64>,
}

/// Result of a finalize request
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    /// This call performed the finalization
    Completed(FinalReport),
    /// An earlier call already finalized; nothing was changed
    AlreadyFinalized(FinalReport),
}

impl FinalizeOutcome {
    pub fn report(&self) -> &FinalReport {
        match self {
            Self::Completed(report) | Self::AlreadyFinalized(report) => report,
        }
    }
}

/// Coordinator metrics for observability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorMetrics {
    pub samples: u64,
    pub inner: u64,
    pub outer: u64,
    pub render_calls: u64,
    pub render_failures: u64,
    pub snapshots_published: u64,
    pub ignored_after_finalize: u64,
    pub subscribers: usize,
    pub finalized: bool,
}
