//! Coordinator for sample accumulation and snapshot cadence
//!
//! A single task owns the classified sets and the running count. Producers
//! hand samples over one FIFO queue; the task applies the cadence policy,
//! renders snapshots and publishes them to the [`SnapshotBus`](crate::bus::SnapshotBus).
//! Finalization is the only shutdown path.

mod cadence;
mod config;
mod core;
mod handle;
mod messages;

pub use cadence::{cadence_step, should_snapshot};
pub use config::CoordinatorConfig;
pub use core::Coordinator;
pub use handle::CoordinatorHandle;
pub use messages::{CoordinatorMetrics, FinalReport, FinalizeOutcome};
