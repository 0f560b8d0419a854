//! mcpi - live Monte-Carlo estimate of pi
//!
//! Random points are classified against the unit quarter circle while a
//! single coordinator task accumulates them, decides when a new plot is worth
//! rendering, and pushes each plot to every connected viewer.
//!
//! # Modules
//!
//! - [`domain`] - samples, classifier, classified sets, snapshots
//! - [`coordinator`] - the single-owner accumulation task and cadence policy
//! - [`bus`] - newest-wins fan-out to subscribers
//! - [`render`] - renderer trait and the PNG scatter plot
//! - [`server`] - HTTP page and snapshot WebSocket
//! - [`facade`] - `wait_ready` / `plot` / `quit`
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod bus;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod facade;
pub mod render;
pub mod server;

// Re-export commonly used types
pub use bus::{SnapshotBus, SubscriberHandle, TryRecv, create_snapshot_bus};
pub use config::Config;
pub use coordinator::{
    Coordinator, CoordinatorConfig, CoordinatorHandle, CoordinatorMetrics, FinalReport, FinalizeOutcome,
    cadence_step, should_snapshot,
};
pub use domain::{Class, ClassifiedSets, Frame, Sample, Snapshot, classify};
pub use error::{McpiError, Result};
pub use facade::{IngestFacade, QuitSummary, ReadyTrigger, ReadyWaiter, ready_signal};
pub use render::{PngRenderer, RenderConfig, RenderError, SnapshotRenderer};
pub use server::{ServerConfig, ServerHandle, start_server};
