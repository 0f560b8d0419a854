//! Snapshot Bus - fan-out delivery of rendered snapshots to live viewers
//!
//! Every subscriber owns a single-slot mailbox. Publishing overwrites the slot
//! instead of queueing, so a slow viewer only ever misses intermediate
//! snapshots and never holds up the coordinator.
//!
//! ```text
//!                 ┌──────────────┐
//!  Coordinator ──▶│ SnapshotBus  │── slot ──▶ viewer 1
//!   publish()     │              │── slot ──▶ viewer 2
//!                 └──────────────┘── slot ──▶ viewer N
//! ```
//!
//! Subscribers that attach late only see snapshots published afterwards.
//! After `close()` each subscriber drains its pending snapshot, if any, and
//! then observes end-of-stream.

mod bus;
mod subscriber;

pub use bus::{SnapshotBus, create_snapshot_bus};
pub use subscriber::{SubscriberHandle, TryRecv};
