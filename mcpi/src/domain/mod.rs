//! Domain types for mcpi
//!
//! Samples and their classification, the two append-only classified sets,
//! and the immutable snapshot produced from them.

mod sample;
mod sets;
mod snapshot;

pub use sample::{Class, Sample, classify};
pub use sets::ClassifiedSets;
pub use snapshot::{Frame, Snapshot};
