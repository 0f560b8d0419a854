//! Render input (Frame) and render output (Snapshot)

use serde::{Deserialize, Serialize};

use super::sample::Sample;
use super::sets::{ClassifiedSets, estimate};

/// Everything a renderer is given for one snapshot
///
/// Borrows the full sets; `cap` bounds how many points of each set are drawn.
/// The estimate always uses the full inner count.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub n: u64,
    pub inner: &'a [Sample],
    pub outer: &'a [Sample],
    pub cap: usize,
    pub is_final: bool,
}

impl<'a> Frame<'a> {
    pub fn from_sets(sets: &'a ClassifiedSets, cap: usize, is_final: bool) -> Self {
        Self {
            n: sets.count(),
            inner: sets.inner(),
            outer: sets.outer(),
            cap,
            is_final,
        }
    }

    /// `4 × |inner| / n` over the full inner set
    pub fn estimate(&self) -> Option<f64> {
        estimate(self.inner.len(), self.n)
    }

    /// Inner points to draw (first `cap`)
    pub fn drawn_inner(&self) -> &'a [Sample] {
        &self.inner[..self.inner.len().min(self.cap)]
    }

    /// Outer points to draw (first `cap`)
    pub fn drawn_outer(&self) -> &'a [Sample] {
        &self.outer[..self.outer.len().min(self.cap)]
    }

    /// Wrap an encoded plot with this frame's metadata
    pub fn snapshot(&self, plot: String) -> Snapshot {
        Snapshot {
            n: self.n,
            estimate: self.estimate(),
            inner: self.inner.len() as u64,
            outer: self.outer.len() as u64,
            is_final: self.is_final,
            plot,
        }
    }
}

/// An immutable rendered snapshot, tagged with the count it was taken at
///
/// Serialized as the WebSocket message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub n: u64,
    #[serde(rename = "pi")]
    pub estimate: Option<f64>,
    pub inner: u64,
    pub outer: u64,
    /// Set only on a snapshot forced by finalize
    ///
    /// When the last sample already hit the cadence no forced render happens,
    /// so the last snapshot of a stream may carry `false`. End-of-stream is
    /// the reliable marker that no more snapshots follow.
    #[serde(rename = "final")]
    pub is_final: bool,
    /// Encoded image (base64 PNG for the default renderer)
    pub plot: String,
}

impl Snapshot {
    /// Human-readable title, e.g. `n = 1000, π = 3.148`
    pub fn title(&self) -> String {
        match self.estimate {
            Some(pi) => format!("n = {}, π = {}", self.n, pi),
            None => format!("n = {}, π = n/a", self.n),
        }
    }
}
