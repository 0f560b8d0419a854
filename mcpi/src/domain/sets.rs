//! Append-only classified sample sets

use super::sample::{Class, Sample};

/// The two classified sets and the running count
///
/// Samples are only ever appended. Every accepted sample lands in exactly one
/// set, so `inner().len() + outer().len() == count()` always holds.
#[derive(Debug, Default)]
pub struct ClassifiedSets {
    inner: Vec<Sample>,
    outer: Vec<Sample>,
    count: u64,
}

impl ClassifiedSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size both sets
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
            outer: Vec::with_capacity(capacity),
            count: 0,
        }
    }

    /// Classify and append a sample, returning its class and the new count
    pub fn push(&mut self, sample: Sample) -> (Class, u64) {
        let class = sample.class();
        match class {
            Class::Inner => self.inner.push(sample),
            Class::Outer => self.outer.push(sample),
        }
        self.count += 1;
        (class, self.count)
    }

    /// Running submission count `n`
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn inner(&self) -> &[Sample] {
        &self.inner
    }

    pub fn outer(&self) -> &[Sample] {
        &self.outer
    }

    /// `4 × |inner| / n`, or `None` before the first sample
    pub fn estimate(&self) -> Option<f64> {
        estimate(self.inner.len(), self.count)
    }
}

pub(crate) fn estimate(inner: usize, n: u64) -> Option<f64> {
    if n == 0 {
        return None;
    }
    Some(4.0 * inner as f64 / n as f64)
}
