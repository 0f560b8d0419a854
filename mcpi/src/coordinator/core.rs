//! Main Coordinator task implementation

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::cadence::should_snapshot;
use super::config::CoordinatorConfig;
use super::handle::CoordinatorHandle;
use super::messages::{CoordRequest, CoordinatorMetrics, FinalReport, FinalizeOutcome};
use crate::bus::SnapshotBus;
use crate::domain::{ClassifiedSets, Frame, Sample};
use crate::render::SnapshotRenderer;

/// The Coordinator owns the sample sets and decides when to snapshot
///
/// `submit` and `finalize` can be driven directly, but the normal mode is
/// `run`, which serializes every request arriving through handles onto one
/// task.
pub struct Coordinator {
    tx: mpsc::Sender<CoordRequest>,
    rx: mpsc::Receiver<CoordRequest>,
    state: CoordinatorState,
}

/// Mutable state, only ever touched by the owning task
struct CoordinatorState {
    config: CoordinatorConfig,
    renderer: Arc<dyn SnapshotRenderer>,
    bus: Arc<SnapshotBus>,
    sets: ClassifiedSets,
    /// Count of the last snapshot that reached the bus
    last_published: Option<u64>,
    finalized: bool,
    metrics: CoordinatorMetrics,
}

impl Coordinator {
    /// Create a new Coordinator publishing to `bus`
    pub fn new(config: CoordinatorConfig, renderer: Arc<dyn SnapshotRenderer>, bus: Arc<SnapshotBus>) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_buffer.max(1));
        let sets = ClassifiedSets::with_capacity(config.initial_capacity);
        Self {
            tx,
            rx,
            state: CoordinatorState {
                config,
                renderer,
                bus,
                sets,
                last_published: None,
                finalized: false,
                metrics: CoordinatorMetrics::default(),
            },
        }
    }

    /// Create a handle for submitting samples
    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle::new(self.tx.clone())
    }

    /// Accept one sample and publish a snapshot if the cadence says so
    pub fn submit(&mut self, sample: Sample) {
        self.state.submit(sample);
    }

    /// Force a final snapshot, wait the settle delay and close the bus
    pub async fn finalize(&mut self) -> FinalizeOutcome {
        self.state.finalize().await
    }

    /// Running submission count
    pub fn count(&self) -> u64 {
        self.state.sets.count()
    }

    /// The classified sets accumulated so far
    pub fn sets(&self) -> &ClassifiedSets {
        &self.state.sets
    }

    pub fn metrics(&self) -> CoordinatorMetrics {
        self.state.metrics()
    }

    /// Run the Coordinator task
    ///
    /// Consumes the Coordinator and processes requests in arrival order until
    /// a finalize request arrives or every handle is dropped. Either way the
    /// final snapshot is published and the bus closed before returning.
    pub async fn run(self) {
        let Self { tx, mut rx, mut state } = self;
        // Only handles keep the queue open from here on
        drop(tx);

        info!("Coordinator started");

        while let Some(req) = rx.recv().await {
            match req {
                CoordRequest::Submit { sample } => state.submit(sample),

                CoordRequest::GetMetrics { reply_tx } => {
                    let _ = reply_tx.send(state.metrics());
                }

                CoordRequest::Finalize { reply_tx } => {
                    let outcome = state.finalize().await;
                    if reply_tx.send(outcome).is_err() {
                        debug!("Coordinator::run: finalize requester went away");
                    }
                    break;
                }
            }
        }

        if !state.finalized {
            info!("All coordinator handles dropped, finalizing");
            state.finalize().await;
        }

        // Answer whatever was queued behind the finalize request
        rx.close();
        while let Some(req) = rx.recv().await {
            match req {
                CoordRequest::Submit { sample } => state.submit(sample),
                CoordRequest::GetMetrics { reply_tx } => {
                    let _ = reply_tx.send(state.metrics());
                }
                CoordRequest::Finalize { reply_tx } => {
                    let _ = reply_tx.send(state.finalize().await);
                }
            }
        }

        info!("Coordinator stopped");
    }
}

impl CoordinatorState {
    fn submit(&mut self, sample: Sample) {
        if self.finalized {
            warn!(x = sample.x, y = sample.y, "Sample submitted after finalize, ignoring");
            self.metrics.ignored_after_finalize += 1;
            return;
        }

        let (class, n) = self.sets.push(sample);
        trace!(n, %class, "Coordinator: accepted sample");

        if should_snapshot(n) {
            self.render_and_publish(false);
        }
    }

    async fn finalize(&mut self) -> FinalizeOutcome {
        if self.finalized {
            debug!("Coordinator::finalize: already finalized");
            return FinalizeOutcome::AlreadyFinalized(self.report());
        }
        self.finalized = true;

        let n = self.sets.count();
        info!(n, "final: n={}", n);

        if self.last_published == Some(n) {
            debug!(n, "Coordinator::finalize: snapshot for this count already published");
        } else {
            self.render_and_publish(true);
        }

        // Give viewers time to pull the final snapshot before end-of-stream
        let settle = self.config.settle_delay();
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        self.bus.close();

        FinalizeOutcome::Completed(self.report())
    }

    /// Render the current sets and hand the result to the bus
    ///
    /// A failed render is logged and counted; ingestion carries on.
    fn render_and_publish(&mut self, is_final: bool) {
        let frame = Frame::from_sets(&self.sets, self.config.draw_cap, is_final);
        self.metrics.render_calls += 1;

        match self.renderer.render(&frame) {
            Ok(snapshot) => {
                debug!(n = frame.n, is_final, "Coordinator: publishing snapshot");
                self.bus.publish(Arc::new(snapshot));
                self.last_published = Some(frame.n);
                self.metrics.snapshots_published += 1;
            }
            Err(e) => {
                warn!(n = frame.n, error = %e, "Failed to render snapshot");
                self.metrics.render_failures += 1;
            }
        }
    }

    fn report(&self) -> FinalReport {
        FinalReport {
            n: self.sets.count(),
            inner: self.sets.inner().len() as u64,
            outer: self.sets.outer().len() as u64,
            estimate: self.sets.estimate(),
        }
    }

    fn metrics(&self) -> CoordinatorMetrics {
        CoordinatorMetrics {
            samples: self.sets.count(),
            inner: self.sets.inner().len() as u64,
            outer: self.sets.outer().len() as u64,
            subscribers: self.bus.subscriber_count(),
            finalized: self.finalized,
            ..self.metrics.clone()
        }
    }
}
