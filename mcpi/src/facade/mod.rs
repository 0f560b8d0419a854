//! IngestFacade - the public wait/plot/quit contract
//!
//! ```rust,ignore
//! let mut session = IngestFacade::start(&config).await?;
//! session.wait_ready().await?;          // first viewer opened the page
//! for _ in 0..1000 {
//!     session.plot(rng.random(), rng.random()).await?;
//! }
//! let summary = session.quit().await?;  // final snapshot delivered
//! println!("pi ~ {:?} in {:?}", summary.report.estimate, summary.runtime);
//! ```

mod ready;

pub use ready::{ReadyTrigger, ReadyWaiter, ready_signal};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bus::{SnapshotBus, SubscriberHandle, create_snapshot_bus};
use crate::config::Config;
use crate::coordinator::{Coordinator, CoordinatorConfig, CoordinatorHandle, CoordinatorMetrics, FinalReport};
use crate::domain::Sample;
use crate::error::{McpiError, Result};
use crate::render::{PngRenderer, SnapshotRenderer};
use crate::server::{AppState, ServerHandle, start_server};

/// What `quit` reports back
#[derive(Debug, Clone, PartialEq)]
pub struct QuitSummary {
    pub report: FinalReport,
    /// Wall-clock time since `wait_ready` returned (zero if it never did)
    pub runtime: Duration,
}

/// One plotting session: a running coordinator plus its delivery surface
pub struct IngestFacade {
    handle: CoordinatorHandle,
    bus: Arc<SnapshotBus>,
    trigger: ReadyTrigger,
    waiter: ReadyWaiter,
    started: Option<Instant>,
    coordinator: Option<JoinHandle<()>>,
    server: Option<ServerHandle>,
    terminated: bool,
}

impl IngestFacade {
    /// Start a session with the PNG renderer and the HTTP server
    ///
    /// Fails if the server cannot bind; nothing is left running in that case.
    pub async fn start(config: &Config) -> Result<Self> {
        let bus = create_snapshot_bus();
        let (trigger, waiter) = ready_signal();

        let server = start_server(
            &config.server,
            AppState {
                bus: bus.clone(),
                ready: trigger.clone(),
            },
        )
        .await?;

        let renderer = Arc::new(PngRenderer::new(config.render.clone()));
        let mut facade = Self::assemble(config.coordinator.clone(), renderer, bus, trigger, waiter);
        facade.server = Some(server);
        Ok(facade)
    }

    /// Start a session without any transport
    ///
    /// Viewers attach through [`subscribe`](Self::subscribe) and readiness is
    /// signalled through [`ready_trigger`](Self::ready_trigger).
    pub fn headless(config: CoordinatorConfig, renderer: Arc<dyn SnapshotRenderer>) -> Self {
        let (trigger, waiter) = ready_signal();
        Self::assemble(config, renderer, create_snapshot_bus(), trigger, waiter)
    }

    fn assemble(
        config: CoordinatorConfig,
        renderer: Arc<dyn SnapshotRenderer>,
        bus: Arc<SnapshotBus>,
        trigger: ReadyTrigger,
        waiter: ReadyWaiter,
    ) -> Self {
        let coordinator = Coordinator::new(config, renderer, bus.clone());
        let handle = coordinator.handle();
        let task = tokio::spawn(coordinator.run());

        Self {
            handle,
            bus,
            trigger,
            waiter,
            started: None,
            coordinator: Some(task),
            server: None,
            terminated: false,
        }
    }

    /// Wait until a viewer is attached, then start the runtime clock
    pub async fn wait_ready(&mut self) -> Result<()> {
        debug!("IngestFacade::wait_ready: called");
        self.waiter.wait().await?;
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    /// Queue one sample; returns once it is queued, not processed
    pub async fn plot(&self, x: f64, y: f64) -> Result<()> {
        if self.terminated {
            return Err(McpiError::AlreadyTerminated);
        }
        self.handle.submit(Sample::new(x, y)).await
    }

    /// Finalize, wait for the final snapshot to go out, and report runtime
    ///
    /// Only the first call finalizes; later calls return `AlreadyTerminated`.
    pub async fn quit(&mut self) -> Result<QuitSummary> {
        if self.terminated {
            return Err(McpiError::AlreadyTerminated);
        }
        self.terminated = true;

        let outcome = self.handle.finalize().await;

        if let Some(task) = self.coordinator.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "Coordinator task failed");
        }

        // Tear down the transport even when finalize failed
        if let Some(server) = self.server.take() {
            server.shutdown().await;
        }

        let outcome = outcome?;

        let runtime = self.started.map(|t| t.elapsed()).unwrap_or_default();
        info!("total runtime: {:?}", runtime);

        Ok(QuitSummary {
            report: outcome.report().clone(),
            runtime,
        })
    }

    /// A cloneable handle for producers on other tasks or threads
    pub fn handle(&self) -> CoordinatorHandle {
        self.handle.clone()
    }

    /// Attach a viewer directly to the snapshot bus
    pub fn subscribe(&self) -> SubscriberHandle {
        self.bus.subscribe()
    }

    /// Trigger that marks the session ready (what the page handler fires)
    pub fn ready_trigger(&self) -> ReadyTrigger {
        self.trigger.clone()
    }

    pub async fn metrics(&self) -> Result<CoordinatorMetrics> {
        self.handle.metrics().await
    }

    /// Address of the HTTP server, if this session has one
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.as_ref().map(|s| s.local_addr())
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Frame, Snapshot};
    use crate::render::RenderError;

    struct TitleRenderer;

    impl SnapshotRenderer for TitleRenderer {
        fn render(&self, frame: &Frame<'_>) -> std::result::Result<Snapshot, RenderError> {
            Ok(frame.snapshot(String::new()))
        }
    }

    fn headless() -> IngestFacade {
        let config = CoordinatorConfig {
            settle_delay_ms: 0,
            ..Default::default()
        };
        IngestFacade::headless(config, Arc::new(TitleRenderer))
    }

    #[tokio::test]
    async fn test_wait_plot_quit() {
        let mut session = headless();
        session.ready_trigger().fire();
        session.wait_ready().await.unwrap();

        session.plot(0.0, 0.0).await.unwrap();
        session.plot(0.5, 0.5).await.unwrap();
        session.plot(2.0, 2.0).await.unwrap();

        let summary = session.quit().await.unwrap();
        assert_eq!(summary.report.n, 3);
        assert_eq!(summary.report.inner, 2);
        assert_eq!(summary.report.outer, 1);
        assert!((summary.report.estimate.unwrap() - 8.0 / 3.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_quit_twice() {
        let mut session = headless();
        session.plot(0.1, 0.1).await.unwrap();

        let first = session.quit().await.unwrap();
        assert_eq!(first.runtime, Duration::ZERO);
        assert!(session.is_terminated());

        assert!(matches!(session.quit().await, Err(McpiError::AlreadyTerminated)));
        assert!(matches!(session.plot(0.1, 0.1).await, Err(McpiError::AlreadyTerminated)));
    }

    struct PanickingRenderer;

    impl SnapshotRenderer for PanickingRenderer {
        fn render(&self, _frame: &Frame<'_>) -> std::result::Result<Snapshot, RenderError> {
            panic!("renderer blew up");
        }
    }

    #[tokio::test]
    async fn test_quit_stops_server_when_coordinator_is_gone() {
        let mut config = Config::default();
        config.server.bind = "127.0.0.1:0".to_string();
        config.server.shutdown_timeout_ms = 1000;

        let mut session = IngestFacade::start(&config).await.unwrap();
        let addr = session.local_addr().unwrap();

        // Swap in a coordinator that dies on its first snapshot
        let coordinator = Coordinator::new(CoordinatorConfig::default(), Arc::new(PanickingRenderer), session.bus.clone());
        session.handle = coordinator.handle();
        if let Some(old) = session.coordinator.replace(tokio::spawn(coordinator.run())) {
            old.abort();
        }

        // n = 1 is a cadence point, so the render panics and the task ends
        let _ = session.plot(0.5, 0.5).await;
        tokio::time::timeout(Duration::from_secs(2), async {
            while !session.handle.is_closed() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("coordinator task should stop");

        assert!(session.quit().await.is_err());
        assert!(session.is_terminated());
        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_headless_has_no_address() {
        let mut session = headless();
        assert!(session.local_addr().is_none());
        session.quit().await.unwrap();
    }
}
