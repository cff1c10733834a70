//! Run coordinator
//!
//! The coordinator opens the store, hands the pipeline's tasks to the
//! scheduler, waits for the shutdown token, then joins the tasks and closes
//! the store. Once a connection succeeds, the store is closed exactly once on
//! every exit path.

pub mod state;
pub mod summary;

pub use state::CoordinatorState;
pub use summary::{RunPhase, RunStatus, RunSummary};

use crate::adapters::store::{StoreConnector, StoreSession};
use crate::config::schema::{PipelineVariant, SensorHubConfig};
use crate::core::pipeline::PipelinePlan;
use crate::core::scheduler::TaskScheduler;
use crate::domain::errors::StoreError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Settings the coordinator needs from the full configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Bound for connect and for the initial ping
    pub connect_timeout: Duration,

    /// Tasks to run
    pub plan: PipelinePlan,
}

impl CoordinatorConfig {
    /// Build from the loaded configuration
    pub fn from_config(config: &SensorHubConfig) -> Self {
        Self {
            connect_timeout: config.store.connect_timeout(),
            plan: PipelinePlan::from_config(&config.pipeline),
        }
    }

    /// Same settings with the pipeline switched to `variant`
    pub fn with_variant(self, variant: PipelineVariant, config: &SensorHubConfig) -> Self {
        Self {
            plan: PipelinePlan::for_variant(variant, &config.pipeline),
            ..self
        }
    }
}

/// Drives one run from connect to close
pub struct Coordinator {
    config: CoordinatorConfig,
    connector: Arc<dyn StoreConnector>,
    state: watch::Sender<CoordinatorState>,
}

impl Coordinator {
    /// Create a coordinator in the `Idle` state
    pub fn new(config: CoordinatorConfig, connector: Arc<dyn StoreConnector>) -> Self {
        let (state, _) = watch::channel(CoordinatorState::Idle);
        Self {
            config,
            connector,
            state,
        }
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.state.subscribe()
    }

    /// Current state
    pub fn state(&self) -> CoordinatorState {
        *self.state.borrow()
    }

    /// Run until `shutdown` is cancelled
    ///
    /// Setup failures end the run early with a failure summary and no tasks
    /// started. Errors inside tasks are recorded in the task reports and do
    /// not change the run status.
    ///
    /// A coordinator runs once. Later calls return a `Start` failure without
    /// touching the store or the state.
    pub async fn run(&self, shutdown: CancellationToken) -> RunSummary {
        let summary = RunSummary::new(self.connector.address());
        if !self.claim() {
            let state = self.state();
            tracing::error!(state = %state, "Coordinator has already been started");
            return summary
                .fail(RunPhase::Start, format!("coordinator already {state}"))
                .finish();
        }

        let summary = self.run_inner(shutdown, summary).await.finish();
        self.transition(CoordinatorState::Stopped);

        match &summary.failed_phase {
            None => tracing::info!(
                ticks = summary.total_ticks(),
                failures = summary.total_failures(),
                "Run finished"
            ),
            Some(phase) => tracing::error!(
                phase = %phase,
                error = summary.error.as_deref().unwrap_or_default(),
                "Run failed"
            ),
        }
        summary
    }

    async fn run_inner(&self, shutdown: CancellationToken, summary: RunSummary) -> RunSummary {
        let timeout = self.config.connect_timeout;

        tracing::info!(address = %summary.store_address, "Connecting to store");
        let store = match bounded(timeout, self.connector.connect(), StoreError::Connection).await {
            Ok(store) => store,
            Err(e) => return summary.fail(RunPhase::Connect, e),
        };
        let session = StoreSession::new(store);

        if let Err(e) = bounded(timeout, session.store().ping(), StoreError::Unreachable).await {
            return close_after_failure(session, summary.fail(RunPhase::Ping, e)).await;
        }
        if let Err(e) = session.store().ensure_collection().await {
            if e.is_fatal_at_setup() {
                return close_after_failure(session, summary.fail(RunPhase::Setup, e)).await;
            }
            tracing::warn!(kind = e.kind(), error = %e, "Collection setup did not complete");
        }
        tracing::info!(
            backend = session.store().backend_name(),
            collection = session.store().collection_name(),
            "Connected to store"
        );

        let tasks = self.config.plan.tasks(session.handle());
        let scheduler = match TaskScheduler::schedule(tasks, shutdown.child_token()) {
            Ok(handle) => handle,
            Err(e) => return close_after_failure(session, summary.fail(RunPhase::Schedule, e)).await,
        };
        self.transition(CoordinatorState::Running);
        tracing::info!(plan = %self.config.plan, "Pipeline running");

        shutdown.cancelled().await;
        self.transition(CoordinatorState::ShuttingDown);
        tracing::info!("Shutdown requested, waiting for tasks to finish");

        let mut summary = summary;
        let (reports, join_error) = scheduler.join_reports().await;
        summary.task_reports = reports;
        if let Some(e) = join_error {
            summary = summary.fail(RunPhase::Join, e);
        }

        // A failed close is logged by the session and leaves the status alone.
        let _ = session.close().await;
        summary
    }

    /// Move `Idle → Connecting`, false if this coordinator already started
    fn claim(&self) -> bool {
        let claimed = self.state.send_if_modified(|state| {
            if *state == CoordinatorState::Idle {
                *state = CoordinatorState::Connecting;
                true
            } else {
                false
            }
        });
        if claimed {
            tracing::debug!(
                from = %CoordinatorState::Idle,
                to = %CoordinatorState::Connecting,
                "Coordinator state changed"
            );
        }
        claimed
    }

    fn transition(&self, next: CoordinatorState) {
        let previous = self.state.send_replace(next);
        tracing::debug!(from = %previous, to = %next, "Coordinator state changed");
    }
}

async fn close_after_failure(session: StoreSession, summary: RunSummary) -> RunSummary {
    let _ = session.close().await;
    summary
}

async fn bounded<T, F>(
    timeout: Duration,
    operation: F,
    on_timeout: fn(String) -> StoreError,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(format!(
            "timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryConnector;

    #[test]
    fn test_config_from_defaults() {
        let config = SensorHubConfig::in_memory();
        let coordinator_config = CoordinatorConfig::from_config(&config);
        assert_eq!(coordinator_config.connect_timeout, Duration::from_secs(5));
        assert_eq!(coordinator_config.plan.variant(), PipelineVariant::Sensor);

        let minimal = coordinator_config.with_variant(PipelineVariant::Minimal, &config);
        assert_eq!(minimal.plan.variant(), PipelineVariant::Minimal);
        assert_eq!(minimal.connect_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_states_reach_stopped() {
        let config = SensorHubConfig::in_memory();
        let connector = Arc::new(MemoryConnector::new("sensor"));
        let coordinator = Coordinator::new(CoordinatorConfig::from_config(&config), connector);
        assert_eq!(coordinator.state(), CoordinatorState::Idle);

        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let summary = coordinator.run(shutdown).await;

        assert!(summary.is_success());
        assert_eq!(coordinator.state(), CoordinatorState::Stopped);
        assert_eq!(summary.task_reports.len(), 3);
        assert_eq!(summary.total_ticks(), 0);
    }

    #[tokio::test]
    async fn test_second_run_is_rejected() {
        let config = SensorHubConfig::in_memory();
        let connector = MemoryConnector::new("sensor");
        let store = connector.store();
        let coordinator =
            Coordinator::new(CoordinatorConfig::from_config(&config), Arc::new(connector));

        let shutdown = CancellationToken::new();
        shutdown.cancel();
        assert!(coordinator.run(shutdown.clone()).await.is_success());
        assert!(store.is_closed());

        let again = coordinator.run(shutdown).await;
        assert_eq!(again.failed_phase, Some(RunPhase::Start));
        assert_eq!(again.exit_code(), 1);
        assert!(again.task_reports.is_empty());
        assert_eq!(coordinator.state(), CoordinatorState::Stopped);
    }
}
