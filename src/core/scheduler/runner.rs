//! Concurrent execution of periodic tasks
//!
//! Every task gets its own tokio task and its own ticker. Tasks share only the
//! cancellation token; each one publishes its [`TaskReport`] through a watch
//! channel so callers can observe errors while the run is in progress.

use crate::core::scheduler::task::{PeriodicTask, TaskReport};
use crate::domain::{Result, SensorHubError};
use crate::log_task_failure;
use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Starts periodic tasks under one cancellation token
pub struct TaskScheduler;

impl TaskScheduler {
    /// Spawn every task and return a handle that owns them
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any task has a zero interval. Nothing is
    /// spawned in that case.
    pub fn schedule(tasks: Vec<PeriodicTask>, token: CancellationToken) -> Result<SchedulerHandle> {
        if let Some(task) = tasks.iter().find(|t| t.interval.is_zero()) {
            return Err(SensorHubError::Validation(format!(
                "task '{}' has a zero interval",
                task.name
            )));
        }

        let mut running = Vec::with_capacity(tasks.len());
        for task in tasks {
            let (publisher, receiver) = watch::channel(TaskReport::new(&task.name, task.interval));
            let name = task.name.clone();

            tracing::info!(
                task = %task.name,
                interval_ms = task.interval.as_millis() as u64,
                "Scheduling task"
            );
            let join = tokio::spawn(run_task(task, token.clone(), publisher));
            running.push(RunningTask {
                name,
                join,
                receiver,
            });
        }

        Ok(SchedulerHandle { token, running })
    }
}

struct RunningTask {
    name: String,
    join: JoinHandle<TaskReport>,
    receiver: watch::Receiver<TaskReport>,
}

/// Owner of a group of scheduled tasks
pub struct SchedulerHandle {
    token: CancellationToken,
    running: Vec<RunningTask>,
}

impl SchedulerHandle {
    /// Live snapshot of every task's report, in scheduling order
    pub fn reports(&self) -> Vec<TaskReport> {
        self.running
            .iter()
            .map(|task| task.receiver.borrow().clone())
            .collect()
    }

    /// Watch one task's report as it changes
    pub fn subscribe(&self, name: &str) -> Option<watch::Receiver<TaskReport>> {
        self.running
            .iter()
            .find(|task| task.name == name)
            .map(|task| task.receiver.clone())
    }

    /// Number of scheduled tasks
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Whether no tasks were scheduled
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Cancel the token the tasks were scheduled with
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Wait for every task to observe cancellation and return
    ///
    /// Pending forever unless the token is cancelled, either here via
    /// [`SchedulerHandle::cancel`] or by whoever owns it. Actions already in
    /// flight run to completion first.
    ///
    /// # Errors
    ///
    /// Returns a task error if any task panicked. All tasks are still awaited.
    pub async fn join(self) -> Result<Vec<TaskReport>> {
        let (reports, error) = self.join_reports().await;
        match error {
            Some(error) => Err(error),
            None => Ok(reports),
        }
    }

    /// Like [`SchedulerHandle::join`], but keeps the final reports of the
    /// tasks that finished cleanly alongside the first task error
    pub async fn join_reports(self) -> (Vec<TaskReport>, Option<SensorHubError>) {
        let (names, joins): (Vec<_>, Vec<_>) = self
            .running
            .into_iter()
            .map(|task| (task.name, task.join))
            .unzip();

        let mut reports = Vec::with_capacity(names.len());
        let mut first_error = None;
        for (name, outcome) in names.into_iter().zip(join_all(joins).await) {
            match outcome {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::error!(task = %name, error = %e, "Task did not finish cleanly");
                    if first_error.is_none() {
                        first_error = Some(SensorHubError::Task(format!(
                            "task '{name}' did not finish cleanly: {e}"
                        )));
                    }
                }
            }
        }
        (reports, first_error)
    }
}

async fn run_task(
    task: PeriodicTask,
    token: CancellationToken,
    publisher: watch::Sender<TaskReport>,
) -> TaskReport {
    let mut report = TaskReport::new(&task.name, task.interval);
    let mut ticker = interval_at(Instant::now() + task.interval, task.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        // A tick and cancellation can be ready together.
        if token.is_cancelled() {
            break;
        }

        match task.action.run(&token).await {
            Ok(()) => report.record_success(),
            Err(e) => {
                report.record_failure(e.to_string());
                log_task_failure!(task.name, report.ticks, e);
            }
        }
        publisher.send_replace(report.clone());
    }

    tracing::info!(
        task = %task.name,
        ticks = report.ticks,
        failures = report.failures,
        "Task stopped"
    );
    report
}
