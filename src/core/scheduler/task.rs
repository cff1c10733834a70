//! Periodic task definitions and their reports

use crate::domain::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Work performed on every tick of a [`PeriodicTask`]
///
/// The token is the scheduler's; long actions may poll it, but the scheduler
/// never interrupts an action that has started.
#[async_trait]
pub trait TaskAction: Send + Sync {
    /// Run the action once
    async fn run(&self, cancel: &CancellationToken) -> Result<()>;
}

/// A named action repeated on a fixed interval
#[derive(Clone)]
pub struct PeriodicTask {
    /// Name used in logs and reports
    pub name: String,

    /// Time between ticks; the first tick fires one interval after start
    pub interval: Duration,

    /// Action run on every tick
    pub action: Arc<dyn TaskAction>,
}

impl PeriodicTask {
    /// Create a new periodic task
    pub fn new(name: impl Into<String>, interval: Duration, action: Arc<dyn TaskAction>) -> Self {
        Self {
            name: name.into(),
            interval,
            action,
        }
    }
}

impl fmt::Debug for PeriodicTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

/// Running tally for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    /// Task name
    pub name: String,

    /// Configured interval
    pub interval: Duration,

    /// Number of times the action ran
    pub ticks: u64,

    /// Number of runs that returned an error
    pub failures: u64,

    /// Message of the most recent error
    pub last_error: Option<String>,

    /// When the action last finished
    pub last_run_at: Option<DateTime<Utc>>,
}

impl TaskReport {
    /// Empty report for a task that has not ticked yet
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval,
            ticks: 0,
            failures: 0,
            last_error: None,
            last_run_at: None,
        }
    }

    /// Number of runs that succeeded
    pub fn successes(&self) -> u64 {
        self.ticks - self.failures
    }

    pub(crate) fn record_success(&mut self) {
        self.ticks += 1;
        self.last_run_at = Some(Utc::now());
    }

    pub(crate) fn record_failure(&mut self, error: String) {
        self.ticks += 1;
        self.failures += 1;
        self.last_error = Some(error);
        self.last_run_at = Some(Utc::now());
    }
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} every {}ms: {} runs, {} failed",
            self.name,
            self.interval.as_millis(),
            self.ticks,
            self.failures
        )?;
        if let Some(error) = &self.last_error {
            write!(f, " (last error: {error})")?;
        }
        Ok(())
    }
}
