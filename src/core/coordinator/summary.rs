//! Outcome of a coordinator run

use crate::core::scheduler::TaskReport;
use chrono::{DateTime, Utc};
use std::fmt;

/// Overall result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

/// Step of the run that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// The coordinator had already been started
    Start,
    Connect,
    Ping,
    Setup,
    Schedule,
    Join,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Start => "start",
            RunPhase::Connect => "connect",
            RunPhase::Ping => "ping",
            RunPhase::Setup => "setup",
            RunPhase::Schedule => "schedule",
            RunPhase::Join => "join",
        };
        f.write_str(name)
    }
}

/// Summary of a coordinator run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Overall status
    pub status: RunStatus,

    /// Phase that failed, if any
    pub failed_phase: Option<RunPhase>,

    /// Error message of the failed phase
    pub error: Option<String>,

    /// Redacted address of the store
    pub store_address: String,

    /// Final report of every task that was scheduled
    pub task_reports: Vec<TaskReport>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub(crate) fn new(store_address: String) -> Self {
        let now = Utc::now();
        Self {
            status: RunStatus::Success,
            failed_phase: None,
            error: None,
            store_address,
            task_reports: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub(crate) fn fail(mut self, phase: RunPhase, error: impl fmt::Display) -> Self {
        self.status = RunStatus::Failure;
        self.failed_phase = Some(phase);
        self.error = Some(error.to_string());
        self
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    /// Whether the run succeeded
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// Process exit code: 0 on success, 1 on failure
    pub fn exit_code(&self) -> i32 {
        match self.status {
            RunStatus::Success => 0,
            RunStatus::Failure => 1,
        }
    }

    /// Wall-clock length of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Total action runs across all tasks
    pub fn total_ticks(&self) -> u64 {
        self.task_reports.iter().map(|r| r.ticks).sum()
    }

    /// Total failed action runs across all tasks
    pub fn total_failures(&self) -> u64 {
        self.task_reports.iter().map(|r| r.failures).sum()
    }
}
