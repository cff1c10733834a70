//! Coordinator lifecycle states

use std::fmt;

/// Where a coordinator run currently is
///
/// Moves forward only: `Idle → Connecting → Running → ShuttingDown → Stopped`,
/// or `Connecting → Stopped` when setup fails. `Stopped` is final; only an
/// `Idle` coordinator can start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    #[default]
    Idle,
    Connecting,
    Running,
    ShuttingDown,
    Stopped,
}

impl CoordinatorState {
    /// Whether the run has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, CoordinatorState::Stopped)
    }
}

impl fmt::Display for CoordinatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinatorState::Idle => "idle",
            CoordinatorState::Connecting => "connecting",
            CoordinatorState::Running => "running",
            CoordinatorState::ShuttingDown => "shutting_down",
            CoordinatorState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
