//! Periodic task scheduling
//!
//! [`TaskScheduler::schedule`] spawns one tokio task per [`PeriodicTask`].
//! Each task ticks on its own interval, skips missed ticks, and awaits its
//! action before waiting for the next tick. Action errors are logged and
//! recorded in the task's [`TaskReport`]; they never stop the task. All tasks
//! stop when the shared [`CancellationToken`](tokio_util::sync::CancellationToken)
//! is cancelled, and [`SchedulerHandle::join`] waits for them.

pub mod runner;
pub mod task;

pub use runner::{SchedulerHandle, TaskScheduler};
pub use task::{PeriodicTask, TaskAction, TaskReport};
