//! Pipeline actions and plans
//!
//! - [`actions`] - Producer, Counter and Finder task actions
//! - [`plan`] - Which of them run, and on what intervals

pub mod actions;
pub mod plan;

pub use actions::{CountRecords, FindPending, ProduceRecord};
pub use plan::{PipelinePlan, COUNTER_TASK, FINDER_TASK, PRODUCER_TASK};
