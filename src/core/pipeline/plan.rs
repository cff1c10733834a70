//! Task lists the coordinator can run

use crate::adapters::store::RecordStore;
use crate::config::schema::{PipelineConfig, PipelineVariant};
use crate::core::pipeline::actions::{CountRecords, FindPending, ProduceRecord};
use crate::core::scheduler::PeriodicTask;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Task name of the record producer
pub const PRODUCER_TASK: &str = "producer";
/// Task name of the total counter
pub const COUNTER_TASK: &str = "counter";
/// Task name of the pending-record finder
pub const FINDER_TASK: &str = "finder";

/// Which tasks run, and how often
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePlan {
    /// Producer, counter and finder sharing one store
    Sensor {
        producer: Duration,
        counter: Duration,
        finder: Duration,
    },
    /// Producer only
    Minimal { producer: Duration },
}

impl PipelinePlan {
    /// Plan for the configured variant and intervals
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::for_variant(config.variant, config)
    }

    /// Plan for `variant`, taking intervals from `config`
    pub fn for_variant(variant: PipelineVariant, config: &PipelineConfig) -> Self {
        match variant {
            PipelineVariant::Sensor => PipelinePlan::Sensor {
                producer: config.producer_interval(),
                counter: config.counter_interval(),
                finder: config.finder_interval(),
            },
            PipelineVariant::Minimal => PipelinePlan::Minimal {
                producer: config.producer_interval(),
            },
        }
    }

    /// Variant this plan was built for
    pub fn variant(&self) -> PipelineVariant {
        match self {
            PipelinePlan::Sensor { .. } => PipelineVariant::Sensor,
            PipelinePlan::Minimal { .. } => PipelineVariant::Minimal,
        }
    }

    /// Build the task list, every task sharing `store`
    pub fn tasks(&self, store: Arc<dyn RecordStore>) -> Vec<PeriodicTask> {
        match *self {
            PipelinePlan::Sensor {
                producer,
                counter,
                finder,
            } => vec![
                PeriodicTask::new(
                    PRODUCER_TASK,
                    producer,
                    Arc::new(ProduceRecord::new(Arc::clone(&store))),
                ),
                PeriodicTask::new(
                    COUNTER_TASK,
                    counter,
                    Arc::new(CountRecords::new(Arc::clone(&store))),
                ),
                PeriodicTask::new(FINDER_TASK, finder, Arc::new(FindPending::new(store))),
            ],
            PipelinePlan::Minimal { producer } => vec![PeriodicTask::new(
                PRODUCER_TASK,
                producer,
                Arc::new(ProduceRecord::new(store)),
            )],
        }
    }
}

impl Default for PipelinePlan {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl fmt::Display for PipelinePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelinePlan::Sensor {
                producer,
                counter,
                finder,
            } => write!(
                f,
                "sensor (producer {}ms, counter {}ms, finder {}ms)",
                producer.as_millis(),
                counter.as_millis(),
                finder.as_millis()
            ),
            PipelinePlan::Minimal { producer } => {
                write!(f, "minimal (producer {}ms)", producer.as_millis())
            }
        }
    }
}
