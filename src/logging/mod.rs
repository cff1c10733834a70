//! Logging for the pipeline
//!
//! [`init_logging`] installs the subscriber once at startup. The macros below
//! give every task failure and store round trip the same event fields and a
//! fixed target, so `RUST_LOG=sensorhub::store=debug` style filters work no
//! matter which module emits them.
//!
//! ```no_run
//! use sensorhub::config::LoggingConfig;
//! use sensorhub::logging::init_logging;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("subscriber installed");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log a failed run of a scheduled task
///
/// # Example
///
/// ```no_run
/// use sensorhub::log_task_failure;
/// use sensorhub::domain::{SensorHubError, StoreError};
///
/// let error = SensorHubError::Store(StoreError::Write("duplicate key".to_string()));
/// log_task_failure!("producer", 7, &error);
/// ```
#[macro_export]
macro_rules! log_task_failure {
    ($task:expr, $tick:expr, $error:expr) => {
        tracing::error!(
            target: "sensorhub::task",
            task = %$task,
            tick = $tick,
            error = %$error,
            "Scheduled task failed"
        );
    };
}

/// Log the outcome of a store operation
///
/// # Example
///
/// ```no_run
/// use sensorhub::log_store_operation;
/// use std::time::Duration;
///
/// log_store_operation!("count", Duration::from_millis(3), total = 42u64);
/// ```
#[macro_export]
macro_rules! log_store_operation {
    ($operation:expr, $elapsed:expr) => {
        tracing::info!(
            target: "sensorhub::store",
            operation = $operation,
            elapsed_ms = $elapsed.as_millis() as u64,
            "Store operation completed"
        );
    };
    ($operation:expr, $elapsed:expr, $($field:tt)+) => {
        tracing::info!(
            target: "sensorhub::store",
            operation = $operation,
            elapsed_ms = $elapsed.as_millis() as u64,
            $($field)+,
            "Store operation completed"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{SensorHubError, StoreError};
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        let error = SensorHubError::Store(StoreError::Query("timeout".to_string()));
        log_task_failure!("finder", 3u64, &error);
        log_store_operation!("insert", Duration::from_millis(2));
        log_store_operation!("count", Duration::from_millis(2), total = 5u64);
    }
}
