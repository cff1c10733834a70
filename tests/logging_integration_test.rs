//! Integration tests for logging functionality
//!
//! A process can install only one global subscriber, so a single test in this
//! binary calls `init_logging`.

use sensorhub::config::LoggingConfig;
use sensorhub::domain::{SensorHubError, StoreError};
use sensorhub::logging::{init_logging, LOG_FILE_NAME};
use sensorhub::{log_store_operation, log_task_failure};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/sensorhub");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_init_logging_writes_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).expect("logging should initialize");
    let error = SensorHubError::Store(StoreError::Write("duplicate key".to_string()));
    log_task_failure!("producer", 1u64, &error);
    log_store_operation!("count", Duration::from_millis(4), total = 12u64);
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join(LOG_FILE_NAME)).unwrap();
    assert!(contents.contains("Scheduled task failed"));
    assert!(contents.contains("duplicate key"));
    assert!(contents.contains("\"total\":12"));

    // Second installation is rejected instead of panicking
    let second = init_logging("info", &LoggingConfig::default());
    assert!(second.is_err());
}

#[test]
fn test_init_logging_rejects_bad_level() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(matches!(result, Err(SensorHubError::Configuration(_))));
}
