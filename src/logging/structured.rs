//! Subscriber installation for the sensorhub binary
//!
//! Task and store events go to the console in human-readable form. With
//! `logging.local_enabled`, the same events are also written as JSON lines to
//! `<local_path>/sensorhub.log`, rotated per `logging.local_rotation`.
//!
//! ```no_run
//! use sensorhub::config::LoggingConfig;
//! use sensorhub::logging::init_logging;
//!
//! let _guard = init_logging("debug", &LoggingConfig::default()).expect("subscriber installed");
//! tracing::info!(task = "producer", "ready");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{Result, SensorHubError};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name of the JSON log inside `logging.local_path`
pub const LOG_FILE_NAME: &str = "sensorhub.log";

/// Keeps the background log writer alive
///
/// Dropping it flushes buffered file output, so hold it until the process is
/// about to exit.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// `level` applies to the `sensorhub` target unless `RUST_LOG` is set.
///
/// # Errors
///
/// Returns [`SensorHubError::Configuration`] for an unknown level, a log
/// directory that cannot be created, or a subscriber that is already
/// installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = sensorhub_filter(parse_log_level(level)?);

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter.clone())
        .boxed();
    let mut layers = vec![console];

    let mut file_guard = None;
    if config.local_enabled {
        std::fs::create_dir_all(&config.local_path).map_err(|e| {
            SensorHubError::Configuration(format!(
                "Failed to create log directory {}: {e}",
                config.local_path
            ))
        })?;

        let appender = RollingFileAppender::new(
            rotation(&config.local_rotation),
            &config.local_path,
            LOG_FILE_NAME,
        );
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| {
            SensorHubError::Configuration(format!("Failed to install tracing subscriber: {e}"))
        })?;

    tracing::info!(
        log_level = level,
        file = config.local_enabled,
        path = %config.local_path,
        rotation = %config.local_rotation,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn sensorhub_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sensorhub={level}")))
}

/// Unknown values fall back to daily; config validation rejects them earlier.
fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(SensorHubError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
