//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{PipelineVariant, SensorHubConfig, StoreTarget};
use super::secret::secret_string;
use crate::domain::errors::SensorHubError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SensorHubConfig
/// 4. Applies environment variable overrides (SENSORHUB_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use sensorhub::config::loader::load_config;
///
/// let config = load_config("sensorhub.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SensorHubConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SensorHubError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SensorHubError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses, overrides and validates configuration from TOML text
///
/// # Errors
///
/// Same as [`load_config`], minus the file access errors.
pub fn parse_config(contents: &str) -> Result<SensorHubConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SensorHubConfig = toml::from_str(&contents)
        .map_err(|e| SensorHubError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SensorHubError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SensorHubError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SensorHubError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using SENSORHUB_* prefix
///
/// Environment variables follow the pattern: SENSORHUB_<SECTION>_<KEY>
/// For example: SENSORHUB_STORE_TARGET, SENSORHUB_PIPELINE_VARIANT
fn apply_env_overrides(config: &mut SensorHubConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SENSORHUB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Store overrides
    if let Ok(val) = std::env::var("SENSORHUB_STORE_TARGET") {
        config.store.target = val
            .parse::<StoreTarget>()
            .map_err(|e| SensorHubError::Configuration(format!("SENSORHUB_STORE_TARGET: {e}")))?;
    }
    if let Ok(val) = std::env::var("SENSORHUB_STORE_CONNECT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.store.connect_timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("SENSORHUB_STORE_COLLECTION") {
        config.store.collection = val;
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("SENSORHUB_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("SENSORHUB_POSTGRESQL_MAX_CONNECTIONS") {
            if let Ok(max) = val.parse() {
                pg_config.max_connections = max;
            }
        }
    }

    // Pipeline overrides
    if let Ok(val) = std::env::var("SENSORHUB_PIPELINE_VARIANT") {
        config.pipeline.variant = val
            .parse::<PipelineVariant>()
            .map_err(SensorHubError::Configuration)?;
    }
    if let Ok(val) = std::env::var("SENSORHUB_PIPELINE_PRODUCER_INTERVAL_MS") {
        if let Ok(ms) = val.parse() {
            config.pipeline.producer_interval_ms = ms;
        }
    }
    if let Ok(val) = std::env::var("SENSORHUB_PIPELINE_COUNTER_INTERVAL_MS") {
        if let Ok(ms) = val.parse() {
            config.pipeline.counter_interval_ms = ms;
        }
    }
    if let Ok(val) = std::env::var("SENSORHUB_PIPELINE_FINDER_INTERVAL_MS") {
        if let Ok(ms) = val.parse() {
            config.pipeline.finder_interval_ms = ms;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SENSORHUB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SENSORHUB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
