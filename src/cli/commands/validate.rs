//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the sensorhub configuration file.

use crate::config::load_config;
use crate::config::redact_connection_string;
use crate::config::schema::{SensorHubConfig, StoreTarget};
use crate::core::pipeline::PipelinePlan;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as well, so any error here is a config error
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_summary(&config);
        Ok(0)
    }
}

fn print_summary(config: &SensorHubConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Store Target: {}", config.store.target);
    println!("  Collection: {}", config.store.collection);
    println!(
        "  Connect Timeout: {}s",
        config.store.connect_timeout_seconds
    );

    if config.store.target == StoreTarget::PostgreSQL {
        if let Some(ref pg_config) = config.postgresql {
            println!(
                "  PostgreSQL Connection: {}",
                redact_connection_string(pg_config.connection_string.expose_secret().as_str())
            );
            println!("  Max Connections: {}", pg_config.max_connections);
            println!(
                "  Statement Timeout: {}s",
                pg_config.statement_timeout_seconds
            );
        }
    }

    println!("  Pipeline: {}", PipelinePlan::from_config(&config.pipeline));
    if config.logging.local_enabled {
        println!(
            "  File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        );
    } else {
        println!("  File Logging: disabled");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[store]\ntarget = \"memory\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[store]\ntarget = \"memory\"\n\n[pipeline]\nproducer_interval_ms = 0"
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
