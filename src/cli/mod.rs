//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for sensorhub using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// sensorhub - periodic sensor record pipeline
#[derive(Parser, Debug)]
#[command(name = "sensorhub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sensorhub.toml", env = "SENSORHUB_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SENSORHUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline until interrupted
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show record counts in the configured store
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PipelineVariant, StoreTarget};

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["sensorhub", "run"]);
        assert_eq!(cli.config, "sensorhub.toml");
        match cli.command {
            Commands::Run(args) => {
                assert!(args.duration.is_none());
                assert!(args.variant.is_none());
                assert!(args.store.is_none());
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_run_overrides() {
        let cli = Cli::parse_from([
            "sensorhub",
            "run",
            "--duration",
            "10",
            "--variant",
            "minimal",
            "--store",
            "memory",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.duration, Some(10));
                assert_eq!(args.variant, Some(PipelineVariant::Minimal));
                assert_eq!(args.store, Some(StoreTarget::Memory));
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["sensorhub", "run", "--variant", "bogus"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["sensorhub", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["sensorhub", "--log-level", "debug", "run"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["sensorhub", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["sensorhub", "init", "--output", "out.toml", "--force"]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.output, "out.toml");
                assert!(args.force);
            }
            other => panic!("expected init, got {other:?}"),
        }
    }
}
