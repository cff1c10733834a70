// sensorhub - Periodic sensor record pipeline
// Copyright (c) 2025 sensorhub Contributors
// Licensed under the MIT License

use clap::Parser;
use sensorhub::cli::{Cli, Commands};
use sensorhub::config::{load_config, LoggingConfig};
use sensorhub::logging::init_logging;
use std::process;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the config when it loads; otherwise console only.
    // Commands report config errors themselves.
    let (config_level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (Some(config.application.log_level), config.logging),
        Err(_) => (None, LoggingConfig::default()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());
    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sensorhub");

    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone());

    let exit_code = match execute_command(&cli, shutdown).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            1
        }
    };

    drop(logging_guard);
    process::exit(exit_code);
}

/// Cancel `shutdown` on SIGINT or SIGTERM
fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        request_shutdown(&shutdown, "SIGINT");
                    }
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => request_shutdown(&shutdown, "SIGINT"),
                _ = sigterm.recv() => request_shutdown(&shutdown, "SIGTERM"),
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                request_shutdown(&shutdown, "SIGINT");
            }
        }
    });
}

fn request_shutdown(shutdown: &CancellationToken, signal: &str) {
    tracing::info!(signal, "Received shutdown signal, initiating graceful shutdown...");
    println!("\n⚠️  Shutdown signal received, waiting for running tasks...");
    shutdown.cancel();
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown: CancellationToken) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Run(args) => args.execute(&cli.config, shutdown).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
