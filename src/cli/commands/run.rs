//! Run command implementation
//!
//! This module implements the `run` command, which drives the coordinator
//! until a shutdown signal arrives or the optional duration elapses.

use crate::adapters::store::create_store_connector;
use crate::config::load_config;
use crate::config::schema::{PipelineVariant, StoreTarget};
use crate::core::coordinator::{Coordinator, CoordinatorConfig, RunSummary};
use clap::Args;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Stop after this many seconds instead of waiting for a signal
    #[arg(short, long, value_name = "SECS")]
    pub duration: Option<u64>,

    /// Override the pipeline variant (sensor or minimal)
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<PipelineVariant>,

    /// Override the store backend (postgresql or memory)
    #[arg(long, value_name = "TARGET")]
    pub store: Option<StoreTarget>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown: CancellationToken,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(target) = self.store {
            tracing::info!(target = %target, "Overriding store target from CLI");
            config.store.target = target;
        }
        if let Some(variant) = self.variant {
            tracing::info!(variant = %variant, "Overriding pipeline variant from CLI");
            config.pipeline.variant = variant;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let connector = match create_store_connector(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create store connector");
                eprintln!("Failed to create store connector: {e}");
                return Ok(2);
            }
        };

        let coordinator_config = CoordinatorConfig::from_config(&config);
        let coordinator = Coordinator::new(coordinator_config, connector);

        if let Some(secs) = self.duration {
            spawn_deadline(Duration::from_secs(secs), shutdown.clone());
        }

        println!("🚀 Starting sensorhub");
        println!("  Store: {} ({})", config.store.target, config.store.collection);
        println!("  Pipeline: {}", coordinator_config.plan);
        match self.duration {
            Some(secs) => println!("  Stopping after {secs}s"),
            None => println!("  Press Ctrl+C to stop"),
        }
        println!();

        let summary = coordinator.run(shutdown).await;
        print_summary(&summary);
        Ok(summary.exit_code())
    }
}

/// Cancel `shutdown` once `after` has elapsed, unless it is cancelled first
fn spawn_deadline(after: Duration, shutdown: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(after) => {
                tracing::info!(seconds = after.as_secs(), "Run duration elapsed, shutting down");
                shutdown.cancel();
            }
            _ = shutdown.cancelled() => {}
        }
    });
}

fn print_summary(summary: &RunSummary) {
    println!();
    if summary.is_success() {
        println!("✅ Run completed");
    } else {
        println!("❌ Run failed");
        if let Some(phase) = summary.failed_phase {
            println!("   Phase: {phase}");
        }
        if let Some(error) = &summary.error {
            println!("   Error: {error}");
        }
    }
    println!("  Store: {}", summary.store_address);
    println!(
        "  Duration: {:.1}s",
        summary.duration().num_milliseconds() as f64 / 1000.0
    );
    for report in &summary.task_reports {
        println!("  {report}");
    }
}
