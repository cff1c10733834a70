// sensorhub - Periodic sensor record pipeline
// Copyright (c) 2025 sensorhub Contributors
// Licensed under the MIT License

//! # sensorhub - Periodic Sensor Record Pipeline
//!
//! sensorhub generates telemetry-like sensor records on a fixed interval,
//! persists them to a document store, and runs independent read-side
//! observers (a total count and a "pending" query) against the same store,
//! all under one cancellable lifetime.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Scheduling, pipeline actions and run coordination
//! - [`adapters`] - Store backends (PostgreSQL, in-memory)
//! - [`domain`] - Sensor records, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sensorhub::adapters::store::create_store_connector;
//! use sensorhub::config::load_config;
//! use sensorhub::core::coordinator::{Coordinator, CoordinatorConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("sensorhub.toml")?;
//!     let connector = create_store_connector(&config)?;
//!     let coordinator = Coordinator::new(CoordinatorConfig::from_config(&config), connector);
//!
//!     let shutdown = CancellationToken::new();
//!     let trigger = shutdown.clone();
//!     tokio::spawn(async move {
//!         let _ = tokio::signal::ctrl_c().await;
//!         trigger.cancel();
//!     });
//!
//!     let summary = coordinator.run(shutdown).await;
//!     for report in &summary.task_reports {
//!         println!("{report}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Scheduling Model
//!
//! Each task ticks on its own interval, first firing one interval after
//! start. A task awaits its action before waiting for the next tick, and
//! missed ticks are skipped. Action errors are logged and counted; they never
//! stop the task. Cancelling the shutdown token stops every task at its next
//! tick boundary, after which the store is closed exactly once.
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`]. Store failures are classified by
//! [`domain::StoreError`]: connection and ping failures abort a run before any
//! task starts, while write and query failures only affect the tick they
//! happen on.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
