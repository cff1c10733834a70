//! Core scheduling and coordination for sensorhub.
//!
//! # Modules
//!
//! - [`scheduler`] - Independent periodic tasks under one cancellation token
//! - [`pipeline`] - Producer, Counter and Finder actions and the plans that group them
//! - [`coordinator`] - Store lifecycle around a scheduled pipeline
//!
//! # Run Workflow
//!
//! 1. **Connect**: open the store and ping it, both bounded by the connect timeout
//! 2. **Setup**: create the collection if it is missing
//! 3. **Schedule**: start every task of the pipeline plan
//! 4. **Wait**: until the shutdown token is cancelled
//! 5. **Join**: let in-flight actions finish and collect task reports
//! 6. **Close**: release the store exactly once
//!
//! # Example
//!
//! ```rust,no_run
//! use sensorhub::adapters::store::create_store_connector;
//! use sensorhub::config::load_config;
//! use sensorhub::core::coordinator::{Coordinator, CoordinatorConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sensorhub.toml")?;
//! let connector = create_store_connector(&config)?;
//! let coordinator = Coordinator::new(CoordinatorConfig::from_config(&config), connector);
//!
//! let shutdown = CancellationToken::new();
//! let summary = coordinator.run(shutdown).await;
//! std::process::exit(summary.exit_code());
//! # }
//! ```

pub mod coordinator;
pub mod pipeline;
pub mod scheduler;
