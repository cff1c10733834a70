//! Integration tests for graceful shutdown functionality
//!
//! These tests verify that:
//! - A single cancellation stops every task
//! - Shutdown lets in-flight store writes finish
//! - The store is closed after the last task returns
//! - A closed store refuses further work

use sensorhub::adapters::memory::MemoryConnector;
use sensorhub::adapters::store::{RecordFilter, RecordStore};
use sensorhub::config::SensorHubConfig;
use sensorhub::core::coordinator::{Coordinator, CoordinatorConfig, CoordinatorState};
use sensorhub::core::pipeline::PipelinePlan;
use sensorhub::domain::SensorRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn fast_sensor_plan() -> CoordinatorConfig {
    CoordinatorConfig {
        connect_timeout: Duration::from_secs(1),
        plan: PipelinePlan::Sensor {
            producer: Duration::from_millis(5),
            counter: Duration::from_millis(7),
            finder: Duration::from_millis(11),
        },
    }
}

#[tokio::test]
async fn test_cancellation_token_propagates_to_children() {
    let parent = CancellationToken::new();
    let child_a = parent.child_token();
    let child_b = parent.child_token();

    assert!(!child_a.is_cancelled());
    parent.cancel();

    assert!(child_a.is_cancelled());
    assert!(child_b.is_cancelled());
}

#[tokio::test]
async fn test_shutdown_stops_all_tasks_and_closes_store() {
    let connector = MemoryConnector::new("sensor");
    let store = connector.store();
    let coordinator = Arc::new(Coordinator::new(fast_sensor_plan(), Arc::new(connector)));
    let mut states = coordinator.subscribe();

    let shutdown = CancellationToken::new();
    let run = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        let shutdown = shutdown.clone();
        async move { coordinator.run(shutdown).await }
    });

    states
        .wait_for(|s| *s == CoordinatorState::Running)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    shutdown.cancel();

    let summary = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("run should stop promptly after cancellation")
        .unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.task_reports.len(), 3);
    assert!(summary.task_reports.iter().all(|r| r.failures == 0));
    assert!(store.is_closed());
    assert_eq!(coordinator.state(), CoordinatorState::Stopped);

    let produced = summary.task_reports[0].ticks as usize;
    assert_eq!(store.len().await, produced);
}

#[tokio::test]
async fn test_closed_store_refuses_further_work() {
    let connector = MemoryConnector::new("sensor");
    let store = connector.store();
    let coordinator = Coordinator::new(fast_sensor_plan(), Arc::new(connector));

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(40)).await;
        trigger.cancel();
    });
    let summary = coordinator.run(shutdown).await;
    assert!(summary.is_success());

    // Records written before shutdown stay in the collection
    assert!(store.len().await > 0);
    assert!(store.count(&RecordFilter::all()).await.is_err());
    assert!(store.insert(&SensorRecord::generate()).await.is_err());
}

#[tokio::test]
async fn test_parent_cancelled_before_run_still_closes_once() {
    let connector = MemoryConnector::new("sensor");
    let store = connector.store();
    let coordinator = Coordinator::new(
        CoordinatorConfig::from_config(&SensorHubConfig::in_memory()),
        Arc::new(connector),
    );

    let shutdown = CancellationToken::new();
    shutdown.cancel();
    let summary = coordinator.run(shutdown).await;

    assert!(summary.is_success());
    assert_eq!(summary.total_ticks(), 0);
    assert!(store.is_closed());
    assert!(store.close().await.is_err());
}
