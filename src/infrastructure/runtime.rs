//! Long-running monitor loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info};

use crate::application::monitor::Monitor;
use crate::infrastructure::scheduler::PeriodicTask;

/// Intervals for the two monitor passes.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    pub refresh: Duration,
    pub flow: Duration,
}

/// Spawn the refresh and flow tasks for `monitor`.
///
/// Refresh failures are logged and retried on the next tick.
#[must_use]
pub fn spawn_tasks(monitor: &Arc<Monitor>, cadence: Cadence) -> Vec<PeriodicTask> {
    let refresh_monitor = Arc::clone(monitor);
    let refresh = PeriodicTask::spawn("refresh", cadence.refresh, move || {
        let monitor = Arc::clone(&refresh_monitor);
        async move {
            if let Err(err) = monitor.refresh().await {
                error!(error = %err, "Market sync failed");
            }
        }
    });

    let flow_monitor = Arc::clone(monitor);
    let flow = PeriodicTask::spawn("flow", cadence.flow, move || {
        let monitor = Arc::clone(&flow_monitor);
        async move {
            monitor.sample_flow(Utc::now()).await;
        }
    });

    vec![refresh, flow]
}

/// Run an initial refresh, then both passes until `shutdown` flips to true.
pub async fn run_with_shutdown(
    monitor: Arc<Monitor>,
    cadence: Cadence,
    mut shutdown: watch::Receiver<bool>,
) {
    if let Err(err) = monitor.refresh().await {
        error!(error = %err, "Market sync failed");
    }

    let tasks = spawn_tasks(&monitor, cadence);
    info!(
        refresh_ms = cadence.refresh.as_millis() as u64,
        flow_ms = cadence.flow.as_millis() as u64,
        "Monitor running"
    );

    loop {
        match shutdown.changed().await {
            Ok(()) if *shutdown.borrow() => {
                info!("Shutdown signal received");
                break;
            }
            Ok(()) => {}
            Err(_) => {
                info!("Shutdown channel closed");
                break;
            }
        }
    }

    for task in &tasks {
        task.stop();
    }
    for task in tasks {
        task.join().await;
    }
}
