//! Handler for the `run` command.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::application::log_buffer::{LogBuffer, LogLevel};
use crate::domain::AppSettings;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime::{self, Cadence};

/// Execute the run command.
pub async fn execute(config: &Config, args: &RunArgs) -> Result<()> {
    let mut config = config.clone();
    if args.json_logs || output::is_json() {
        config.logging.format = "json".to_string();
    }
    if let Some(flow_ms) = args.flow_ms {
        config.monitor.flow_interval_ms = flow_ms;
    }
    config.validate()?;

    let log_buffer = LogBuffer::new(config.monitor.log_capacity);
    config.init_logging(Some(&log_buffer));

    let settings = bootstrap::build_settings_store(&config);
    let cadence = resolve_cadence(&config, &settings.settings(), args)?;

    print_startup(&config, cadence);

    let monitor = Arc::new(bootstrap::build_monitor(&config, settings));
    let _status = monitor.subscribe_status(|status| {
        output::event(
            &chrono::Utc::now().format("%H:%M:%S").to_string(),
            "feed",
            &status.to_string(),
        );
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = tokio::spawn(runtime::run_with_shutdown(
        Arc::clone(&monitor),
        cadence,
        shutdown_rx,
    ));

    signal::ctrl_c().await?;
    info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);
    if let Err(err) = runner.await {
        warn!(error = %err, "Monitor task ended abnormally");
    }

    print_summary(&monitor.state(), &log_buffer);
    info!("edgewatch stopped");
    Ok(())
}

#[allow(clippy::result_large_err)]
fn resolve_cadence(config: &Config, settings: &AppSettings, args: &RunArgs) -> Result<Cadence> {
    let refresh_ms = match args.refresh_ms {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                field: "refresh_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into())
        }
        Some(ms) => ms,
        None if settings.auto_refresh_interval_ms == 0 => {
            warn!("Stored refresh interval is 0, using default");
            AppSettings::default().auto_refresh_interval_ms
        }
        None => settings.auto_refresh_interval_ms,
    };

    Ok(Cadence {
        refresh: Duration::from_millis(refresh_ms),
        flow: Duration::from_millis(config.monitor.flow_interval_ms),
    })
}

fn print_startup(config: &Config, cadence: Cadence) {
    if output::is_quiet() {
        return;
    }
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Markets", config.monitor.market_limit);
    output::field("Refresh", format!("{}s", cadence.refresh.as_secs_f64()));
    output::field("Flow", format!("{}s", cadence.flow.as_secs_f64()));
    output::field(
        "Band",
        format!(
            "{} .. {}",
            config.detection.lower_bound, config.detection.upper_bound
        ),
    );
    if output::verbosity() > 0 {
        output::field("Settings", config.settings.resolved_path().display());
    }
    output::hint("press Ctrl-C to stop");
}

fn print_summary(state: &crate::application::monitor::DashboardState, logs: &LogBuffer) {
    output::section("Session");
    output::field("Markets", state.markets.len());
    output::field("Signals", state.signals.len());
    output::field("Alerts", state.alerts.len());

    let problems: Vec<_> = logs
        .entries()
        .into_iter()
        .filter(|entry| entry.level >= LogLevel::Warn)
        .collect();
    if problems.is_empty() {
        output::success("No warnings recorded");
        return;
    }
    output::field("Warnings", problems.len());
    if output::verbosity() > 0 {
        for entry in problems.iter().take(5) {
            output::note(&format!("[{}] {} {}", entry.level, entry.module, entry.message));
        }
    }
}
