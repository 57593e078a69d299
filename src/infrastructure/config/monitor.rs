//! Monitor and settings-store configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Monitor cadence and retention (`[monitor]`).
///
/// The refresh cadence is a user setting (`autoRefreshInterval`), not a
/// config value, so it can change without editing the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Milliseconds between synthetic trade flow ticks.
    #[serde(default = "default_flow_interval_ms")]
    pub flow_interval_ms: u64,
    /// Alerts kept in the alert ledger.
    #[serde(default = "default_alert_capacity")]
    pub alert_capacity: usize,
    /// Log lines kept in the in-process log buffer.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    /// Markets requested per refresh.
    #[serde(default = "default_market_limit")]
    pub market_limit: usize,
    /// Fixed RNG seed for the synthetic flow. Entropy-seeded when unset.
    #[serde(default)]
    pub flow_seed: Option<u64>,
}

const fn default_flow_interval_ms() -> u64 {
    8000
}

const fn default_alert_capacity() -> usize {
    50
}

const fn default_log_capacity() -> usize {
    200
}

const fn default_market_limit() -> usize {
    60
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            flow_interval_ms: default_flow_interval_ms(),
            alert_capacity: default_alert_capacity(),
            log_capacity: default_log_capacity(),
            market_limit: default_market_limit(),
            flow_seed: None,
        }
    }
}

/// Settings store location (`[settings]`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsStoreConfig {
    /// JSON settings file. Defaults to the platform config directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SettingsStoreConfig {
    /// Configured path, else `<config dir>/edgewatch/settings.json`, else
    /// `settings.json` in the working directory.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        dirs::config_dir()
            .map(|dir| dir.join("edgewatch").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }
}
