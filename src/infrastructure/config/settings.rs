//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; every section is
//! optional and falls back to defaults. Secrets such as the Discord webhook
//! come from the environment or the settings store, never from this file.
//!
//! # Example
//!
//! ```no_run
//! use edgewatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(None);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::monitor::{MonitorConfig, SettingsStoreConfig};
use crate::adapter::outbound::coingecko::PriceFeedConfig;
use crate::adapter::outbound::http::HttpConfig;
use crate::adapter::outbound::polymarket::PolymarketConfig;
use crate::application::arbitrage::ArbitrageConfig;
use crate::application::log_buffer::LogBuffer;
use crate::application::whale::WhaleConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Polymarket Gamma API settings.
    #[serde(default)]
    pub polymarket: PolymarketConfig,

    /// Crypto price feed settings.
    #[serde(default)]
    pub prices: PriceFeedConfig,

    /// Outcome-sum arbitrage thresholds.
    #[serde(default)]
    pub detection: ArbitrageConfig,

    /// Synthetic whale trade sizing.
    #[serde(default)]
    pub whale: WhaleConfig,

    /// Poll cadence and retention.
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Settings store location.
    #[serde(default)]
    pub settings: SettingsStoreConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init_logging(&self, buffer: Option<&LogBuffer>) {
        self.logging.init(buffer);
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("format", "must be \"pretty\" or \"json\""));
        }

        validate_url("gamma_api_url", &self.polymarket.gamma_api_url)?;
        validate_url("event_url", &self.polymarket.event_url)?;
        validate_url("api_url", &self.prices.api_url)?;
        validate_http(&self.polymarket.http)?;
        validate_http(&self.prices.http)?;

        let detection = &self.detection;
        if detection.lower_bound <= Decimal::ZERO {
            return Err(invalid("lower_bound", "must be greater than 0"));
        }
        if detection.lower_bound > Decimal::ONE || detection.upper_bound < Decimal::ONE {
            return Err(invalid(
                "tolerance_band",
                "must satisfy lower_bound <= 1 <= upper_bound",
            ));
        }
        if detection.high_severity_below < Decimal::ZERO
            || detection.high_severity_below > Decimal::ONE
        {
            return Err(invalid("high_severity_below", "must be between 0 and 1"));
        }
        if detection.max_signals == 0 {
            return Err(invalid("max_signals", "must be greater than 0"));
        }

        let whale = &self.whale;
        if whale.candidate_window == 0 {
            return Err(invalid("candidate_window", "must be greater than 0"));
        }
        if whale.base_floor <= Decimal::ZERO || whale.large_market_floor <= Decimal::ZERO {
            return Err(invalid("floor", "liquidity floors must be greater than 0"));
        }
        if whale.large_market_volume < Decimal::ZERO {
            return Err(invalid("large_market_volume", "must be 0 or greater"));
        }

        let monitor = &self.monitor;
        if monitor.flow_interval_ms == 0 {
            return Err(invalid("flow_interval_ms", "must be greater than 0"));
        }
        if monitor.alert_capacity == 0 {
            return Err(invalid("alert_capacity", "must be greater than 0"));
        }
        if monitor.log_capacity == 0 {
            return Err(invalid("log_capacity", "must be greater than 0"));
        }
        if monitor.market_limit == 0 {
            return Err(invalid("market_limit", "must be greater than 0"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[allow(clippy::result_large_err)]
fn validate_url(field: &'static str, raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    let url = Url::parse(raw).map_err(|e| invalid(field, &e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(field, "must be an http(s) URL"));
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn validate_http(http: &HttpConfig) -> Result<()> {
    if http.timeout_ms == 0 {
        return Err(invalid("timeout_ms", "must be greater than 0"));
    }
    if http.connect_timeout_ms == 0 {
        return Err(invalid("connect_timeout_ms", "must be greater than 0"));
    }
    if http.retry_max_attempts == 0 {
        return Err(invalid("retry_max_attempts", "must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.detection.lower_bound, dec!(0.96));
        assert_eq!(config.detection.upper_bound, dec!(1.04));
        assert_eq!(config.whale.candidate_window, 20);
        assert_eq!(config.monitor.flow_interval_ms, 8000);
        assert_eq!(config.monitor.market_limit, 60);
        assert_eq!(config.prices.assets.len(), 4);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [detection]
            lower_bound = "0.95"
            max_signals = 10

            [monitor]
            alert_capacity = 20

            [polymarket.http]
            retry_max_attempts = 5
            "#,
        )
        .unwrap();

        assert!(config.logging.is_json());
        assert_eq!(config.detection.lower_bound, dec!(0.95));
        assert_eq!(config.detection.max_signals, 10);
        assert_eq!(config.detection.upper_bound, dec!(1.04));
        assert_eq!(config.monitor.alert_capacity, 20);
        assert_eq!(config.polymarket.http.retry_max_attempts, 5);
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = Config::parse_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "format", .. })
        ));
    }

    #[test]
    fn rejects_band_excluding_one() {
        let err = Config::parse_toml("[detection]\nupper_bound = \"0.99\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "tolerance_band",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = Config::parse_toml("[monitor]\nalert_capacity = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "alert_capacity",
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_url() {
        let err = Config::parse_toml("[polymarket]\ngamma_api_url = \"ftp://x\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "gamma_api_url",
                ..
            })
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::parse_toml("[monitor\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/nonexistent/edgewatch.toml").unwrap();
        assert_eq!(config.monitor.alert_capacity, 50);
    }
}
