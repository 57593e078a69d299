//! User-adjustable application settings.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::money::Volume;

/// Settings persisted in the flat settings blob.
///
/// Missing keys in a stored blob fall back to the defaults, so older or
/// partial blobs keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    /// Discord webhook for whale notifications. Empty disables delivery.
    pub discord_webhook_url: String,
    /// Minimum trade size treated as alert-worthy. Stored as a JSON number;
    /// numeric strings are accepted on read.
    #[serde(serialize_with = "serialize_number")]
    pub whale_threshold: Volume,
    /// Market refresh cadence in milliseconds.
    #[serde(rename = "autoRefreshInterval")]
    pub auto_refresh_interval_ms: u64,
}

const fn default_auto_refresh_interval_ms() -> u64 {
    30_000
}

fn default_whale_threshold() -> Volume {
    Decimal::from(25_000)
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            discord_webhook_url: String::new(),
            whale_threshold: default_whale_threshold(),
            auto_refresh_interval_ms: default_auto_refresh_interval_ms(),
        }
    }
}

/// Whole values as JSON integers, others as floats.
fn serialize_number<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract().is_zero() {
        if let Some(whole) = value.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match value.to_f64() {
        Some(float) => serializer.serialize_f64(float),
        None => serializer.collect_str(value),
    }
}

impl AppSettings {
    /// Whether the stored values are usable as-is.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.whale_threshold > Decimal::ZERO && self.auto_refresh_interval_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_match_dashboard_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.whale_threshold, dec!(25000));
        assert_eq!(settings.auto_refresh_interval_ms, 30_000);
        assert!(settings.discord_webhook_url.is_empty());
        assert!(settings.is_valid());
    }

    #[test]
    fn partial_blob_merges_over_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"whaleThreshold": 50000}"#).unwrap();
        assert_eq!(settings.whale_threshold, dec!(50000));
        assert_eq!(settings.auto_refresh_interval_ms, 30_000);
    }

    #[test]
    fn threshold_round_trips_as_number() {
        let settings = AppSettings {
            whale_threshold: dec!(60000),
            ..AppSettings::default()
        };
        let blob = serde_json::to_value(&settings).unwrap();
        assert_eq!(blob["whaleThreshold"], serde_json::json!(60000));
        assert_eq!(blob["autoRefreshInterval"], serde_json::json!(30000));

        let fractional = AppSettings {
            whale_threshold: dec!(12500.5),
            ..AppSettings::default()
        };
        let blob = serde_json::to_value(&fractional).unwrap();
        assert_eq!(blob["whaleThreshold"], serde_json::json!(12500.5));

        let back: AppSettings = serde_json::from_value(blob).unwrap();
        assert_eq!(back.whale_threshold, dec!(12500.5));
    }

    #[test]
    fn legacy_string_threshold_still_loads() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"whaleThreshold": "75000"}"#).unwrap();
        assert_eq!(settings.whale_threshold, dec!(75000));
    }

    #[test]
    fn zero_threshold_is_invalid() {
        let settings = AppSettings {
            whale_threshold: Decimal::ZERO,
            ..AppSettings::default()
        };
        assert!(!settings.is_valid());
    }
}
