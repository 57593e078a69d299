//! Settings persistence port.
//!
//! Storage is a flat key-value map of JSON values. The typed accessors are
//! provided methods so every backend stores the same layout.

use serde_json::Value;
use tracing::warn;

use crate::domain::AppSettings;
use crate::error::Result;

/// Key holding the serialized [`AppSettings`].
pub const SETTINGS_KEY: &str = "polypulse_app_settings";

/// Key holding the tracked address list.
pub const ADDRESSES_KEY: &str = "polypulse_saved_addresses";

pub trait SettingsStore: Send + Sync {
    /// Raw value for `key`, if present.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Stored settings merged over defaults.
    ///
    /// A missing or unreadable entry yields the defaults.
    fn settings(&self) -> AppSettings {
        match self.get(SETTINGS_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!(error = %err, "Stored settings are malformed, using defaults");
                AppSettings::default()
            }),
            Ok(None) => AppSettings::default(),
            Err(err) => {
                warn!(error = %err, "Failed to read settings, using defaults");
                AppSettings::default()
            }
        }
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.set(SETTINGS_KEY, serde_json::to_value(settings)?)
    }

    /// Tracked addresses in insertion order.
    fn saved_addresses(&self) -> Vec<String> {
        match self.get(ADDRESSES_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "Failed to read saved addresses");
                Vec::new()
            }
        }
    }

    /// Track `address` (lowercased). Returns `false` if it was already tracked.
    fn save_address(&self, address: &str) -> Result<bool> {
        let address = address.trim().to_lowercase();
        let mut addresses = self.saved_addresses();
        if addresses.contains(&address) {
            return Ok(false);
        }
        addresses.push(address);
        self.set(ADDRESSES_KEY, serde_json::to_value(addresses)?)?;
        Ok(true)
    }

    /// Stop tracking `address`. Returns `false` if it was not tracked.
    fn remove_address(&self, address: &str) -> Result<bool> {
        let address = address.trim().to_lowercase();
        let mut addresses = self.saved_addresses();
        let before = addresses.len();
        addresses.retain(|a| *a != address);
        if addresses.len() == before {
            return Ok(false);
        }
        self.set(ADDRESSES_KEY, serde_json::to_value(addresses)?)?;
        Ok(true)
    }
}
