//! Polymarket adapter configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

/// Polymarket API configuration (`[polymarket]`).
#[derive(Debug, Clone, Deserialize)]
pub struct PolymarketConfig {
    /// Gamma API base URL (market discovery, volume, outcome prices).
    #[serde(default = "default_gamma_api_url")]
    pub gamma_api_url: String,
    /// Public event page base; alerts link to `{event_url}/{slug}`.
    #[serde(default = "default_event_url")]
    pub event_url: String,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_gamma_api_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

fn default_event_url() -> String {
    "https://polymarket.com/event".into()
}

impl Default for PolymarketConfig {
    fn default() -> Self {
        Self {
            gamma_api_url: default_gamma_api_url(),
            event_url: default_event_url(),
            http: HttpConfig::default(),
        }
    }
}
