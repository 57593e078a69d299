//! Discord webhook notifier.
//!
//! The webhook URL is resolved on every delivery so a URL saved through
//! `edgewatch settings set-webhook` takes effect without a restart. The
//! `DISCORD_WEBHOOK_URL` environment variable, when set, wins over the
//! stored value.

pub mod format;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use tracing::{debug, error, info, warn};

use self::format::whale_payload;
use crate::domain::{MarketSnapshot, TradeAlert};
use crate::port::{AlertNotifier, SettingsStore};

/// Environment variable overriding the stored webhook URL.
pub const WEBHOOK_ENV: &str = "DISCORD_WEBHOOK_URL";

const WEBHOOK_PREFIX: &str = "https://discord.com";

/// Whether `url` looks like a Discord webhook we are willing to post to.
#[must_use]
pub fn is_discord_webhook(url: &str) -> bool {
    url.starts_with(WEBHOOK_PREFIX)
}

pub struct DiscordNotifier {
    http: HttpClient,
    settings: Arc<dyn SettingsStore>,
    webhook_override: Option<String>,
    event_url: String,
}

impl DiscordNotifier {
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsStore>, event_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            settings,
            webhook_override: None,
            event_url: event_url.into(),
        }
    }

    /// Read the override from [`WEBHOOK_ENV`].
    #[must_use]
    pub fn with_env_override(self) -> Self {
        let url = std::env::var(WEBHOOK_ENV).ok();
        self.with_webhook_override(url)
    }

    #[must_use]
    pub fn with_webhook_override(mut self, url: Option<String>) -> Self {
        self.webhook_override = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Webhook URL to use right now, if any.
    #[must_use]
    pub fn webhook_url(&self) -> Option<String> {
        let url = self
            .webhook_override
            .clone()
            .unwrap_or_else(|| self.settings.settings().discord_webhook_url);
        let url = url.trim().to_string();
        (!url.is_empty()).then_some(url)
    }
}

#[async_trait]
impl AlertNotifier for DiscordNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn deliver(&self, alert: &TradeAlert, market: Option<&MarketSnapshot>) -> bool {
        let Some(url) = self.webhook_url() else {
            debug!("No Discord webhook configured, skipping");
            return false;
        };
        if !is_discord_webhook(&url) {
            debug!("Webhook URL is not a Discord URL, skipping");
            return false;
        }

        let payload = whale_payload(alert, market, &self.event_url, Utc::now());
        let response = self.http.post(&url).json(&payload).send().await;

        match response {
            Ok(response) if response.status().is_success() => {
                info!(alert_id = %alert.id, "Discord notification dispatched");
                true
            }
            Ok(response) => {
                error!(
                    alert_id = %alert.id,
                    status = %response.status(),
                    "Failed to send Discord alert"
                );
                false
            }
            Err(err) => {
                error!(alert_id = %alert.id, error = %err, "Failed to send Discord alert");
                false
            }
        }
    }
}
