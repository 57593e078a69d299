//! Handlers for `settings` subcommands.

use rust_decimal::Decimal;
use serde_json::json;

use crate::adapter::inbound::cli::command::SettingsCommand;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::notifier::discord::{is_discord_webhook, WEBHOOK_ENV};
use crate::domain::AppSettings;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::SettingsStore;

/// Webhook URL with its token hidden.
pub fn mask_webhook(url: &str) -> String {
    if url.is_empty() {
        return "not set".to_string();
    }
    match url.rsplit_once('/') {
        Some((head, token)) if token.chars().count() > 4 => {
            let visible: String = token.chars().take(4).collect();
            format!("{head}/{visible}…")
        }
        _ => "set".to_string(),
    }
}

#[allow(clippy::result_large_err)]
pub fn execute(config: &Config, command: &SettingsCommand) -> Result<()> {
    let store = bootstrap::build_settings_store(config);
    apply(store.as_ref(), command)?;
    show(store.as_ref(), config, !matches!(command, SettingsCommand::Show));
    Ok(())
}

/// Apply a settings change to `store`. `Show` changes nothing.
#[allow(clippy::result_large_err)]
pub fn apply(store: &dyn SettingsStore, command: &SettingsCommand) -> Result<Option<AppSettings>> {
    let mut settings = store.settings();
    match command {
        SettingsCommand::Show => return Ok(None),
        SettingsCommand::SetThreshold { value } => {
            if *value <= Decimal::ZERO {
                return Err(invalid("whale_threshold", "must be greater than 0"));
            }
            settings.whale_threshold = *value;
        }
        SettingsCommand::SetWebhook { url } => {
            let url = url.trim();
            if !url.is_empty() && !is_discord_webhook(url) {
                return Err(invalid(
                    "discord_webhook_url",
                    "must start with https://discord.com",
                ));
            }
            settings.discord_webhook_url = url.to_string();
        }
        SettingsCommand::SetInterval { millis } => {
            if *millis == 0 {
                return Err(invalid("auto_refresh_interval", "must be greater than 0"));
            }
            settings.auto_refresh_interval_ms = *millis;
        }
    }
    store.save_settings(&settings)?;
    Ok(Some(settings))
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

fn show(store: &dyn SettingsStore, config: &Config, updated: bool) {
    let settings = store.settings();
    let addresses = store.saved_addresses();
    let env_override = std::env::var(WEBHOOK_ENV).ok().filter(|v| !v.is_empty());

    if output::is_json() {
        let stored = serde_json::to_value(&settings).unwrap_or_default();
        output::json_output(json!({
            "command": "settings",
            "updated": updated,
            "settings": {
                "whaleThreshold": stored["whaleThreshold"].clone(),
                "autoRefreshInterval": settings.auto_refresh_interval_ms,
                "webhookConfigured": !settings.discord_webhook_url.is_empty(),
                "webhookFromEnv": env_override.is_some(),
            },
            "savedAddresses": addresses,
        }));
        return;
    }

    if updated {
        output::success("Settings saved");
    }
    if !settings.is_valid() {
        output::warning("Stored threshold or refresh interval is not positive");
    }
    output::section("Settings");
    output::field("Path", output::muted(config.settings.resolved_path().display()));
    output::field("Threshold", format!("${}", settings.whale_threshold));
    output::field("Refresh", format!("{} ms", settings.auto_refresh_interval_ms));
    output::field("Webhook", mask_webhook(&settings.discord_webhook_url));
    if env_override.is_some() {
        output::note(&format!("{WEBHOOK_ENV} is set and takes precedence"));
    }

    output::section("Tracked addresses");
    if addresses.is_empty() {
        output::note("none");
    }
    for address in &addresses {
        output::lines(address);
    }
}
