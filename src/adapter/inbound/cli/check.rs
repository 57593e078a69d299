//! Handler for the `check` command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::notifier::discord::WEBHOOK_ENV;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file without starting the monitor.
///
/// A missing file is not an error: the defaults are validated instead.
#[allow(clippy::result_large_err)]
pub fn execute(path: &Path) -> Result<()> {
    let exists = path.exists();
    let config = Config::load_or_default(path)?;
    let webhook_env = std::env::var(WEBHOOK_ENV).is_ok_and(|v| !v.is_empty());

    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "path": path.display().to_string(),
            "exists": exists,
            "valid": true,
            "webhook_env": webhook_env,
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    if exists {
        output::success("Configuration file is valid");
    } else {
        output::warning("Configuration file not found, using defaults");
    }

    output::section("Summary");
    output::field("Gamma API", &config.polymarket.gamma_api_url);
    output::field("Prices", &config.prices.api_url);
    output::field(
        "Band",
        format!(
            "{} .. {}",
            config.detection.lower_bound, config.detection.upper_bound
        ),
    );
    output::field("Markets", config.monitor.market_limit);
    output::field("Settings", config.settings.resolved_path().display());
    if webhook_env {
        output::success(&format!("{WEBHOOK_ENV} detected"));
    } else {
        output::field("Webhook", "from settings store");
    }

    Ok(())
}
