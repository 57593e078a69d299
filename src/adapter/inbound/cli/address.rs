//! Handler for the `address` command.

use chrono::Utc;
use serde_json::json;
use tabled::Table;

use crate::adapter::inbound::cli::command::AddressArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::trades::{format_percent, HistoryRow};
use crate::application::activity::address_trades;
use crate::application::address::profile_address;
use crate::domain::AddressTier;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// `0x` followed by 40 hex digits.
pub fn is_wallet_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[allow(clippy::result_large_err)]
pub fn execute(config: &Config, args: &AddressArgs) -> Result<()> {
    let address = args.address.trim().to_lowercase();
    if !is_wallet_address(&address) {
        return Err(ConfigError::InvalidValue {
            field: "address",
            reason: "expected 0x followed by 40 hex digits".to_string(),
        }
        .into());
    }

    let now = Utc::now();
    let stats = profile_address(&address, now);
    let trades = address_trades(&address, &mut bootstrap::build_rng(config), now);

    let tracked = if args.track || args.untrack {
        let store = bootstrap::build_settings_store(config);
        Some(if args.track {
            store.save_address(&address)?
        } else {
            store.remove_address(&address)?
        })
    } else {
        None
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "address",
            "stats": stats,
            "trades": trades,
            "changed": tracked,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Address", &stats.address);
    let tier = match stats.tier {
        AddressTier::Whale => output::highlight(stats.tier),
        _ => stats.tier.to_string(),
    };
    output::field("Tier", tier);
    output::field("Win rate", format_percent(stats.win_rate));
    output::field("Volume", stats.total_volume.round_dp(0));
    output::field("Trades", stats.total_trades);
    output::field("PnL", output::positive(stats.pnl.round_dp(2)));
    output::field(
        "Last active",
        output::muted(stats.last_active.format("%Y-%m-%d %H:%M UTC")),
    );

    output::section("Recent trades");
    let rows: Vec<HistoryRow> = trades.iter().map(|t| HistoryRow::new(t, now)).collect();
    output::lines(&Table::new(rows).to_string());

    match (args.track, tracked) {
        (true, Some(true)) => output::success("Address tracked"),
        (true, Some(false)) => output::note("Address already tracked"),
        (false, Some(true)) => output::success("Address removed from tracking"),
        (false, Some(false)) => output::note("Address was not tracked"),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_checksummed_after_lowercasing() {
        assert!(is_wallet_address(
            "0x742d35cc6634c0532925a3b844bc454e4438f44e"
        ));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_wallet_address("742d35cc6634c0532925a3b844bc454e4438f44e"));
        assert!(!is_wallet_address("0x742d35"));
        assert!(!is_wallet_address(
            "0x742d35cc6634c0532925a3b844bc454e4438f44z"
        ));
    }
}
