//! Handler for the `scan` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ScanArgs;
use crate::adapter::inbound::cli::output;
use crate::application::arbitrage::detect_arbitrage;
use crate::domain::{ArbitrageSignal, Severity};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
pub(crate) struct SignalRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Severity")]
    severity: &'static str,
    #[tabled(rename = "Sum")]
    sum: String,
    #[tabled(rename = "Return %")]
    expected_return: String,
}

impl From<&ArbitrageSignal> for SignalRow {
    fn from(signal: &ArbitrageSignal) -> Self {
        Self {
            market: truncate(signal.market_name(), 60),
            severity: signal.severity().as_str(),
            sum: signal.outcome_sum().round_dp(4).to_string(),
            expected_return: signal.expected_return().round_dp(2).to_string(),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}

/// Fetch one batch of markets and print the signals found.
pub async fn execute(config: &Config, args: &ScanArgs) -> Result<()> {
    let source = bootstrap::build_market_source(config);
    let limit = args.limit.unwrap_or(config.monitor.market_limit);
    let markets = source.fetch_markets(limit).await?;
    let signals = detect_arbitrage(&markets, &config.detection);

    if output::is_json() {
        output::json_output(json!({
            "command": "scan",
            "markets": markets.len(),
            "signals": signals,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Source", source.source_name());
    output::field("Markets", markets.len());

    if signals.is_empty() {
        output::success("All markets within tolerance");
        return Ok(());
    }

    let high = signals
        .iter()
        .filter(|s| s.severity() == Severity::High)
        .count();
    output::field(
        "Signals",
        format!("{} ({} high)", signals.len(), output::negative(high)),
    );
    output::section("Signals");
    let rows: Vec<SignalRow> = signals.iter().map(SignalRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketId, SignalKind};
    use rust_decimal_macros::dec;

    #[test]
    fn row_formats_signal() {
        let signal = ArbitrageSignal::new(
            MarketId::new("m1"),
            "Will it rain?",
            SignalKind::SumDiscrepancy,
            Severity::High,
            dec!(0.9512),
            dec!(4.88),
            "x",
        );
        let row = SignalRow::from(&signal);
        assert_eq!(row.market, "Will it rain?");
        assert_eq!(row.severity, "HIGH");
        assert_eq!(row.sum, "0.9512");
        assert_eq!(row.expected_return, "4.88");
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "a".repeat(80);
        let short = truncate(&name, 60);
        assert_eq!(short.chars().count(), 60);
        assert!(short.ends_with("..."));
        assert_eq!(truncate("short", 60), "short");
    }
}
