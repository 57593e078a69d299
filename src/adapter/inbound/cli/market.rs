//! Handler for the `market` command.

use chrono::Utc;
use serde_json::json;
use tabled::Table;

use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::trades::{TapeRow, TraderRow};
use crate::application::activity::{market_trades, top_traders, TOP_TRADERS};
use crate::application::arbitrage::check_single_market_arbitrage;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Look up one market by slug, run the single-market check on it, and show
/// its recent fills with the best-performing traders behind them.
pub async fn execute(config: &Config, slug: &str) -> Result<()> {
    let slug = slug.trim();
    let source = bootstrap::build_market_source(config);
    let Some(market) = source.fetch_market_by_slug(slug).await? else {
        output::error(&format!("No market found for slug {slug}"));
        return Err(Error::NotFound(slug.to_string()));
    };
    let signal = check_single_market_arbitrage(&market, &config.detection);

    let now = Utc::now();
    let trades = market_trades(&market, &mut bootstrap::build_rng(config), now);
    let traders = top_traders(&trades, TOP_TRADERS, now);
    let threshold = bootstrap::build_settings_store(config)
        .settings()
        .whale_threshold;

    if output::is_json() {
        output::json_output(json!({
            "command": "market",
            "market": market,
            "outcome_sum": market.outcome_sum(),
            "signal": signal,
            "trades": trades,
            "top_traders": traders,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Market", market.name());
    output::field("ID", market.id());
    if let Some(slug) = market.slug() {
        output::field(
            "URL",
            output::highlight(format!(
                "{}/{}",
                config.polymarket.event_url.trim_end_matches('/'),
                slug
            )),
        );
    }
    output::field("Volume", market.volume().round_dp(0));
    if let Some(liquidity) = market.liquidity() {
        output::field("Liquidity", liquidity.round_dp(0));
    }

    output::section("Outcomes");
    for (name, price) in market.outcomes().iter().zip(market.outcome_prices()) {
        output::field(name, price);
    }
    match market.outcome_sum() {
        Some(sum) => output::field("Sum", sum),
        None => output::field("Sum", output::negative("overflow")),
    }
    if !market.is_well_formed() {
        output::warning(&format!(
            "{} outcome labels for {} prices",
            market.outcomes().len(),
            market.priced_outcome_count()
        ));
    }

    match signal {
        Some(signal) => {
            output::warning(&format!(
                "{} severity discrepancy, {}% expected return",
                signal.severity(),
                signal.expected_return().round_dp(2)
            ));
            output::note(signal.description());
        }
        None => output::success("Outcome prices within tolerance"),
    }

    output::section("Recent trades");
    let rows: Vec<TapeRow> = trades
        .iter()
        .map(|t| TapeRow::new(t, threshold, now))
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::section("Top traders");
    let rows: Vec<TraderRow> = traders.iter().map(TraderRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    Ok(())
}
