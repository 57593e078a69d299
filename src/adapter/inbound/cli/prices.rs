//! Handler for the `prices` command.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::CryptoPrice;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "Asset")]
    symbol: String,
    #[tabled(rename = "USD")]
    price: String,
    #[tabled(rename = "24h")]
    change: String,
}

fn format_change(change: Decimal) -> String {
    let rounded = change.round_dp(2);
    if change >= Decimal::ZERO {
        format!("+{rounded}%")
    } else {
        format!("{rounded}%")
    }
}

impl From<&CryptoPrice> for PriceRow {
    fn from(price: &CryptoPrice) -> Self {
        Self {
            symbol: price.symbol.clone(),
            price: price.price.round_dp(2).to_string(),
            change: format_change(price.change_24h),
        }
    }
}

pub async fn execute(config: &Config) -> Result<()> {
    let feed = bootstrap::build_price_feed(config);
    let prices = feed.fetch_prices().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "prices",
            "prices": prices,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if prices.is_empty() {
        output::warning("No prices returned");
        return Ok(());
    }

    let rows: Vec<PriceRow> = prices.iter().map(PriceRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    let gainers = prices.iter().filter(|p| p.is_up()).count();
    output::field(
        "24h",
        format!(
            "{} up, {} down",
            output::positive(gainers),
            output::negative(prices.len() - gainers)
        ),
    );
    Ok(())
}
