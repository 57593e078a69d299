//! CoinGecko spot price feed.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use super::http::{HttpConfig, JsonClient};
use crate::domain::CryptoPrice;
use crate::error::{Error, Result};
use crate::port::PriceFeed;

/// One tracked asset: CoinGecko id plus display symbol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetConfig {
    pub id: String,
    pub symbol: String,
}

impl AssetConfig {
    fn new(id: &str, symbol: &str) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
        }
    }
}

/// Price feed configuration (`[prices]`).
#[derive(Debug, Clone, Deserialize)]
pub struct PriceFeedConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetConfig>,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_api_url() -> String {
    "https://api.coingecko.com/api/v3".into()
}

fn default_assets() -> Vec<AssetConfig> {
    vec![
        AssetConfig::new("bitcoin", "BTC"),
        AssetConfig::new("ethereum", "ETH"),
        AssetConfig::new("solana", "SOL"),
        AssetConfig::new("binancecoin", "BNB"),
    ]
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            assets: default_assets(),
            http: HttpConfig::default(),
        }
    }
}

/// Per-asset entry of `simple/price`.
#[derive(Debug, Deserialize)]
pub struct SimpleQuote {
    #[serde(default)]
    pub usd: Option<Decimal>,
    #[serde(default)]
    pub usd_24h_change: Option<Decimal>,
}

pub struct CoinGeckoClient {
    http: JsonClient,
    api_url: String,
    assets: Vec<AssetConfig>,
}

impl CoinGeckoClient {
    #[must_use]
    pub fn from_config(config: &PriceFeedConfig) -> Self {
        Self {
            http: JsonClient::from_config(&config.http),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            assets: config.assets.clone(),
        }
    }

    fn price_url(&self) -> String {
        let ids: Vec<&str> = self.assets.iter().map(|a| a.id.as_str()).collect();
        format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.api_url,
            ids.join(",")
        )
    }
}

/// Map a `simple/price` response onto the configured assets, in order.
///
/// Assets missing from the response or without a USD price are skipped.
pub fn prices_from_quotes(
    assets: &[AssetConfig],
    mut quotes: HashMap<String, SimpleQuote>,
) -> Vec<CryptoPrice> {
    assets
        .iter()
        .filter_map(|asset| {
            let quote = quotes.remove(&asset.id)?;
            let Some(price) = quote.usd else {
                debug!(asset = %asset.id, "Quote without USD price");
                return None;
            };
            Some(CryptoPrice {
                id: asset.id.clone(),
                symbol: asset.symbol.clone(),
                price,
                change_24h: quote.usd_24h_change.unwrap_or(Decimal::ZERO),
            })
        })
        .collect()
}

#[async_trait]
impl PriceFeed for CoinGeckoClient {
    async fn fetch_prices(&self) -> Result<Vec<CryptoPrice>> {
        if self.assets.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.price_url();
        info!(url = %url, "Fetching spot prices (CoinGecko)");

        let quotes: HashMap<String, SimpleQuote> = self.http.get_with_retry(&url).await?;
        let prices = prices_from_quotes(&self.assets, quotes);
        if prices.is_empty() {
            return Err(Error::Parse("price response contained no tracked assets".into()));
        }
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_url_lists_assets() {
        let client = CoinGeckoClient::from_config(&PriceFeedConfig::default());
        assert_eq!(
            client.price_url(),
            "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum,solana,binancecoin&vs_currencies=usd&include_24hr_change=true"
        );
    }

    #[test]
    fn quotes_map_to_configured_order() {
        let json = r#"{
            "ethereum": {"usd": 3200.5, "usd_24h_change": -1.25},
            "bitcoin": {"usd": 64000, "usd_24h_change": 2.5},
            "solana": {"usd_24h_change": 4.0}
        }"#;
        let quotes: HashMap<String, SimpleQuote> = serde_json::from_str(json).unwrap();
        let prices = prices_from_quotes(&default_assets(), quotes);

        let symbols: Vec<_> = prices.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH"]);
        assert_eq!(prices[0].price, dec!(64000));
        assert_eq!(prices[1].change_24h, dec!(-1.25));
        assert!(!prices[1].is_up());
    }

    #[test]
    fn config_overrides_assets() {
        let config: PriceFeedConfig = toml::from_str(
            r#"
            assets = [{ id = "dogecoin", symbol = "DOGE" }]
            "#,
        )
        .unwrap();
        assert_eq!(config.assets, vec![AssetConfig::new("dogecoin", "DOGE")]);
        assert_eq!(config.api_url, default_api_url());
    }
}
