//! Gamma API response types.
//!
//! Gamma is inconsistent about encodings: `outcomes` and `outcomePrices`
//! arrive either as JSON arrays or as JSON-encoded strings of arrays, and
//! numeric fields arrive as strings or numbers. Fields are kept as raw
//! [`Value`]s and normalized on conversion.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::money::parse_lenient;
use crate::domain::{MarketId, MarketSnapshot};

/// Market data from the Gamma API.
///
/// Response format for `/markets`: flat JSON array (no wrapper object).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, rename = "custom_slug")]
    pub custom_slug: Option<String>,
    /// Only `Some(true)` counts as active.
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub closed: bool,
    /// Outcome names: array or JSON-encoded array.
    #[serde(default)]
    pub outcomes: Value,
    /// Outcome prices: array or JSON-encoded array of strings or numbers.
    #[serde(default)]
    pub outcome_prices: Value,
    /// Lifetime volume, usually a decimal string.
    #[serde(default)]
    pub volume: Value,
    #[serde(default)]
    pub volume_num: Value,
    #[serde(default)]
    pub liquidity: Value,
    /// Parent events. The first event's slug builds the public URL.
    #[serde(default)]
    pub events: Vec<GammaEventRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GammaEventRef {
    #[serde(default)]
    pub slug: Option<String>,
}

/// Event data from `/events`.
///
/// Nested markets are kept raw and decoded one by one, so a malformed
/// market does not hide its siblings.
#[derive(Debug, Clone, Deserialize)]
pub struct GammaEvent {
    #[serde(default)]
    pub slug: Value,
    #[serde(default)]
    pub markets: Value,
}

impl GammaEvent {
    /// First active market of the event, else its first decodable market.
    #[must_use]
    pub fn best_market(self) -> Option<GammaMarket> {
        let markets = match self.markets {
            Value::Array(items) => GammaMarket::decode_batch(items),
            _ => Vec::new(),
        };
        let position = markets.iter().position(GammaMarket::is_active).unwrap_or(0);
        markets.into_iter().nth(position)
    }
}

impl GammaMarket {
    /// Decode each raw entry on its own, dropping the ones that do not fit.
    #[must_use]
    pub fn decode_batch(raw: Vec<Value>) -> Vec<Self> {
        raw.into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<Self>(item) {
                Ok(market) => Some(market),
                Err(e) => {
                    debug!(index, error = %e, "Skipping malformed Gamma market");
                    None
                }
            })
            .collect()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active == Some(true)
    }

    /// Market identifier: `id`, falling back to `conditionId`.
    #[must_use]
    pub fn market_id(&self) -> String {
        scalar_to_string(&self.id)
            .or_else(|| self.condition_id.clone())
            .unwrap_or_default()
    }

    /// Slug used for the public page: event slug, then market slug, then id.
    #[must_use]
    pub fn page_slug(&self) -> String {
        self.events
            .first()
            .and_then(|event| event.slug.clone())
            .filter(|slug| !slug.is_empty())
            .or_else(|| self.slug.clone().filter(|slug| !slug.is_empty()))
            .or_else(|| self.custom_slug.clone().filter(|slug| !slug.is_empty()))
            .unwrap_or_else(|| self.market_id())
    }

    /// Outcome names.
    #[must_use]
    pub fn outcome_names(&self) -> Vec<String> {
        self.list(&self.outcomes, "outcomes")
            .iter()
            .map(|v| scalar_to_string(v).unwrap_or_default())
            .collect()
    }

    /// Outcome prices. Entries that do not parse become zero.
    #[must_use]
    pub fn outcome_prices(&self) -> Vec<Decimal> {
        self.list(&self.outcome_prices, "outcome_prices")
            .iter()
            .map(|v| scalar_to_string(v).map_or(Decimal::ZERO, |s| parse_lenient(&s)))
            .collect()
    }

    #[must_use]
    pub fn volume(&self) -> Decimal {
        scalar_to_string(&self.volume)
            .or_else(|| scalar_to_string(&self.volume_num))
            .map_or(Decimal::ZERO, |s| parse_lenient(&s))
    }

    #[must_use]
    pub fn liquidity(&self) -> Option<Decimal> {
        scalar_to_string(&self.liquidity).map(|s| parse_lenient(&s))
    }

    fn list(&self, raw: &Value, field: &'static str) -> Vec<Value> {
        match raw {
            Value::Array(items) => items.clone(),
            Value::String(encoded) => serde_json::from_str::<Vec<Value>>(encoded)
                .map_err(|e| {
                    debug!(
                        error = %e,
                        raw = %encoded,
                        market_id = %self.market_id(),
                        field,
                        "Failed to parse encoded list"
                    );
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Normalize into a domain snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> MarketSnapshot {
        let id = MarketId::new(self.market_id());
        let name = self.question.clone().unwrap_or_default();
        let snapshot = MarketSnapshot::new(
            id,
            name,
            self.outcome_names(),
            self.outcome_prices(),
            self.volume(),
        )
        .with_slug(self.page_slug());

        match self.liquidity() {
            Some(liquidity) => snapshot.with_liquidity(liquidity),
            None => snapshot,
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
