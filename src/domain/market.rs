//! Market snapshot domain type.
//!
//! A [`MarketSnapshot`] is the normalized, exchange-agnostic view of a
//! tradable market at one refresh: its outcomes, the price of each outcome,
//! and traded volume. Adapters build snapshots; the detection core only
//! reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::MarketId;
use super::money::{Price, Volume};

/// A point-in-time view of a prediction market.
///
/// `outcomes` and `outcome_prices` are parallel-indexed. The equal-length
/// invariant is expected from well-formed feeds but not enforced here;
/// detection only ever sums the prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    id: MarketId,
    name: String,
    outcomes: Vec<String>,
    outcome_prices: Vec<Price>,
    volume: Volume,
    liquidity: Option<Volume>,
    slug: Option<String>,
}

impl MarketSnapshot {
    /// Create a snapshot with outcomes and their prices.
    ///
    /// Negative volume is clamped to zero.
    pub fn new(
        id: MarketId,
        name: impl Into<String>,
        outcomes: Vec<String>,
        outcome_prices: Vec<Price>,
        volume: Volume,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            outcomes,
            outcome_prices,
            volume: volume.max(Decimal::ZERO),
            liquidity: None,
            slug: None,
        }
    }

    /// Attach current liquidity depth.
    #[must_use]
    pub fn with_liquidity(mut self, liquidity: Volume) -> Self {
        self.liquidity = Some(liquidity);
        self
    }

    /// Attach the URL slug used to link to the market page.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> &MarketId {
        &self.id
    }

    /// Human-readable question or title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    #[must_use]
    pub fn outcome_prices(&self) -> &[Price] {
        &self.outcome_prices
    }

    /// 24h traded volume in quote currency.
    #[must_use]
    pub const fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub const fn liquidity(&self) -> Option<Volume> {
        self.liquidity
    }

    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Sum of all outcome prices. Zero for a market without prices, `None`
    /// when the sum does not fit in a `Decimal`.
    #[must_use]
    pub fn outcome_sum(&self) -> Option<Decimal> {
        self.outcome_prices
            .iter()
            .try_fold(Decimal::ZERO, |sum, price| sum.checked_add(*price))
    }

    /// Number of priced outcomes.
    #[must_use]
    pub fn priced_outcome_count(&self) -> usize {
        self.outcome_prices.len()
    }

    /// Whether outcome labels and prices line up one-to-one.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.outcomes.len() == self.outcome_prices.len()
    }

    /// Price of the first listed outcome, if any.
    #[must_use]
    pub fn first_price(&self) -> Option<Price> {
        self.outcome_prices.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn binary(yes: Decimal, no: Decimal) -> MarketSnapshot {
        MarketSnapshot::new(
            MarketId::from("market-1"),
            "Will it rain tomorrow?",
            vec!["Yes".into(), "No".into()],
            vec![yes, no],
            dec!(1500),
        )
    }

    #[test]
    fn accessors_return_constructor_values() {
        let market = binary(dec!(0.6), dec!(0.4)).with_slug("rain-tomorrow");
        assert_eq!(market.id().as_str(), "market-1");
        assert_eq!(market.name(), "Will it rain tomorrow?");
        assert_eq!(market.outcomes(), ["Yes".to_string(), "No".to_string()]);
        assert_eq!(market.volume(), dec!(1500));
        assert_eq!(market.slug(), Some("rain-tomorrow"));
        assert_eq!(market.liquidity(), None);
    }

    #[test]
    fn outcome_sum_adds_all_prices() {
        assert_eq!(binary(dec!(0.62), dec!(0.35)).outcome_sum(), Some(dec!(0.97)));
    }

    #[test]
    fn outcome_sum_overflow_is_none() {
        assert_eq!(binary(Decimal::MAX, dec!(1)).outcome_sum(), None);
    }

    #[test]
    fn outcome_sum_of_empty_market_is_zero() {
        let market = MarketSnapshot::new(
            MarketId::from("empty"),
            "No outcomes",
            vec![],
            vec![],
            Decimal::ZERO,
        );
        assert_eq!(market.outcome_sum(), Some(Decimal::ZERO));
        assert_eq!(market.first_price(), None);
        assert!(market.is_well_formed());
    }

    #[test]
    fn negative_volume_is_clamped() {
        let market = MarketSnapshot::new(
            MarketId::from("m"),
            "q",
            vec![],
            vec![],
            dec!(-10),
        );
        assert_eq!(market.volume(), Decimal::ZERO);
    }

    #[test]
    fn mismatched_lengths_are_not_well_formed() {
        let market = MarketSnapshot::new(
            MarketId::from("m"),
            "q",
            vec!["Yes".into(), "No".into()],
            vec![dec!(0.5)],
            Decimal::ZERO,
        );
        assert!(!market.is_well_formed());
        assert_eq!(market.priced_outcome_count(), 1);
    }
}
