//! Outcome-sum arbitrage detection.
//!
//! Every outcome of a market pays out exactly once, so the prices of all
//! outcomes should sum to 1.0. A sum outside the tolerance band flags the
//! market:
//!
//! - sum below the band: buying every outcome costs less than the payout
//! - sum above the band: the book is overpriced, implying sell pressure
//!
//! Underpriced sums are the stronger signal and rank `HIGH` once they drop
//! below `high_severity_below`.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{ArbitrageSignal, MarketSnapshot, Severity, SignalKind};

/// Thresholds for outcome-sum detection.
#[derive(Debug, Clone, Deserialize)]
pub struct ArbitrageConfig {
    /// Sums strictly below this are flagged.
    #[serde(default = "default_lower_bound")]
    pub lower_bound: Decimal,

    /// Sums strictly above this are flagged.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: Decimal,

    /// Flagged sums strictly below this rank `HIGH`, all others `MEDIUM`.
    #[serde(default = "default_high_severity_below")]
    pub high_severity_below: Decimal,

    /// Maximum number of signals returned by one detection pass.
    #[serde(default = "default_max_signals")]
    pub max_signals: usize,

    /// Markets with fewer priced outcomes are skipped.
    #[serde(default = "default_min_outcomes")]
    pub min_outcomes: usize,
}

fn default_lower_bound() -> Decimal {
    Decimal::new(96, 2) // 0.96
}

fn default_upper_bound() -> Decimal {
    Decimal::new(104, 2) // 1.04
}

fn default_high_severity_below() -> Decimal {
    Decimal::new(98, 2) // 0.98
}

const fn default_max_signals() -> usize {
    5
}

const fn default_min_outcomes() -> usize {
    2
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            high_severity_below: default_high_severity_below(),
            max_signals: default_max_signals(),
            min_outcomes: default_min_outcomes(),
        }
    }
}

impl ArbitrageConfig {
    /// Whether `sum` lies inside the tolerance band (bounds inclusive).
    #[must_use]
    pub fn within_tolerance(&self, sum: Decimal) -> bool {
        sum >= self.lower_bound && sum <= self.upper_bound
    }

    /// Severity for a flagged sum.
    #[must_use]
    pub fn severity_for(&self, sum: Decimal) -> Severity {
        if sum < self.high_severity_below {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

/// Severity for a flagged sum under the default thresholds.
#[must_use]
pub fn classify_severity(sum: Decimal) -> Severity {
    ArbitrageConfig::default().severity_for(sum)
}

/// Check one market for an outcome-sum discrepancy.
///
/// Returns `None` when the market is within tolerance or has too few
/// priced outcomes to mean anything.
#[must_use]
pub fn check_single_market_arbitrage(
    market: &MarketSnapshot,
    config: &ArbitrageConfig,
) -> Option<ArbitrageSignal> {
    if market.priced_outcome_count() < config.min_outcomes {
        debug!(
            market_id = %market.id(),
            priced_outcomes = market.priced_outcome_count(),
            "Skipping market with too few priced outcomes"
        );
        return None;
    }

    let Some(sum) = market.outcome_sum() else {
        debug!(market_id = %market.id(), "Skipping market whose outcome sum overflows");
        return None;
    };
    if config.within_tolerance(sum) {
        return None;
    }

    let Some((expected_return, sum_percent)) = discrepancy_percentages(sum) else {
        debug!(market_id = %market.id(), %sum, "Skipping market with out-of-range outcome sum");
        return None;
    };
    let description = format!(
        "Market outcomes sum to {}%. Inefficient book liquidity detected.",
        sum_percent.round_dp(1)
    );

    Some(ArbitrageSignal::new(
        market.id().clone(),
        market.name(),
        SignalKind::SumDiscrepancy,
        config.severity_for(sum),
        sum,
        expected_return,
        description,
    ))
}

/// `(|1 - sum| * 100, sum * 100)`, or `None` if either overflows.
fn discrepancy_percentages(sum: Decimal) -> Option<(Decimal, Decimal)> {
    let expected_return = Decimal::ONE
        .checked_sub(sum)?
        .abs()
        .checked_mul(Decimal::ONE_HUNDRED)?;
    let sum_percent = sum.checked_mul(Decimal::ONE_HUNDRED)?;
    Some((expected_return, sum_percent))
}

/// Scan a batch of markets and return the largest discrepancies.
///
/// Signals are ordered by expected return, largest first; ties keep input
/// order. At most `config.max_signals` are returned and each market
/// contributes at most one signal.
#[must_use]
pub fn detect_arbitrage(markets: &[MarketSnapshot], config: &ArbitrageConfig) -> Vec<ArbitrageSignal> {
    let mut signals: Vec<ArbitrageSignal> = markets
        .iter()
        .filter_map(|market| check_single_market_arbitrage(market, config))
        .collect();

    signals.sort_by(|a, b| b.expected_return().cmp(&a.expected_return()));
    signals.truncate(config.max_signals);
    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketId;
    use rust_decimal_macros::dec;

    fn market_with_prices(id: &str, prices: &[Decimal]) -> MarketSnapshot {
        let outcomes = (0..prices.len()).map(|i| format!("Outcome {i}")).collect();
        MarketSnapshot::new(
            MarketId::from(id),
            format!("Market {id}?"),
            outcomes,
            prices.to_vec(),
            dec!(1000),
        )
    }

    fn binary(id: &str, sum: Decimal) -> MarketSnapshot {
        market_with_prices(id, &[dec!(0.5), sum - dec!(0.5)])
    }

    #[test]
    fn test_within_band_is_not_flagged() {
        let config = ArbitrageConfig::default();
        for sum in [dec!(0.96), dec!(0.99), dec!(1.00), dec!(1.02), dec!(1.04)] {
            assert!(
                check_single_market_arbitrage(&binary("m", sum), &config).is_none(),
                "sum {sum} should be within tolerance"
            );
        }
    }

    #[test]
    fn test_underpriced_sum_is_high() {
        let signal =
            check_single_market_arbitrage(&binary("m", dec!(0.90)), &ArbitrageConfig::default())
                .unwrap();
        assert_eq!(signal.severity(), Severity::High);
        assert_eq!(signal.expected_return(), dec!(10));
        assert_eq!(signal.kind(), SignalKind::SumDiscrepancy);
    }

    #[test]
    fn test_overpriced_sum_is_medium() {
        let signal =
            check_single_market_arbitrage(&binary("m", dec!(1.05)), &ArbitrageConfig::default())
                .unwrap();
        assert_eq!(signal.severity(), Severity::Medium);
        assert_eq!(signal.expected_return(), dec!(5));
    }

    #[test]
    fn test_classify_severity() {
        assert_eq!(classify_severity(dec!(0.90)), Severity::High);
        assert_eq!(classify_severity(dec!(0.979)), Severity::High);
        assert_eq!(classify_severity(dec!(0.98)), Severity::Medium);
        assert_eq!(classify_severity(dec!(1.03)), Severity::Medium);
    }

    #[test]
    fn test_description_reports_sum_percentage() {
        let signal =
            check_single_market_arbitrage(&binary("m", dec!(0.95)), &ArbitrageConfig::default())
                .unwrap();
        assert!(signal.description().contains("95.0%"), "{}", signal.description());
    }

    #[test]
    fn test_empty_market_is_ineligible() {
        let market = market_with_prices("empty", &[]);
        assert!(check_single_market_arbitrage(&market, &ArbitrageConfig::default()).is_none());
    }

    #[test]
    fn test_single_outcome_market_is_ineligible() {
        let market = market_with_prices("one", &[dec!(0.3)]);
        assert!(check_single_market_arbitrage(&market, &ArbitrageConfig::default()).is_none());
    }

    #[test]
    fn test_min_outcomes_zero_restores_empty_market_flag() {
        let config = ArbitrageConfig {
            min_outcomes: 0,
            ..ArbitrageConfig::default()
        };
        let signal = check_single_market_arbitrage(&market_with_prices("empty", &[]), &config)
            .unwrap();
        assert_eq!(signal.severity(), Severity::High);
        assert_eq!(signal.expected_return(), dec!(100));
    }

    #[test]
    fn test_detect_sorts_and_filters() {
        let markets: Vec<_> = [dec!(0.80), dec!(0.70), dec!(1.05), dec!(1.00), dec!(0.99)]
            .iter()
            .enumerate()
            .map(|(i, sum)| binary(&format!("m{i}"), *sum))
            .collect();

        let signals = detect_arbitrage(&markets, &ArbitrageConfig::default());
        let returns: Vec<_> = signals.iter().map(|s| s.expected_return()).collect();
        assert_eq!(returns, vec![dec!(30), dec!(20), dec!(5)]);

        let ids: Vec<_> = signals.iter().map(|s| s.market_id().as_str()).collect();
        assert_eq!(ids, vec!["m1", "m0", "m2"]);
    }

    #[test]
    fn test_detect_caps_at_max_signals() {
        let markets: Vec<_> = (0..8)
            .map(|i| binary(&format!("m{i}"), dec!(0.50) + Decimal::new(i, 2)))
            .collect();
        let signals = detect_arbitrage(&markets, &ArbitrageConfig::default());
        assert_eq!(signals.len(), 5);
        assert_eq!(signals[0].market_id().as_str(), "m0");
        assert!(signals
            .windows(2)
            .all(|w| w[0].expected_return() >= w[1].expected_return()));
    }

    #[test]
    fn test_detect_ties_keep_input_order() {
        let markets = vec![binary("first", dec!(0.90)), binary("second", dec!(1.10))];
        let signals = detect_arbitrage(&markets, &ArbitrageConfig::default());
        let ids: Vec<_> = signals.iter().map(|s| s.market_id().as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_oversized_price_is_skipped_not_fatal() {
        let huge = crate::domain::money::parse_lenient("1000000000000000000000000000");
        let markets = vec![
            market_with_prices("huge", &[huge, Decimal::ZERO]),
            market_with_prices("max", &[Decimal::MAX, dec!(1)]),
            binary("cheap", dec!(0.90)),
        ];

        let signals = detect_arbitrage(&markets, &ArbitrageConfig::default());
        let ids: Vec<_> = signals.iter().map(|s| s.market_id().as_str()).collect();
        assert_eq!(ids, vec!["cheap"]);
    }

    #[test]
    fn test_detect_empty_input() {
        assert!(detect_arbitrage(&[], &ArbitrageConfig::default()).is_empty());
    }
}
