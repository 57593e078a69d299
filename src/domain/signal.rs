//! Arbitrage signal types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::MarketId;

/// Kind of mispricing a signal describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum SignalKind {
    /// Outcome prices do not sum to the theoretical 1.0.
    SumDiscrepancy,
}

impl SignalKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SumDiscrepancy => "SUM_DISCREPANCY",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal severity, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected internally-inconsistent outcome price set.
///
/// Computed fresh on every detection pass and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageSignal {
    market_id: MarketId,
    market_name: String,
    kind: SignalKind,
    severity: Severity,
    outcome_sum: Decimal,
    expected_return: Decimal,
    description: String,
}

impl ArbitrageSignal {
    pub fn new(
        market_id: MarketId,
        market_name: impl Into<String>,
        kind: SignalKind,
        severity: Severity,
        outcome_sum: Decimal,
        expected_return: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            market_id,
            market_name: market_name.into(),
            kind,
            severity,
            outcome_sum,
            expected_return,
            description: description.into(),
        }
    }

    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    #[must_use]
    pub fn market_name(&self) -> &str {
        &self.market_name
    }

    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        self.kind
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// The outcome price sum that triggered this signal.
    #[must_use]
    pub const fn outcome_sum(&self) -> Decimal {
        self.outcome_sum
    }

    /// Magnitude of the mispricing, in percent.
    #[must_use]
    pub const fn expected_return(&self) -> Decimal {
        self.expected_return
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn kind_and_severity_serialize_uppercase() {
        assert_eq!(
            serde_json::to_string(&SignalKind::SumDiscrepancy).unwrap(),
            "\"SUM_DISCREPANCY\""
        );
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"HIGH\"");
        assert_eq!(Severity::Medium.to_string(), "MEDIUM");
    }
}
