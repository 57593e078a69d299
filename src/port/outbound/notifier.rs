//! Alert notification port.
//!
//! Delivery is best-effort. A notifier reports whether it delivered and
//! logs its own failures; nothing is retried and no error reaches the
//! monitor.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{MarketSnapshot, TradeAlert};

/// Trait for alert delivery handlers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `deliver` must not panic or return errors; log and return `false`
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one alert. `market` is the snapshot the alert was drawn from,
    /// when still known. Returns `true` when the alert was delivered.
    async fn deliver(&self, alert: &TradeAlert, market: Option<&MarketSnapshot>) -> bool;
}

/// Registry of notifiers (composite pattern).
///
/// Sends each alert to every registered notifier in registration order.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn AlertNotifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn AlertNotifier>) {
        self.notifiers.push(notifier);
    }

    /// Deliver `alert` to all notifiers. Returns how many reported success.
    pub async fn dispatch(&self, alert: &TradeAlert, market: Option<&MarketSnapshot>) -> usize {
        let mut delivered = 0;
        for notifier in &self.notifiers {
            if notifier.deliver(alert, market).await {
                delivered += 1;
            }
        }
        delivered
    }

    /// Names of registered notifiers.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

#[async_trait]
impl AlertNotifier for NullNotifier {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn deliver(&self, _alert: &TradeAlert, _market: Option<&MarketSnapshot>) -> bool {
        false
    }
}

/// A logging notifier that logs alerts via tracing.
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, alert: &TradeAlert, _market: Option<&MarketSnapshot>) -> bool {
        info!(
            alert_id = %alert.id,
            market_id = %alert.market_id,
            side = %alert.side,
            size = %alert.size,
            price = %alert.price,
            address = %alert.short_address(),
            "Whale alert"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlertId, MarketId, Side};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn alert() -> TradeAlert {
        TradeAlert {
            id: AlertId::from_random_bytes([7; 16]),
            market_id: MarketId::from("m1"),
            market_name: "Will it rain?".into(),
            side: Side::Buy,
            size: dec!(60000),
            price: dec!(0.42),
            address: "0x1234567890abcdef".into(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn empty_registry_delivers_nothing() {
        let registry = NotifierRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(&alert(), None).await, 0);
    }

    #[tokio::test]
    async fn dispatch_counts_successful_deliveries() {
        let mut registry = NotifierRegistry::default();
        registry.register(Box::new(LogNotifier));
        registry.register(Box::new(NullNotifier));
        registry.register(Box::new(LogNotifier));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), vec!["log", "null", "log"]);
        assert_eq!(registry.dispatch(&alert(), None).await, 2);
    }
}
