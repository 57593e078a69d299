//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external systems the monitor depends on:
//! market data, price feeds, trade flow, settings storage and notifications.

pub mod flow;
pub mod market;
pub mod notifier;
pub mod price;
pub mod settings;
