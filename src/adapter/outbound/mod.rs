//! Outbound adapters (driven side).

pub mod coingecko;
pub mod flow;
pub mod http;
pub mod notifier;
pub mod polymarket;
pub mod settings;
