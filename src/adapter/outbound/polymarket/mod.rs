//! Polymarket integration (Gamma market data).

pub mod client;
pub mod dto;
pub mod settings;

pub use client::PolymarketClient;
pub use settings::PolymarketConfig;
