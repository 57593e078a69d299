//! Adapters connecting the application to the outside world.
//!
//! - [`inbound`] - The command-line interface
//! - [`outbound`] - Gamma, CoinGecko, Discord and settings storage

pub mod inbound;
pub mod outbound;
