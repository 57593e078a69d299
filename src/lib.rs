//! Edgewatch - prediction market anomaly monitor.
//!
//! Polls Polymarket for its most active markets, flags markets whose outcome
//! prices do not sum to 1.0, samples a synthetic stream of large trades and
//! forwards the ones above the user's whale threshold to Discord.
//!
//! # Architecture
//!
//! - [`domain`] - Exchange-agnostic types: markets, signals, alerts, ledgers
//! - [`application`] - Detection, sampling, the monitor and its observers
//! - [`port`] - Traits the application depends on
//! - [`adapter`] - Gamma, CoinGecko, Discord and settings store adapters, plus the CLI
//! - [`infrastructure`] - Configuration, logging, scheduling and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use edgewatch::application::arbitrage::{detect_arbitrage, ArbitrageConfig};
//! use edgewatch::domain::{MarketId, MarketSnapshot};
//! use rust_decimal_macros::dec;
//!
//! let market = MarketSnapshot::new(
//!     MarketId::new("m1"),
//!     "Will it rain?",
//!     vec!["Yes".into(), "No".into()],
//!     vec![dec!(0.45), dec!(0.50)],
//!     dec!(2000000),
//! );
//! let signals = detect_arbitrage(&[market], &ArbitrageConfig::default());
//! assert_eq!(signals.len(), 1);
//! assert_eq!(signals[0].expected_return(), dec!(5.00));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
