//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for markets and trade alerts.
//! - [`doubles`] - Port implementations with scripted results:
//!   `ScriptedMarketSource`, `StaticPriceFeed`, `ScriptedFlow`,
//!   `RecordingNotifier`.

pub mod domain;
pub mod doubles;
