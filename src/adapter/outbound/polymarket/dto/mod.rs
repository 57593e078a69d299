//! Polymarket data transfer objects.
//!
//! Gamma API responses (markets, events) and their conversion into
//! [`MarketSnapshot`](crate::domain::MarketSnapshot).

pub mod response;
