//! Application services (use cases).
//!
//! Detection (`arbitrage`, `whale`) and the synthetic histories in
//! `activity` are pure and synchronous. `monitor` coordinates the ports
//! around them; `log_buffer` and `observer` carry in-process state to
//! display surfaces.

pub mod activity;
pub mod address;
pub mod arbitrage;
pub mod log_buffer;
pub mod monitor;
pub mod observer;
pub mod whale;

pub use arbitrage::{check_single_market_arbitrage, classify_severity, detect_arbitrage, ArbitrageConfig};
pub use log_buffer::{LogBuffer, LogEntry, LogLevel};
pub use monitor::{DashboardState, FeedStatus, Monitor, MonitorOptions, RefreshSummary};
pub use observer::{Observers, Subscription};
pub use whale::{sample_whale_alert, WhaleConfig};
