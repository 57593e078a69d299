//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Outbound ports describe the collaborators the monitor drives: market
//! data, crypto prices, trade flow, settings persistence and alert
//! delivery. Adapters in `adapter::outbound` implement them.

pub mod outbound;

pub use outbound::flow::TradeFlow;
pub use outbound::market::MarketSource;
pub use outbound::notifier::{AlertNotifier, LogNotifier, NotifierRegistry, NullNotifier};
pub use outbound::price::PriceFeed;
pub use outbound::settings::SettingsStore;
