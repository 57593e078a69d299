//! Exchange-agnostic domain types.
//!
//! Nothing in here performs I/O. Adapters translate exchange payloads into
//! these types; the application layer derives signals and alerts from them.

pub mod address;
pub mod alert;
pub mod id;
pub mod ledger;
pub mod market;
pub mod money;
pub mod price;
pub mod settings;
pub mod signal;
pub mod trade;

pub use address::{AddressStats, AddressTier};
pub use alert::{Side, TradeAlert};
pub use id::{AlertId, MarketId};
pub use ledger::{AlertLedger, Ledger};
pub use market::MarketSnapshot;
pub use money::{Price, Volume};
pub use price::CryptoPrice;
pub use settings::AppSettings;
pub use signal::{ArbitrageSignal, Severity, SignalKind};
pub use trade::TradeRecord;
