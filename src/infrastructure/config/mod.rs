//! Infrastructure configuration modules.

pub mod logging;
pub mod monitor;
pub mod settings;

pub use logging::LoggingConfig;
pub use monitor::{MonitorConfig, SettingsStoreConfig};
pub use settings::Config;
