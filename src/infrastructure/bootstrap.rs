//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::adapter::outbound::coingecko::CoinGeckoClient;
use crate::adapter::outbound::flow::SyntheticTradeFlow;
use crate::adapter::outbound::notifier::DiscordNotifier;
use crate::adapter::outbound::polymarket::PolymarketClient;
use crate::adapter::outbound::settings::FileSettingsStore;
use crate::application::monitor::{Monitor, MonitorOptions};
use crate::infrastructure::config::settings::Config;
use crate::port::{
    LogNotifier, MarketSource, NotifierRegistry, PriceFeed, SettingsStore, TradeFlow,
};

/// File-backed settings store at the configured location.
#[must_use]
pub fn build_settings_store(config: &Config) -> Arc<dyn SettingsStore> {
    let path = config.settings.resolved_path();
    info!(path = %path.display(), "Using settings store");
    Arc::new(FileSettingsStore::new(path))
}

#[must_use]
pub fn build_market_source(config: &Config) -> Arc<dyn MarketSource> {
    Arc::new(PolymarketClient::from_config(&config.polymarket))
}

#[must_use]
pub fn build_price_feed(config: &Config) -> Arc<dyn PriceFeed> {
    Arc::new(CoinGeckoClient::from_config(&config.prices))
}

/// Synthetic flow, seeded when `monitor.flow_seed` is set.
#[must_use]
pub fn build_trade_flow(config: &Config) -> Box<dyn TradeFlow> {
    match config.monitor.flow_seed {
        Some(seed) => Box::new(SyntheticTradeFlow::seeded(seed, config.whale.clone())),
        None => Box::new(SyntheticTradeFlow::from_entropy(config.whale.clone())),
    }
}

/// RNG for one-shot synthetic histories, seeded like the flow.
#[must_use]
pub fn build_rng(config: &Config) -> StdRng {
    match config.monitor.flow_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Log notifier plus the Discord webhook notifier.
#[must_use]
pub fn build_notifier_registry(
    config: &Config,
    settings: Arc<dyn SettingsStore>,
) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    registry.register(Box::new(
        DiscordNotifier::new(settings, config.polymarket.event_url.clone()).with_env_override(),
    ));
    registry
}

#[must_use]
pub fn monitor_options(config: &Config) -> MonitorOptions {
    MonitorOptions {
        market_limit: config.monitor.market_limit,
        alert_capacity: config.monitor.alert_capacity,
        arbitrage: config.detection.clone(),
    }
}

/// Wire a monitor with live adapters.
#[must_use]
pub fn build_monitor(config: &Config, settings: Arc<dyn SettingsStore>) -> Monitor {
    let notifiers = build_notifier_registry(config, Arc::clone(&settings));
    info!(notifiers = ?notifiers.names(), "Notifiers registered");

    Monitor::new(
        build_market_source(config),
        build_price_feed(config),
        build_trade_flow(config),
        Arc::new(notifiers),
        settings,
        monitor_options(config),
    )
}
