use std::sync::Arc;

use edgewatch::adapter::outbound::settings::MemorySettingsStore;
use edgewatch::application::monitor::{Monitor, MonitorOptions};
use edgewatch::domain::{AppSettings, TradeAlert, Volume};
use edgewatch::port::{MarketSource, NotifierRegistry, PriceFeed, SettingsStore};
use edgewatch::testkit::doubles::{RecordingNotifier, ScriptedFlow};

/// A monitor wired to test doubles, plus handles for assertions.
pub struct MonitorHarness {
    pub monitor: Monitor,
    pub notifier: RecordingNotifier,
    pub settings: Arc<MemorySettingsStore>,
}

pub fn harness(
    source: impl MarketSource + 'static,
    prices: impl PriceFeed + 'static,
    alerts: Vec<TradeAlert>,
    whale_threshold: Volume,
) -> MonitorHarness {
    let settings = Arc::new(MemorySettingsStore::new());
    settings
        .save_settings(&AppSettings {
            whale_threshold,
            ..AppSettings::default()
        })
        .expect("save settings");

    let notifier = RecordingNotifier::new();
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(notifier.clone()));

    let monitor = Monitor::new(
        Arc::new(source),
        Arc::new(prices),
        Box::new(ScriptedFlow::new(alerts)),
        Arc::new(registry),
        settings.clone(),
        MonitorOptions::default(),
    );

    MonitorHarness {
        monitor,
        notifier,
        settings,
    }
}
