//! Market monitor.
//!
//! The monitor owns the dashboard state and runs two kinds of passes:
//!
//! - **refresh**: pull markets and crypto prices, rerun arbitrage detection
//! - **flow**: draw the next trade from the [`TradeFlow`], record it, and
//!   dispatch it when it clears the user's whale threshold
//!
//! Passes are driven externally (see `infrastructure::scheduler`). State is
//! behind a lock that is never held across an await.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::arbitrage::{detect_arbitrage, ArbitrageConfig};
use super::observer::{Observers, Subscription};
use crate::domain::{AlertLedger, ArbitrageSignal, CryptoPrice, MarketSnapshot, TradeAlert};
use crate::error::Result;
use crate::port::{MarketSource, NotifierRegistry, PriceFeed, SettingsStore, TradeFlow};

/// Connection state of the market feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "CONNECTING",
            Self::Connected => "CONNECTED",
            Self::Disconnected => "DISCONNECTED",
        })
    }
}

/// Tunables for the monitor passes.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Markets requested per refresh.
    pub market_limit: usize,
    /// Alerts retained in the ledger.
    pub alert_capacity: usize,
    pub arbitrage: ArbitrageConfig,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            market_limit: 60,
            alert_capacity: 50,
            arbitrage: ArbitrageConfig::default(),
        }
    }
}

/// Everything the dashboard shows.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub markets: Vec<MarketSnapshot>,
    pub prices: Vec<CryptoPrice>,
    pub signals: Vec<ArbitrageSignal>,
    pub alerts: AlertLedger,
    pub status: FeedStatus,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl DashboardState {
    fn new(alert_capacity: usize) -> Self {
        Self {
            markets: Vec::new(),
            prices: Vec::new(),
            signals: Vec::new(),
            alerts: AlertLedger::new(alert_capacity),
            status: FeedStatus::default(),
            last_refresh: None,
        }
    }
}

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub markets: usize,
    pub prices: usize,
    pub signals: usize,
}

pub struct Monitor {
    markets: Arc<dyn MarketSource>,
    prices: Arc<dyn PriceFeed>,
    flow: Mutex<Box<dyn TradeFlow>>,
    notifiers: Arc<NotifierRegistry>,
    settings: Arc<dyn SettingsStore>,
    options: MonitorOptions,
    state: RwLock<DashboardState>,
    status_observers: Observers<FeedStatus>,
}

impl Monitor {
    #[must_use]
    pub fn new(
        markets: Arc<dyn MarketSource>,
        prices: Arc<dyn PriceFeed>,
        flow: Box<dyn TradeFlow>,
        notifiers: Arc<NotifierRegistry>,
        settings: Arc<dyn SettingsStore>,
        options: MonitorOptions,
    ) -> Self {
        let state = DashboardState::new(options.alert_capacity);
        Self {
            markets,
            prices,
            flow: Mutex::new(flow),
            notifiers,
            settings,
            options,
            state: RwLock::new(state),
            status_observers: Observers::new(),
        }
    }

    /// Fetch markets and prices, then rerun arbitrage detection.
    ///
    /// A price feed failure is logged and leaves the price list empty. A
    /// market feed failure marks the feed disconnected and is returned.
    pub async fn refresh(&self) -> Result<RefreshSummary> {
        if self.status() != FeedStatus::Connected {
            self.set_status(FeedStatus::Connecting);
        }

        let (markets, prices) = tokio::join!(
            self.markets.fetch_markets(self.options.market_limit),
            self.prices.fetch_prices()
        );

        let markets = match markets {
            Ok(markets) => markets,
            Err(err) => {
                self.set_status(FeedStatus::Disconnected);
                return Err(err);
            }
        };
        let prices = prices.unwrap_or_else(|err| {
            warn!(error = %err, "Price feed unavailable");
            Vec::new()
        });

        let signals = detect_arbitrage(&markets, &self.options.arbitrage);
        let summary = RefreshSummary {
            markets: markets.len(),
            prices: prices.len(),
            signals: signals.len(),
        };

        {
            let mut state = self.state.write();
            state.markets = markets;
            state.prices = prices;
            state.signals = signals;
            state.last_refresh = Some(Utc::now());
        }
        self.set_status(FeedStatus::Connected);

        info!(
            source = self.markets.source_name(),
            markets = summary.markets,
            prices = summary.prices,
            signals = summary.signals,
            "Market refresh complete"
        );
        Ok(summary)
    }

    /// Run one flow tick at `now`.
    ///
    /// Every drawn alert is recorded. Only alerts above the stored whale
    /// threshold are logged as large orders and dispatched.
    pub async fn sample_flow(&self, now: DateTime<Utc>) -> Option<TradeAlert> {
        let markets = self.state.read().markets.clone();
        if markets.is_empty() {
            debug!("No markets loaded, skipping flow tick");
            return None;
        }

        let alert = self.flow.lock().next_alert(&markets, now)?;
        self.state.write().alerts.record(alert.clone());

        let threshold = self.settings.settings().whale_threshold;
        if alert.is_whale(threshold) {
            warn!(
                side = %alert.side,
                size = %alert.size,
                market_id = %alert.market_id,
                "Large order"
            );
            let market = markets.iter().find(|m| *m.id() == alert.market_id);
            let delivered = self.notifiers.dispatch(&alert, market).await;
            debug!(delivered, notifiers = self.notifiers.len(), "Whale alert dispatched");
        }

        Some(alert)
    }

    /// Copy of the current dashboard state.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.state.read().clone()
    }

    #[must_use]
    pub fn status(&self) -> FeedStatus {
        self.state.read().status
    }

    /// Observe feed status changes.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe_status<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&FeedStatus) + Send + Sync + 'static,
    {
        self.status_observers.subscribe(callback)
    }

    fn set_status(&self, status: FeedStatus) {
        let changed = {
            let mut state = self.state.write();
            let changed = state.status != status;
            state.status = status;
            changed
        };
        if changed {
            debug!(%status, "Feed status changed");
            self.status_observers.notify(&status);
        }
    }
}
