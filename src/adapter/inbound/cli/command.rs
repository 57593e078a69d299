//! Command-line interface definitions.
//!
//! Defines the CLI structure for the edgewatch binary using `clap`: a
//! foreground monitor plus one-shot commands for scanning, lookups and
//! settings management.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Prediction market monitor with whale alerts and arbitrage signals
#[derive(Parser, Debug)]
#[command(name = "edgewatch")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply when it is missing)
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitor in the foreground until interrupted
    Run(RunArgs),

    /// Fetch markets once and list arbitrage signals
    Scan(ScanArgs),

    /// Look up a market by slug and check it for arbitrage
    Market(MarketArgs),

    /// Show current crypto prices
    Prices,

    /// Profile a trader address
    Address(AddressArgs),

    /// View or change persisted user settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Validate the configuration file
    Check,
}

/// Arguments for `edgewatch run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Override the market refresh interval (milliseconds).
    #[arg(long)]
    pub refresh_ms: Option<u64>,

    /// Override the trade flow interval (milliseconds).
    #[arg(long)]
    pub flow_ms: Option<u64>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `edgewatch scan`.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Number of markets to fetch (overrides `monitor.market_limit`).
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `edgewatch market`.
#[derive(Parser, Debug)]
pub struct MarketArgs {
    /// Market or event slug, e.g. `will-bitcoin-hit-100k`.
    pub slug: String,
}

/// Arguments for `edgewatch address`.
#[derive(Parser, Debug)]
pub struct AddressArgs {
    /// Wallet address (0x...).
    pub address: String,

    /// Add the address to the tracked list.
    #[arg(long, conflicts_with = "untrack")]
    pub track: bool,

    /// Remove the address from the tracked list.
    #[arg(long)]
    pub untrack: bool,
}

/// Subcommands for `edgewatch settings`.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show the effective settings and tracked addresses.
    Show,
    /// Set the minimum trade size that counts as a whale.
    SetThreshold {
        /// Size in USD.
        value: Decimal,
    },
    /// Set the Discord webhook URL (empty string disables delivery).
    SetWebhook {
        url: String,
    },
    /// Set the market refresh interval in milliseconds.
    SetInterval {
        millis: u64,
    },
}
