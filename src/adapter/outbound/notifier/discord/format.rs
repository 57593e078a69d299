//! Discord webhook payload formatting.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{MarketSnapshot, Side, TradeAlert};

/// Embed color for buy alerts (green).
pub const BUY_COLOR: u32 = 3_066_993;
/// Embed color for sell alerts (red).
pub const SELL_COLOR: u32 = 15_158_332;

const FOOTER_TEXT: &str = "PolyPulse OS | Surveillance Bot";
const FOOTER_ICON: &str = "https://polymarket.com/favicon.ico";
const FALLBACK_URL: &str = "https://polymarket.com";
const NETWORK: &str = "Polygon/Mainnet";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

/// Link to the market page, or the site root when the market is unknown.
#[must_use]
pub fn market_url(event_url: &str, market: Option<&MarketSnapshot>) -> String {
    match market.and_then(MarketSnapshot::slug) {
        Some(slug) => format!("{}/{slug}", event_url.trim_end_matches('/')),
        None => FALLBACK_URL.to_string(),
    }
}

/// Build the webhook body for one whale alert.
#[must_use]
pub fn whale_payload(
    alert: &TradeAlert,
    market: Option<&MarketSnapshot>,
    event_url: &str,
    sent_at: DateTime<Utc>,
) -> WebhookPayload {
    let color = match alert.side {
        Side::Buy => BUY_COLOR,
        Side::Sell => SELL_COLOR,
    };

    let embed = Embed {
        title: format!("🚨 WHALE ACTIVITY DETECTED: {}", alert.side),
        description: format!(
            "**Market:** {}\n**Size:** ${} USDC\n**Price:** {:.3} USDC",
            alert.market_name,
            group_thousands(alert.size),
            alert.price
        ),
        url: market_url(event_url, market),
        color,
        fields: vec![
            EmbedField {
                name: "Address".into(),
                value: format!("`{}`", alert.address),
                inline: false,
            },
            EmbedField {
                name: "Timestamp".into(),
                value: alert.timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
                inline: true,
            },
            EmbedField {
                name: "Network".into(),
                value: NETWORK.into(),
                inline: true,
            },
        ],
        footer: EmbedFooter {
            text: FOOTER_TEXT.into(),
            icon_url: FOOTER_ICON.into(),
        },
        timestamp: sent_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    };

    WebhookPayload {
        embeds: vec![embed],
    }
}

/// `1234567.5` -> `1,234,567.5`
fn group_thousands(value: Decimal) -> String {
    let normalized = value.normalize().to_string();
    let (sign, digits) = match normalized.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", normalized.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
