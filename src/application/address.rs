//! Address profiling.
//!
//! There is no indexer behind this yet. Stats are derived deterministically
//! from the address itself so the same address always profiles the same way.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::{AddressStats, AddressTier};

/// Build a profile for `address` as of `now`.
#[must_use]
pub fn profile_address(address: &str, now: DateTime<Utc>) -> AddressStats {
    let normalized = address.trim().to_lowercase();
    let seed = u32::from(normalized.as_bytes().get(10).copied().unwrap_or(0));
    let is_whale = seed % 10 == 0;

    let win_rate = Decimal::new(45, 2) + Decimal::new(i64::from(seed % 25), 2);
    let total_volume = if is_whale {
        Decimal::from(2_500_000 + seed * 10_000)
    } else {
        Decimal::from(15_000 + seed * 500)
    };
    let pnl = total_volume * (win_rate - Decimal::new(45, 2));

    AddressStats {
        address: normalized,
        win_rate,
        total_volume,
        total_trades: 100 + seed % 400,
        pnl,
        tier: if is_whale {
            AddressTier::Whale
        } else {
            AddressTier::SmartMoney
        },
        last_active: now - Duration::minutes(i64::from(seed % 60)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profile_is_deterministic() {
        let now = Utc::now();
        let a = profile_address("0xAbCdEf0123456789", now);
        let b = profile_address("0xabcdef0123456789", now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_address_uses_zero_seed() {
        let stats = profile_address("0x12", Utc::now());
        assert_eq!(stats.tier, AddressTier::Whale);
        assert_eq!(stats.win_rate, dec!(0.45));
        assert_eq!(stats.total_volume, dec!(2500000));
        assert_eq!(stats.total_trades, 100);
        assert_eq!(stats.pnl, Decimal::ZERO);
    }

    #[test]
    fn test_seed_from_eleventh_char() {
        // '2' = 50, 50 % 10 == 0
        let whale = profile_address("0x000000002abc", Utc::now());
        assert_eq!(whale.tier, AddressTier::Whale);
        assert_eq!(whale.total_volume, dec!(3000000));
        assert_eq!(whale.total_trades, 150);

        // 'a' = 97
        let smart = profile_address("0x00000000aabc", Utc::now());
        assert_eq!(smart.tier, AddressTier::SmartMoney);
        assert_eq!(smart.win_rate, dec!(0.67));
        assert_eq!(smart.total_volume, dec!(63500));
        assert_eq!(smart.total_trades, 197);
        assert_eq!(smart.pnl, dec!(63500) * dec!(0.22));
    }
}
