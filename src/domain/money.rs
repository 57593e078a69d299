//! Monetary types for price and volume representation.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Parse a decimal quantity, treating anything unparseable as zero.
///
/// Upstream feeds send prices and volumes as strings, numbers, or
/// garbage; a bad entry must only zero that entry rather than fail the
/// whole market. Scientific notation (`"1e-3"`) is accepted.
#[must_use]
pub fn parse_lenient(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_and_volume_are_decimal() {
        let price: Price = dec!(1.50);
        let volume: Volume = dec!(100.0);

        assert_eq!(price + volume, dec!(101.50));
    }

    #[test]
    fn parse_lenient_reads_plain_decimals() {
        assert_eq!(parse_lenient("0.65"), dec!(0.65));
        assert_eq!(parse_lenient(" 1200000.5 "), dec!(1200000.5));
    }

    #[test]
    fn parse_lenient_reads_scientific_notation() {
        assert_eq!(parse_lenient("5e-3"), dec!(0.005));
    }

    #[test]
    fn parse_lenient_zeroes_garbage() {
        assert_eq!(parse_lenient(""), Decimal::ZERO);
        assert_eq!(parse_lenient("n/a"), Decimal::ZERO);
        assert_eq!(parse_lenient("NaN"), Decimal::ZERO);
    }
}
