//! Decimal helpers for amounts the API sends as strings.
//!
//! CoinGate keeps prices and crypto amounts as decimal strings (`"1050.99"`,
//! `"4.849315"`) so no precision is lost on the wire. These helpers turn them
//! into [`Decimal`] when arithmetic is needed.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a decimal string, returning `None` for empty or malformed input.
///
/// Surrounding whitespace is ignored.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1050.99"), Some(Decimal::new(105099, 2)));
        assert_eq!(parse_decimal(" 4.849315 "), Some(Decimal::new(4849315, 6)));
        assert_eq!(parse_decimal("0"), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("ten"), None);
        assert_eq!(parse_decimal("1,5"), None);
    }
}
