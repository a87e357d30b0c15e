//! Currency normalization and formatting for Nigerian Naira
//!
//! Two distinct paths, kept deliberately separate:
//! - display formatting, which falls back to `₦0.00` on garbage input and
//!   must never feed a persisted value
//! - strict submission-path parsing, which fails loudly before anything
//!   reaches the network
//!
//! All rounding in this crate is half-up (`MidpointAwayFromZero`), applied
//! the same way to display figures and to the kobo conversion used by the
//! payment gateway.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Kobo per naira, the smallest currency subunit the gateway accepts
pub const KOBO_PER_NAIRA: i64 = 100;

/// Errors from the strict (submission-path) money operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount is required")]
    Missing,

    #[error("'{0}' is not a valid amount")]
    Unparseable(String),

    #[error("amount must be greater than zero")]
    NotPositive,

    #[error("amount is too large to charge")]
    Overflow,
}

/// Round to two decimal places, half-up
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a decimal amount as `₦1,234.56`
pub fn format_naira(amount: Decimal) -> String {
    let rounded = round_display(amount);
    let negative = rounded.is_sign_negative();
    let unsigned = rounded.abs();

    let text = format!("{:.2}", unsigned);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    if negative {
        format!("-₦{}.{}", grouped, frac_part)
    } else {
        format!("₦{}.{}", grouped, frac_part)
    }
}

/// Display-only formatting of loosely-typed input.
///
/// Invalid, empty, or non-numeric input renders as `₦0.00`. This fallback
/// exists for screen output alone; persisted values go through
/// [`parse_amount`] instead.
pub fn format_naira_lossy(raw: &str) -> String {
    match parse_decimal(raw) {
        Ok(amount) => format_naira(amount),
        Err(_) => format_naira(Decimal::ZERO),
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, MoneyError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('₦')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(MoneyError::Missing);
    }
    cleaned
        .parse::<Decimal>()
        .map_err(|_| MoneyError::Unparseable(raw.trim().to_string()))
}

/// Strict parse of a required monetary text field
pub fn parse_amount(raw: &str) -> Result<Decimal, MoneyError> {
    parse_decimal(raw)
}

/// Strict parse of an optional monetary text field; empty defaults to zero
pub fn parse_optional_amount(raw: &str) -> Result<Decimal, MoneyError> {
    match parse_decimal(raw) {
        Ok(amount) => Ok(amount),
        Err(MoneyError::Missing) => Ok(Decimal::ZERO),
        Err(e) => Err(e),
    }
}

/// Convert a decimal naira amount to kobo for the payment gateway.
///
/// Zero and negative amounts are rejected: a charge must never be initiated
/// for them.
pub fn to_kobo(amount: Decimal) -> Result<i64, MoneyError> {
    if amount <= Decimal::ZERO {
        return Err(MoneyError::NotPositive);
    }
    let kobo = (amount * Decimal::from(KOBO_PER_NAIRA))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    kobo.to_i64().ok_or(MoneyError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_naira_basic() {
        assert_eq!(format_naira(dec("110")), "₦110.00");
        assert_eq!(format_naira(dec("0")), "₦0.00");
        assert_eq!(format_naira(dec("1234567.5")), "₦1,234,567.50");
    }

    #[test]
    fn test_format_naira_negative() {
        assert_eq!(format_naira(dec("-100")), "-₦100.00");
    }

    #[test]
    fn test_format_naira_rounds_half_up() {
        assert_eq!(format_naira(dec("1.005")), "₦1.01");
        assert_eq!(format_naira(dec("1.004")), "₦1.00");
    }

    #[test]
    fn test_lossy_format_falls_back_to_zero() {
        assert_eq!(format_naira_lossy(""), "₦0.00");
        assert_eq!(format_naira_lossy("abc"), "₦0.00");
        assert_eq!(format_naira_lossy("12.3.4"), "₦0.00");
        assert_eq!(format_naira_lossy("150"), "₦150.00");
    }

    #[test]
    fn test_parse_amount_accepts_symbols_and_commas() {
        assert_eq!(parse_amount("₦1,000.50").unwrap(), dec("1000.50"));
        assert_eq!(parse_amount("  250 ").unwrap(), dec("250"));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), Err(MoneyError::Missing));
        assert!(matches!(
            parse_amount("ten naira"),
            Err(MoneyError::Unparseable(_))
        ));
    }

    #[test]
    fn test_parse_optional_amount_defaults_empty_to_zero() {
        assert_eq!(parse_optional_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_optional_amount("  ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_optional_amount("100").unwrap(), dec("100"));
        assert!(parse_optional_amount("junk").is_err());
    }

    #[test]
    fn test_to_kobo() {
        assert_eq!(to_kobo(dec("750")).unwrap(), 75_000);
        assert_eq!(to_kobo(dec("0.01")).unwrap(), 1);
        // Half-up at the subunit boundary
        assert_eq!(to_kobo(dec("1.005")).unwrap(), 101);
    }

    #[test]
    fn test_to_kobo_rejects_nonpositive() {
        assert_eq!(to_kobo(Decimal::ZERO), Err(MoneyError::NotPositive));
        assert_eq!(to_kobo(dec("-5")), Err(MoneyError::NotPositive));
    }
}
