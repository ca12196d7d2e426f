//! Rupiah formatting and parsing.
//!
//! The ledger is denominated in IDR, which carries no minor unit in practice:
//! amounts are displayed with zero decimal places, grouped in thousands with
//! dots, and prefixed with `Rp` (e.g. `Rp1.234.567`). Parsing is the inverse
//! and is exact for non-negative integer amounts up to at least 10^12.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{Error, Result};

/// Formats an amount as Indonesian rupiah.
///
/// The amount is rounded to zero decimal places (midpoint away from zero)
/// before grouping. Negative amounts carry a leading minus sign.
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let grouped = group_thousands(&digits);
    if negative {
        format!("-Rp{grouped}")
    } else {
        format!("Rp{grouped}")
    }
}

/// Parses a rupiah string back into a `Decimal`.
///
/// Accepts an optional leading minus sign, an optional `Rp` prefix, and dot
/// thousands separators. `parse_rupiah(&format_rupiah(n)) == n` holds for
/// every integer amount `format_rupiah` can produce.
pub fn parse_rupiah(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.trim_start();
    let rest = rest.strip_prefix("Rp").unwrap_or(rest);
    let rest = rest.trim_start();

    let mut digits = String::with_capacity(rest.len());
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            // Thousands separator; group widths are not enforced.
            '.' => {}
            _ => {
                return Err(Error::Currency(format!(
                    "unexpected character '{ch}' in amount '{input}'"
                )))
            }
        }
    }
    if digits.is_empty() {
        return Err(Error::Currency(format!("no digits in amount '{input}'")));
    }

    let value: Decimal = digits
        .parse()
        .map_err(|err: rust_decimal::Error| Error::Currency(err.to_string()))?;
    Ok(if negative { -value } else { value })
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_rupiah(dec!(0)), "Rp0");
        assert_eq!(format_rupiah(dec!(999)), "Rp999");
        assert_eq!(format_rupiah(dec!(1000)), "Rp1.000");
        assert_eq!(format_rupiah(dec!(750000)), "Rp750.000");
        assert_eq!(format_rupiah(dec!(1234567)), "Rp1.234.567");
        assert_eq!(format_rupiah(dec!(1000000000000)), "Rp1.000.000.000.000");
    }

    #[test]
    fn test_format_rounds_to_whole_rupiah() {
        assert_eq!(format_rupiah(dec!(1234.49)), "Rp1.234");
        assert_eq!(format_rupiah(dec!(1234.50)), "Rp1.235");
        assert_eq!(format_rupiah(dec!(0.4)), "Rp0");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_rupiah(dec!(-5000)), "-Rp5.000");
        assert_eq!(format_rupiah(dec!(-0.2)), "Rp0");
    }

    #[test]
    fn test_parse_accepts_formatted_and_plain_input() {
        assert_eq!(parse_rupiah("Rp1.234.567").unwrap(), dec!(1234567));
        assert_eq!(parse_rupiah("1234567").unwrap(), dec!(1234567));
        assert_eq!(parse_rupiah("  Rp 750.000 ").unwrap(), dec!(750000));
        assert_eq!(parse_rupiah("-Rp5.000").unwrap(), dec!(-5000));
        assert_eq!(parse_rupiah("Rp0").unwrap(), dec!(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_rupiah("").is_err());
        assert!(parse_rupiah("Rp").is_err());
        assert!(parse_rupiah("Rp1,234").is_err());
        assert!(parse_rupiah("abc").is_err());
    }

    #[test]
    fn test_round_trip_sample() {
        for n in [0i64, 1, 999, 1000, 52_500_000, 999_999_999_999] {
            let amount = Decimal::from(n);
            assert_eq!(parse_rupiah(&format_rupiah(amount)).unwrap(), amount);
        }
    }
}
