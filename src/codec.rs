//! Conversion between typed decimal amounts and smallest token units
//!
//! Neither direction ever fails loudly: unparsable text is an unknown
//! amount and an unknown amount displays as zero.

use alloy_primitives::U256;

/// 10^exp, or `None` when it does not fit in a U256
fn pow10(exp: usize) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}

/// `value * 10^exp`; zero stays zero even when 10^exp overflows
fn scale(value: U256, exp: usize) -> Option<U256> {
    if value.is_zero() {
        return Some(U256::ZERO);
    }
    value.checked_mul(pow10(exp)?)
}

fn parse_digits(digits: &str) -> Option<U256> {
    if digits.is_empty() {
        return Some(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).ok()
}

/// Parse a decimal string such as `"1.5"` into smallest units.
///
/// Fractional digits beyond `decimals` are truncated. Returns `None` for
/// empty, signed, exponent-notation or otherwise malformed input, and for
/// amounts that overflow a U256.
pub fn parse_value(text: &str, decimals: u8) -> Option<U256> {
    let text = text.trim();
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let precision = usize::from(decimals);
    let fraction = &fraction[..fraction.len().min(precision)];

    let whole = scale(parse_digits(whole)?, precision)?;
    let fraction = scale(parse_digits(fraction)?, precision - fraction.len())?;
    whole.checked_add(fraction)
}

/// Format smallest units as a minimal decimal string (`"1.5"`, `"2"`).
///
/// An unknown amount formats as `"0"`.
pub fn format_value(amount: Option<U256>, decimals: u8) -> String {
    let digits = amount.unwrap_or(U256::ZERO).to_string();
    let precision = usize::from(decimals);
    if precision == 0 {
        return digits;
    }

    let padded = if digits.len() <= precision {
        format!("{}{}", "0".repeat(precision + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - precision);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(value: u128) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_parse_one_and_a_half_ether() {
        let amount = parse_value("1.5", 18);
        assert_eq!(amount, Some(units(1_500_000_000_000_000_000)));
        assert_eq!(format_value(amount, 18), "1.5");
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["", "   ", ".", "abc", "1e18", "-1", "+1", "1.2.3", "1,5", "0x10"] {
            assert_eq!(parse_value(text, 6), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn test_parse_accepts_partial_forms() {
        assert_eq!(parse_value(".5", 6), Some(units(500_000)));
        assert_eq!(parse_value("5.", 6), Some(units(5_000_000)));
        assert_eq!(parse_value(" 2 ", 6), Some(units(2_000_000)));
        assert_eq!(parse_value("007", 0), Some(units(7)));
    }

    #[test]
    fn test_parse_truncates_excess_precision() {
        assert_eq!(parse_value("1.23456789", 6), Some(units(1_234_567)));
        assert_eq!(parse_value("0.9", 0), Some(units(0)));
    }

    #[test]
    fn test_parse_overflow_is_unknown() {
        let huge = "9".repeat(90);
        assert_eq!(parse_value(&huge, 0), None);
        assert_eq!(parse_value("1", 80), None);
    }

    #[test]
    fn test_format_unknown_is_zero() {
        assert_eq!(format_value(None, 6), "0");
        assert_eq!(format_value(Some(U256::ZERO), 18), "0");
    }

    #[test]
    fn test_format_small_and_whole_amounts() {
        assert_eq!(format_value(Some(units(1)), 18), "0.000000000000000001");
        assert_eq!(format_value(Some(units(1_000_000)), 6), "1");
        assert_eq!(format_value(Some(units(1_050_000)), 6), "1.05");
        assert_eq!(format_value(Some(units(42)), 0), "42");
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            (0u128, 18u8),
            (1, 18),
            (123_456_789, 6),
            (10_000_000_000_000_000_000, 18),
            (987_654_321_012_345_678_901, 9),
            (u128::MAX, 18),
        ];
        for (value, decimals) in cases {
            let amount = units(value);
            let text = format_value(Some(amount), decimals);
            assert_eq!(parse_value(&text, decimals), Some(amount), "round trip of {text}");
        }
    }

    #[test]
    fn test_round_trip_beyond_u256_scale() {
        let tenth = pow10(77).unwrap();
        let cases = [(tenth, 78u8), (U256::from(1u64), 78), (U256::ZERO, 80), (U256::from(1u64), 80)];
        for (amount, decimals) in cases {
            let text = format_value(Some(amount), decimals);
            assert_eq!(parse_value(&text, decimals), Some(amount), "round trip of {text}");
        }
        assert_eq!(format_value(Some(tenth), 78), "0.1");
        assert_eq!(parse_value("0", 80), Some(U256::ZERO));
        // A non-zero whole part cannot be scaled that far
        assert_eq!(parse_value("1", 80), None);
    }
}
