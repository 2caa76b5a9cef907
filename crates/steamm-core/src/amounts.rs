//! Fixed-point amount handling.
//!
//! Every SUI and token amount in bonding-curve events is a base-10 integer
//! string scaled by 10^9. Two display conventions exist and are kept apart:
//! balances always show nine fractional digits, narrative messages show the
//! natural quotient without padding.

use anyhow::{anyhow, bail, Result};
use pump_steamm_types::{AMOUNT_DECIMALS, AMOUNT_SCALE};

const SCALE: u128 = AMOUNT_SCALE as u128;

/// Balance convention: `1500000000` -> `1.500000000`.
pub fn format_balance(units: u128) -> String {
    format!(
        "{}.{:0width$}",
        units / SCALE,
        units % SCALE,
        width = AMOUNT_DECIMALS as usize
    )
}

/// Balance convention for an integer string; `None` if it is not one.
pub fn format_balance_str(raw: &str) -> Option<String> {
    raw.trim().parse::<u128>().ok().map(format_balance)
}

/// Narrative convention: `1500000000` -> `1.5`, `2000000000` -> `2`.
///
/// Text that is not an unsigned integer is returned unchanged so a message
/// still shows what the event carried.
pub fn format_narrative(raw: &str) -> String {
    let Ok(units) = raw.trim().parse::<u128>() else {
        return raw.to_string();
    };
    let whole = units / SCALE;
    let frac = units % SCALE;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", frac, width = AMOUNT_DECIMALS as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Convert user-entered decimal text into base units.
///
/// Digits past the ninth fractional place are dropped (floor), matching how
/// the front-end scales form input before building a split.
pub fn parse_amount(input: &str) -> Result<u64> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Amount is empty");
    }
    if input.starts_with('-') {
        bail!("Amount '{}' must not be negative", input);
    }

    let (whole, frac) = input.split_once('.').unwrap_or((input, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        bail!("Amount '{}' is not a decimal number", input);
    }

    let whole_units: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| anyhow!("Amount '{}' is too large", input))?
    };

    let decimals = AMOUNT_DECIMALS as usize;
    let mut frac_digits: String = frac.chars().take(decimals).collect();
    while frac_digits.len() < decimals {
        frac_digits.push('0');
    }
    let frac_units: u64 = frac_digits
        .parse()
        .map_err(|_| anyhow!("Amount '{}' is not a decimal number", input))?;

    whole_units
        .checked_mul(AMOUNT_SCALE)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or_else(|| anyhow!("Amount '{}' is too large", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balance_always_nine_places() {
        assert_eq!(format_balance(1_500_000_000), "1.500000000");
        assert_eq!(format_balance(0), "0.000000000");
        assert_eq!(format_balance(7), "0.000000007");
        assert_eq!(format_balance(42_000_000_000), "42.000000000");
    }

    #[test]
    fn test_format_balance_str() {
        assert_eq!(format_balance_str("1500000000").as_deref(), Some("1.500000000"));
        assert_eq!(format_balance_str("1.5"), None);
        assert_eq!(format_balance_str(""), None);
    }

    #[test]
    fn test_format_narrative_is_unpadded() {
        assert_eq!(format_narrative("1500000000"), "1.5");
        assert_eq!(format_narrative("2000000000"), "2");
        assert_eq!(format_narrative("1"), "0.000000001");
        assert_eq!(format_narrative("0"), "0");
        assert_eq!(format_narrative("123456789012"), "123.456789012");
    }

    #[test]
    fn test_format_narrative_echoes_non_integers() {
        assert_eq!(format_narrative("about ten"), "about ten");
        assert_eq!(format_narrative("-5"), "-5");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.5").unwrap(), 1_500_000_000);
        assert_eq!(parse_amount("2").unwrap(), 2_000_000_000);
        assert_eq!(parse_amount(".25").unwrap(), 250_000_000);
        assert_eq!(parse_amount("3.").unwrap(), 3_000_000_000);
        assert_eq!(parse_amount(" 0.000000001 ").unwrap(), 1);
    }

    #[test]
    fn test_parse_amount_truncates_extra_precision() {
        assert_eq!(parse_amount("0.0000000019").unwrap(), 1);
        assert_eq!(parse_amount("1.9999999999").unwrap(), 1_999_999_999);
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount(".").is_err());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("1e9").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("18446744074").is_err());
    }
}
