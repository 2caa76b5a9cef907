//! Address normalization helpers.
//!
//! Object and package IDs arrive from users and wallets in short (`0x2`) and
//! long forms with mixed case. Everything that compares or stores IDs goes
//! through these functions first.

use anyhow::{anyhow, Result};
use move_core_types::account_address::AccountAddress;

/// Parse a hex string to an AccountAddress with a context-aware error message.
///
/// # Examples
///
/// ```
/// use pump_steamm_types::encoding::parse_address;
///
/// assert!(parse_address("0x2", "package ID").is_ok());
/// assert!(parse_address("registry", "registry ID").is_err());
/// ```
pub fn parse_address(hex_str: &str, context: &str) -> Result<AccountAddress> {
    AccountAddress::from_hex_literal(hex_str.trim())
        .map_err(|e| anyhow!("Invalid {} '{}': {}", context, hex_str, e))
}

/// Normalize an address string to lowercase with 0x prefix and full 64 hex characters.
///
/// Input that is not a `0x`-prefixed hex address of at most 32 bytes is an
/// error rather than being padded or cut.
///
/// # Examples
///
/// ```
/// use pump_steamm_types::encoding::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2").unwrap(),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// ```
pub fn normalize_address(addr: &str) -> Result<String> {
    let addr = parse_address(addr, "address")?;
    Ok(format!("0x{}", addr.to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_error_mentions_context() {
        let err = parse_address("not-hex", "bonding curve ID").unwrap_err();
        assert!(err.to_string().contains("Invalid bonding curve ID"));
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("0xABC").unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
        assert_eq!(
            normalize_address("  0x1  ").unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
        let full = "0xdd718c698ebfb995e2ca740fd5c9ac625fe748b0a5e1e76db3ee629641688881";
        assert_eq!(normalize_address(full).unwrap(), full);
    }

    #[test]
    fn test_normalize_address_rejects_instead_of_truncating() {
        let too_long = format!("0x{}", "a".repeat(65));
        assert!(normalize_address(&too_long).is_err());

        // multibyte characters straddling the 64th byte
        let multibyte = format!("0x{}é{}", "a".repeat(63), "b".repeat(8));
        assert!(normalize_address(&multibyte).is_err());

        assert!(normalize_address("dd71").is_err());
        assert!(normalize_address("").is_err());
    }
}
