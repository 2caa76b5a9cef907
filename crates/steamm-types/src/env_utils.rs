//! Environment variable parsing utilities.
//!
//! Every `PUMP_STEAMM_*` override is read through these helpers, so blank and
//! unparseable values behave the same everywhere: as if unset.

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Read a non-blank string variable.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("PUMP_STEAMM_TEST_U64", " 42 ");
        let val: Option<u64> = env_var("PUMP_STEAMM_TEST_U64");
        assert_eq!(val, Some(42));

        let missing: Option<u64> = env_var("PUMP_STEAMM_TEST_MISSING_1");
        assert_eq!(missing, None);

        std::env::remove_var("PUMP_STEAMM_TEST_U64");
    }

    #[test]
    fn test_env_var_garbage_is_unset() {
        std::env::set_var("PUMP_STEAMM_TEST_GARBAGE", "lots");
        let val: Option<u64> = env_var("PUMP_STEAMM_TEST_GARBAGE");
        assert_eq!(val, None);
        std::env::remove_var("PUMP_STEAMM_TEST_GARBAGE");
    }

    #[test]
    fn test_env_string_skips_blank() {
        std::env::set_var("PUMP_STEAMM_TEST_BLANK", "   ");
        assert_eq!(env_string("PUMP_STEAMM_TEST_BLANK"), None);
        std::env::set_var("PUMP_STEAMM_TEST_NAME", " debug ");
        assert_eq!(env_string("PUMP_STEAMM_TEST_NAME").as_deref(), Some("debug"));
        std::env::remove_var("PUMP_STEAMM_TEST_BLANK");
        std::env::remove_var("PUMP_STEAMM_TEST_NAME");
    }
}
