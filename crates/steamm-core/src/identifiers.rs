//! Module and struct identifiers for newly minted coin types.
//!
//! Before a coin package is published, the front-end needs the module name
//! and the one-time-witness struct name to patch into the coin template. They
//! come either from the token symbol or from a user-supplied
//! `address::module::Struct` string whose address part is ignored, since the
//! real address is assigned at publish time.
//!
//! # Example
//!
//! ```
//! use pump_steamm_core::identifiers::derive;
//!
//! let pair = derive("My Coin", None);
//! assert_eq!(pair.module_name, "my_coin");
//! assert_eq!(pair.struct_name, "MY_COIN");
//!
//! let pair = derive("XYZ", Some("0xdead::beefMod::CoolStruct"));
//! assert_eq!(pair.module_name, "beefMod");
//! ```

use move_core_types::identifier::Identifier;
use serde::{Deserialize, Serialize};

/// Address placeholder used for a coin type that is not yet published.
pub const PLACEHOLDER_ADDRESS: &str = "dummy";

/// Module and struct name for one token-creation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierPair {
    pub module_name: String,
    pub struct_name: String,
}

/// Derive identifiers from a symbol and an optional custom type string.
///
/// A non-blank custom type with exactly three `::` parts wins and its module
/// and struct parts are used verbatim. Anything else falls back to the
/// symbol: lowercased for the module, uppercased for the struct, whitespace
/// runs replaced by `_`. Legality is not checked here.
pub fn derive(symbol: &str, custom_type: Option<&str>) -> IdentifierPair {
    if let Some(custom) = custom_type.filter(|c| !c.trim().is_empty()) {
        let parts: Vec<&str> = custom.split("::").collect();
        if let [_address, module, name] = parts.as_slice() {
            return IdentifierPair {
                module_name: module.to_string(),
                struct_name: name.to_string(),
            };
        }
        tracing::debug!(
            custom_type = custom,
            parts = parts.len(),
            "custom type is not address::module::Struct; deriving from symbol"
        );
    }
    from_symbol(symbol)
}

fn from_symbol(symbol: &str) -> IdentifierPair {
    IdentifierPair {
        module_name: underscore_whitespace(&symbol.to_lowercase()),
        struct_name: underscore_whitespace(&symbol.to_uppercase()),
    }
}

/// Replace every run of whitespace with a single `_`.
fn underscore_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Validate that a string is a valid Move identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    Identifier::new(name).is_ok()
}

impl IdentifierPair {
    /// `dummy::module::STRUCT`, the identifier logged before publishing.
    pub fn placeholder_type(&self) -> String {
        format!(
            "{}::{}::{}",
            PLACEHOLDER_ADDRESS, self.module_name, self.struct_name
        )
    }

    /// Parts that the publish step would reject as Move identifiers.
    pub fn illegal_parts(&self) -> Vec<(&'static str, &str)> {
        let mut bad = Vec::new();
        if !is_valid_identifier(&self.module_name) {
            bad.push(("module", self.module_name.as_str()));
        }
        if !is_valid_identifier(&self.struct_name) {
            bad.push(("struct", self.struct_name.as_str()));
        }
        bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(module: &str, name: &str) -> IdentifierPair {
        IdentifierPair {
            module_name: module.to_string(),
            struct_name: name.to_string(),
        }
    }

    #[test]
    fn test_symbol_derivation() {
        assert_eq!(derive("My Coin", None), pair("my_coin", "MY_COIN"));
        assert_eq!(derive("sSUI", None), pair("ssui", "SSUI"));
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(derive("Big \t  Dog", None), pair("big_dog", "BIG_DOG"));
        assert_eq!(derive(" pad ", None), pair("_pad_", "_PAD_"));
    }

    #[test]
    fn test_custom_type_used_verbatim() {
        assert_eq!(
            derive("XYZ", Some("0xdead::beefMod::CoolStruct")),
            pair("beefMod", "CoolStruct")
        );
        // the address part is never validated
        assert_eq!(derive("XYZ", Some("whatever::m::S")), pair("m", "S"));
    }

    #[test]
    fn test_malformed_custom_type_falls_back() {
        assert_eq!(derive("XYZ", Some("not::valid")), pair("xyz", "XYZ"));
        assert_eq!(derive("XYZ", Some("a::b::c::d")), pair("xyz", "XYZ"));
    }

    #[test]
    fn test_blank_custom_type_is_absent() {
        assert_eq!(derive("XYZ", Some("")), pair("xyz", "XYZ"));
        assert_eq!(derive("XYZ", Some("   ")), pair("xyz", "XYZ"));
    }

    #[test]
    fn test_placeholder_type() {
        let p = derive("My Coin", None);
        assert_eq!(p.placeholder_type(), "dummy::my_coin::MY_COIN");
        let p = derive("XYZ", Some("0xdead::beefMod::CoolStruct"));
        assert_eq!(p.placeholder_type(), "dummy::beefMod::CoolStruct");
    }

    #[test]
    fn test_illegal_parts_reported_not_rejected() {
        let p = derive("9lives", None);
        assert_eq!(p, pair("9lives", "9LIVES"));
        let bad = p.illegal_parts();
        assert_eq!(bad.len(), 2);
        assert_eq!(bad[0].0, "module");

        assert!(derive("My Coin", None).illegal_parts().is_empty());
        assert!(!is_valid_identifier("has-dash"));
    }
}
