//! Type string parsing utilities.
//!
//! Coin types travel as plain strings (`0xabc::module::STRUCT`). These helpers
//! split them without ever validating the address part, which is assigned at
//! publish time and may still be a placeholder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A three-part `address::module::Struct` coin type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinType {
    pub address: String,
    pub module: String,
    pub name: String,
}

impl CoinType {
    /// Split on `::` and accept only exactly three parts.
    ///
    /// Parts are kept verbatim; empty parts are allowed, matching a plain
    /// string split.
    ///
    /// ```
    /// use pump_steamm_types::CoinType;
    ///
    /// let ct = CoinType::parse("0xabc::mod::Strukt").unwrap();
    /// assert_eq!(ct.module, "mod");
    /// assert!(CoinType::parse("0xabc::mod").is_none());
    /// ```
    pub fn parse(type_str: &str) -> Option<Self> {
        let parts: Vec<&str> = type_str.split("::").collect();
        match parts.as_slice() {
            [address, module, name] => Some(Self {
                address: address.to_string(),
                module: module.to_string(),
                name: name.to_string(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for CoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)
    }
}

impl FromStr for CoinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "Invalid coin type '{}'. Expected 'address::module::Struct'",
                s
            )
        })
    }
}

impl TryFrom<String> for CoinType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CoinType> for String {
    fn from(value: CoinType) -> Self {
        value.to_string()
    }
}

/// Extract the first type argument of a generic object type.
///
/// `0x2::coin::TreasuryCap<0xabc::tok::TOK>` yields `0xabc::tok::TOK`. The
/// argument ends at the next angle bracket of either kind, so a generic coin
/// type is cut down to its base type.
pub fn type_argument(object_type: &str) -> Option<&str> {
    let (_, rest) = object_type.split_once('<')?;
    rest.split(['<', '>']).next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejoins_identically() {
        let ct = CoinType::parse("0xabc::mod::Strukt").unwrap();
        assert_eq!(ct.to_string(), "0xabc::mod::Strukt");
    }

    #[test]
    fn test_parse_wrong_arity() {
        assert!(CoinType::parse("0xabc::mod").is_none());
        assert!(CoinType::parse("0xabc::mod::A::B").is_none());
        assert!(CoinType::parse("").is_none());
    }

    #[test]
    fn test_serde_as_string() {
        let ct: CoinType = serde_json::from_str("\"0x1::a::B\"").unwrap();
        assert_eq!(ct.name, "B");
        assert_eq!(serde_json::to_string(&ct).unwrap(), "\"0x1::a::B\"");
        assert!(serde_json::from_str::<CoinType>("\"0x1::a\"").is_err());
    }

    #[test]
    fn test_type_argument() {
        assert_eq!(
            type_argument("0x2::coin::TreasuryCap<0xabc::tok::TOK>"),
            Some("0xabc::tok::TOK")
        );
        assert_eq!(
            type_argument("0x2::coin::CoinMetadata<0x1::a::B<0x2::c::D>>"),
            Some("0x1::a::B")
        );
        assert_eq!(type_argument("0x2::package::UpgradeCap"), None);
    }
}
