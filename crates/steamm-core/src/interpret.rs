//! Transaction-result interpretation.
//!
//! Turns a decoded [`RawTransactionResult`] into [`DomainFacts`]: the new
//! bonding curve and its coin type, buy and sell outcomes, and the reserves
//! reported when a curve transitions to AMM mode.
//!
//! Interpretation is best-effort and total. Malformed pieces degrade to
//! "absent". If extraction hits something it cannot read (an event with no
//! type before the one being searched for, or a recognized field holding an
//! object/array/bool), it stops there and returns the facts gathered so far.
//!
//! # Example
//!
//! ```
//! use pump_steamm_core::interpret::interpret_str;
//!
//! let facts = interpret_str(r#"{
//!     "effects": { "events": [{
//!         "type": "0xdd71::bonding_curve::BuyResult",
//!         "parsedJson": { "sui_amount": "1500000000", "tokens_minted": "42000000000" }
//!     }]}
//! }"#);
//! assert_eq!(
//!     facts.headline().as_deref(),
//!     Some("Successfully bought 42 tokens for 1.5 SUI")
//! );
//! ```

use pump_steamm_types::{CoinType, RawEvent, RawTransactionResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::amounts::format_narrative;

/// Emitted when a token is bound to a new bonding curve.
pub const NEW_BONDING_CURVE_EVENT: &str = "::bonding_curve::NewBondingCurveResult";
/// Emitted by `bonding_curve::buy`.
pub const BUY_EVENT: &str = "::bonding_curve::BuyResult";
/// Emitted by `bonding_curve::sell`.
pub const SELL_EVENT: &str = "::bonding_curve::SellResult";
/// Emitted once, when the curve hands its reserves over to an AMM pool.
pub const TRANSITION_EVENT: &str = "::bonding_curve::TransitionToAMMResult";

/// Facts extracted from one transaction result.
///
/// A `None` field means the corresponding event was not present (or not
/// informative), never zero. Amounts are integer strings at 10^9 scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_type: Option<CoinType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy: Option<BuyResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell: Option<SellResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionReserves>,
    /// Set whenever a transition event is present, even without reserves.
    #[serde(default)]
    pub transitioned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyResult {
    pub sui_amount: String,
    pub tokens_minted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellResult {
    pub token_amount: String,
    pub sui_received: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReserves {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_sui_reserves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_token_reserves: Option<String>,
}

/// Why extraction stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// An event without a string `type` was reached while scanning.
    UntypedEvent { index: usize, searching_for: &'static str },
    /// A recognized field held a value that is neither text nor a number.
    UnexpectedFieldType { field: &'static str, found: &'static str },
}

impl fmt::Display for InterpretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpretError::UntypedEvent {
                index,
                searching_for,
            } => write!(
                f,
                "event #{} has no type (while looking for {})",
                index, searching_for
            ),
            InterpretError::UnexpectedFieldType { field, found } => {
                write!(f, "field '{}' holds {}, expected text", field, found)
            }
        }
    }
}

impl std::error::Error for InterpretError {}

/// Interpret a decoded transaction result. Never fails.
pub fn interpret(raw: &RawTransactionResult) -> DomainFacts {
    interpret_partial(raw).0
}

/// Like [`interpret`], but also reports why extraction stopped early.
pub fn interpret_partial(raw: &RawTransactionResult) -> (DomainFacts, Option<InterpretError>) {
    let mut facts = DomainFacts::default();
    match extract(&raw.events, &mut facts) {
        Ok(()) => {
            tracing::debug!(
                digest = raw.digest.as_deref().unwrap_or("-"),
                events = raw.events.len(),
                curve = facts.curve_id.is_some(),
                buy = facts.buy.is_some(),
                sell = facts.sell.is_some(),
                transitioned = facts.transitioned,
                "interpreted transaction result"
            );
            (facts, None)
        }
        Err(e) => {
            tracing::warn!(
                digest = raw.digest.as_deref().unwrap_or("-"),
                error = %e,
                "stopped interpreting transaction result; keeping partial facts"
            );
            (facts, Some(e))
        }
    }
}

/// Interpret JSON text. Text that is not JSON yields all-absent facts.
pub fn interpret_str(json: &str) -> DomainFacts {
    match RawTransactionResult::from_json_str(json) {
        Ok(raw) => interpret(&raw),
        Err(e) => {
            tracing::debug!(error = %e, "transaction result is not JSON");
            DomainFacts::default()
        }
    }
}

fn extract(events: &[RawEvent], facts: &mut DomainFacts) -> Result<(), InterpretError> {
    if let Some(json) = first_event(events, NEW_BONDING_CURVE_EVENT)?.and_then(payload) {
        facts.curve_id = text_field(json, "bonding_curve_id")?;
        if let Some(raw_type) = text_field(json, "coin_type")? {
            facts.coin_type = CoinType::parse(&raw_type);
            if facts.coin_type.is_none() {
                tracing::debug!(coin_type = %raw_type, "dropping coin type without three parts");
            }
        }
    }

    if let Some(json) = first_event(events, BUY_EVENT)?.and_then(payload) {
        let sui_amount = text_field(json, "sui_amount")?;
        let tokens_minted = text_field(json, "tokens_minted")?;
        if let (Some(sui_amount), Some(tokens_minted)) = (sui_amount, tokens_minted) {
            facts.buy = Some(BuyResult {
                sui_amount,
                tokens_minted,
            });
        }
    }

    if let Some(json) = first_event(events, SELL_EVENT)?.and_then(payload) {
        let token_amount = text_field(json, "token_amount")?;
        let sui_received = text_field(json, "sui_received")?;
        if let (Some(token_amount), Some(sui_received)) = (token_amount, sui_received) {
            facts.sell = Some(SellResult {
                token_amount,
                sui_received,
            });
        }
    }

    if let Some(event) = first_event(events, TRANSITION_EVENT)? {
        facts.transitioned = true;
        if let Some(json) = payload(event) {
            let reserves = TransitionReserves {
                virtual_sui_reserves: text_field(json, "virtual_sui_reserves")?,
                virtual_token_reserves: text_field(json, "virtual_token_reserves")?,
            };
            if reserves.virtual_sui_reserves.is_some() || reserves.virtual_token_reserves.is_some()
            {
                facts.transition = Some(reserves);
            }
        }
    }

    Ok(())
}

/// First event, in sequence order, whose type contains `needle`.
fn first_event<'a>(
    events: &'a [RawEvent],
    needle: &'static str,
) -> Result<Option<&'a RawEvent>, InterpretError> {
    for (index, event) in events.iter().enumerate() {
        match event.type_contains(needle) {
            Some(true) => return Ok(Some(event)),
            Some(false) => {}
            None => {
                return Err(InterpretError::UntypedEvent {
                    index,
                    searching_for: needle,
                })
            }
        }
    }
    Ok(None)
}

fn payload(event: &RawEvent) -> Option<&Map<String, Value>> {
    event.parsed_json.as_ref()
}

/// Read a scalar field. Missing, `null` and `""` count as absent.
fn text_field(
    json: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, InterpretError> {
    match json.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(InterpretError::UnexpectedFieldType {
            field,
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl DomainFacts {
    /// True when no recognizable event was found.
    pub fn is_empty(&self) -> bool {
        *self == DomainFacts::default()
    }

    /// The message a user sees for this result, if any.
    ///
    /// When several events are present the most consequential wins:
    /// transition, then sell, then buy, then curve creation.
    pub fn headline(&self) -> Option<String> {
        if self.transitioned {
            let reserves = self.transition.clone().unwrap_or_default();
            let show = |v: &Option<String>| {
                v.as_deref()
                    .map(format_narrative)
                    .unwrap_or_else(|| "unknown".to_string())
            };
            return Some(format!(
                "Bonding curve has transitioned to AMM mode with {} SUI and {} tokens",
                show(&reserves.virtual_sui_reserves),
                show(&reserves.virtual_token_reserves),
            ));
        }
        if let Some(sell) = &self.sell {
            return Some(format!(
                "Successfully sold {} tokens for {} SUI",
                format_narrative(&sell.token_amount),
                format_narrative(&sell.sui_received)
            ));
        }
        if let Some(buy) = &self.buy {
            return Some(format!(
                "Successfully bought {} tokens for {} SUI",
                format_narrative(&buy.tokens_minted),
                format_narrative(&buy.sui_amount)
            ));
        }
        self.curve_id.as_ref().map(|id| match &self.coin_type {
            Some(coin_type) => format!("Bonding curve {} created for {}", id, coin_type),
            None => format!("Bonding curve {} created", id),
        })
    }
}
