//! Transaction types for pump-steamm.
//!
//! The wallet returns an execution response whose shape depends on the wallet,
//! the SDK version and the options it was called with. `effects` may be an
//! object, a JSON-encoded string of that object, or missing entirely. This
//! module decodes any such value into [`RawTransactionResult`] up front, so
//! downstream extraction works against a fixed structure instead of probing
//! for fields.
//!
//! It also holds the request-side types: commands of a programmable
//! transaction block as the front-end hands them to the signer.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A transaction execution response, decoded totally from arbitrary JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawTransactionResult {
    /// Transaction digest, when the response carries one as a string.
    pub digest: Option<String>,

    /// The form `effects` arrived in.
    pub effects: EffectsSource,

    /// Events resolved from `effects`, in emission order.
    pub events: Vec<RawEvent>,

    /// Object changes, when any of the known locations holds a sequence.
    pub object_changes: Option<Vec<RawObjectChange>>,
}

/// How the `effects` field of a response was presented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectsSource {
    /// No `effects` field (or `null`).
    #[default]
    Absent,
    /// An object.
    Inline,
    /// A string holding JSON that decoded successfully.
    Encoded,
    /// A string that is not valid JSON.
    Undecodable { error: String },
    /// Any other JSON kind (number, bool, array).
    Unrecognized,
}

/// One emitted event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEvent {
    /// Fully qualified event type, `None` when missing or not a string.
    pub event_type: Option<String>,
    /// Decoded event fields, `None` when missing or not an object.
    pub parsed_json: Option<Map<String, Value>>,
}

/// One entry of a response's object changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObjectChange {
    /// Change kind, e.g. `created`, `mutated`, `published`.
    pub change_type: Option<String>,
    /// Move type of the object, e.g. `0x2::coin::TreasuryCap<...>`.
    pub object_type: Option<String>,
    /// Object ID.
    pub object_id: Option<String>,
}

impl RawTransactionResult {
    /// Decode a response from an arbitrary JSON value. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let digest = value
            .get("digest")
            .and_then(Value::as_str)
            .map(str::to_string);

        let (effects, body) = resolve_effects(value.get("effects"));

        let events = body
            .as_ref()
            .and_then(|b| b.get("events"))
            .and_then(Value::as_array)
            .map(|arr| arr.iter().map(RawEvent::from_value).collect())
            .unwrap_or_default();

        let object_changes = value
            .get("objectChanges")
            .and_then(Value::as_array)
            .or_else(|| {
                body.as_ref()
                    .and_then(|b| b.get("objectChanges"))
                    .and_then(Value::as_array)
            })
            .map(|arr| arr.iter().map(RawObjectChange::from_value).collect());

        Self {
            digest,
            effects,
            events,
            object_changes,
        }
    }

    /// Decode a response from JSON text.
    ///
    /// Only fails when the text itself is not JSON; any JSON value decodes.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).context("Failed to parse transaction result JSON")?;
        Ok(Self::from_value(&value))
    }
}

impl From<Value> for RawTransactionResult {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Classify `effects` and produce the object events are read from.
fn resolve_effects(effects: Option<&Value>) -> (EffectsSource, Option<Value>) {
    match effects {
        None | Some(Value::Null) => (EffectsSource::Absent, None),
        Some(obj @ Value::Object(_)) => (EffectsSource::Inline, Some(obj.clone())),
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
            Ok(decoded) => (EffectsSource::Encoded, Some(decoded)),
            Err(e) => {
                tracing::debug!(error = %e, "effects string is not valid JSON; no events");
                (
                    EffectsSource::Undecodable {
                        error: e.to_string(),
                    },
                    None,
                )
            }
        },
        Some(_) => (EffectsSource::Unrecognized, None),
    }
}

impl RawEvent {
    pub fn from_value(value: &Value) -> Self {
        Self {
            event_type: value
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_string),
            parsed_json: value
                .get("parsedJson")
                .and_then(Value::as_object)
                .cloned(),
        }
    }

    /// Case-sensitive substring match against the event type.
    pub fn type_contains(&self, needle: &str) -> Option<bool> {
        self.event_type.as_deref().map(|t| t.contains(needle))
    }
}

impl RawObjectChange {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            change_type: text("type"),
            object_type: text("objectType"),
            object_id: text("objectId"),
        }
    }

    pub fn is_created(&self) -> bool {
        self.change_type.as_deref() == Some("created")
    }
}

// =============================================================================
// Request types
// =============================================================================

/// A command in a Programmable Transaction Block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PtbCommand {
    /// Move function call
    MoveCall {
        package: String,
        module: String,
        function: String,
        type_arguments: Vec<String>,
        arguments: Vec<PtbArgument>,
    },

    /// Split coins
    SplitCoins {
        coin: PtbArgument,
        amounts: Vec<PtbArgument>,
    },

    /// Transfer objects
    TransferObjects {
        objects: Vec<PtbArgument>,
        address: PtbArgument,
    },

    /// Publish new package
    Publish {
        modules: Vec<String>, // base64 encoded
        dependencies: Vec<String>,
    },
}

/// Argument reference in a PTB command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PtbArgument {
    /// Reference to a transaction input
    Input { index: u16 },

    /// Reference to a previous command result
    Result { index: u16 },

    /// Reference to a nested result (for multi-return functions)
    NestedResult { index: u16, result_index: u16 },

    /// Gas coin (special input)
    GasCoin,
}

/// Transaction input: an object the signer resolves, or a pure value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionInput {
    /// Pure value with its Move type, e.g. `u64` / `"1500000000"`.
    Pure { type_tag: String, value: String },

    /// Object by ID; version and digest are filled in by the signer.
    Object { object_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(ty: &str, fields: Value) -> Value {
        json!({ "type": ty, "parsedJson": fields })
    }

    #[test]
    fn test_inline_effects_events() {
        let raw = RawTransactionResult::from_value(&json!({
            "digest": "9V3xKM",
            "effects": { "events": [event("0x1::m::E", json!({"a": "1"}))] }
        }));
        assert_eq!(raw.digest.as_deref(), Some("9V3xKM"));
        assert_eq!(raw.effects, EffectsSource::Inline);
        assert_eq!(raw.events.len(), 1);
        assert_eq!(raw.events[0].event_type.as_deref(), Some("0x1::m::E"));
    }

    #[test]
    fn test_encoded_effects_match_inline() {
        let body = json!({ "events": [event("0x1::m::E", json!({"a": "1"}))] });
        let inline = RawTransactionResult::from_value(&json!({ "effects": body.clone() }));
        let encoded =
            RawTransactionResult::from_value(&json!({ "effects": body.to_string() }));
        assert_eq!(encoded.effects, EffectsSource::Encoded);
        assert_eq!(inline.events, encoded.events);
    }

    #[test]
    fn test_undecodable_effects_yield_no_events() {
        let raw = RawTransactionResult::from_value(&json!({ "effects": "{not json" }));
        assert!(matches!(raw.effects, EffectsSource::Undecodable { .. }));
        assert!(raw.events.is_empty());
    }

    #[test]
    fn test_non_sequence_events_are_empty() {
        let raw = RawTransactionResult::from_value(&json!({ "effects": { "events": {"x": 1} } }));
        assert_eq!(raw.effects, EffectsSource::Inline);
        assert!(raw.events.is_empty());

        let raw = RawTransactionResult::from_value(&json!({ "effects": 12 }));
        assert_eq!(raw.effects, EffectsSource::Unrecognized);
    }

    #[test]
    fn test_any_json_decodes() {
        for value in [json!(null), json!([1, 2]), json!("text"), json!(3.5)] {
            let raw = RawTransactionResult::from_value(&value);
            assert_eq!(raw, RawTransactionResult::default());
        }
        let raw: RawTransactionResult = serde_json::from_str("[true]").unwrap();
        assert!(raw.events.is_empty());
    }

    #[test]
    fn test_event_type_must_be_string() {
        let e = RawEvent::from_value(&json!({ "type": 5, "parsedJson": "x" }));
        assert_eq!(e.event_type, None);
        assert_eq!(e.parsed_json, None);
        assert_eq!(e.type_contains("E"), None);
    }

    #[test]
    fn test_object_changes_locations() {
        let change = json!({
            "type": "created",
            "objectType": "0x2::coin::TreasuryCap<0x1::a::A>",
            "objectId": "0x5"
        });

        let top = RawTransactionResult::from_value(&json!({ "objectChanges": [change.clone()] }));
        let changes = top.object_changes.unwrap();
        assert!(changes[0].is_created());
        assert_eq!(changes[0].object_id.as_deref(), Some("0x5"));

        let nested = RawTransactionResult::from_value(
            &json!({ "effects": json!({ "objectChanges": [change] }).to_string() }),
        );
        assert_eq!(nested.object_changes.map(|c| c.len()), Some(1));

        let none = RawTransactionResult::from_value(&json!({ "effects": {} }));
        assert!(none.object_changes.is_none());
    }

    #[test]
    fn test_from_json_str_rejects_non_json() {
        assert!(RawTransactionResult::from_json_str("digest: abc").is_err());
    }

    #[test]
    fn test_command_serialization_is_tagged() {
        let cmd = PtbCommand::SplitCoins {
            coin: PtbArgument::GasCoin,
            amounts: vec![PtbArgument::Input { index: 1 }],
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "SplitCoins");
        assert_eq!(json["coin"]["type"], "GasCoin");
        assert_eq!(json["amounts"][0]["index"], 1);
    }
}
