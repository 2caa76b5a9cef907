//! Response envelope for command output.
//!
//! Every CLI command produces one of these when `--json` is set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,

    pub result: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Cause chain of the error, outermost cause first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<Value>,

    /// Non-fatal warnings, e.g. a partially interpreted result.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl CommandResponse {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result,
            error: None,
            error_details: None,
            warnings: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: Value::Null,
            error: Some(message.into()),
            error_details: None,
            warnings: Vec::new(),
        }
    }

    pub fn from_error(err: &anyhow::Error) -> Self {
        let mut response = Self::error(err.to_string());
        let chain: Vec<String> = err.chain().skip(1).map(|e| e.to_string()).collect();
        if !chain.is_empty() {
            response.error_details = Some(serde_json::json!({ "cause_chain": chain }));
        }
        response
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use serde_json::json;

    #[test]
    fn test_ok_skips_empty_fields() {
        let json = serde_json::to_value(CommandResponse::ok(json!({ "curve": "0xc0" }))).unwrap();
        assert_eq!(json, json!({ "success": true, "result": { "curve": "0xc0" } }));
    }

    #[test]
    fn test_from_error_captures_chain() {
        let err = Err::<(), _>(anyhow::anyhow!("root cause"))
            .context("reading publish response")
            .unwrap_err();
        let response = CommandResponse::from_error(&err);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("reading publish response"));
        assert_eq!(
            response.error_details,
            Some(json!({ "cause_chain": ["root cause"] }))
        );
    }

    #[test]
    fn test_warnings_are_serialized() {
        let response = CommandResponse::ok(json!(42)).with_warnings(vec!["partial".to_string()]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["warnings"], json!(["partial"]));
        assert!(json.get("error").is_none());
    }
}
