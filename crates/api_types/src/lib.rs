use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Spreadsheet cells come back typed by the sheet, not by us: a category column holding
/// `2024` arrives as a JSON number. These helpers accept whatever the cell held.
mod lenient {
    use super::*;

    /// Any scalar as text; `null` and missing fields are `None`.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(other) => Some(other.to_string()),
        })
    }

    /// Keeps an explicit `null` distinct from a missing field.
    pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Some)
    }
}

/// JavaScript-style truthiness, which is how the endpoint's `ok` flag is judged.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub mod transaction {
    use super::*;

    /// One row of the remote sheet, as returned by `GET`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct TransactionRecord {
        /// Calendar date (`YYYY-MM-DD`). When absent the row's `timestamp` is used.
        #[serde(default, deserialize_with = "lenient::text")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date: Option<String>,
        /// ISO-8601 instant recorded by the sheet when the row was appended.
        #[serde(default, deserialize_with = "lenient::text")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub timestamp: Option<String>,
        /// Flow direction, compared case-insensitively against `income`.
        #[serde(rename = "type", default, deserialize_with = "lenient::text")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub kind: Option<String>,
        #[serde(default, deserialize_with = "lenient::text")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, deserialize_with = "lenient::text")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        /// Raw cell value. `None` means the field was missing, `Some(Null)` an explicit null.
        #[serde(default, deserialize_with = "lenient::present")]
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount: Option<Value>,
    }

    /// Body of the `POST` that appends a row.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct NewTransaction {
        pub date: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub category: String,
        pub description: String,
        /// `None` serializes as `null`, which is what an unparseable amount becomes on the wire.
        pub amount: Option<f64>,
    }

    /// Reply to the `POST`: `{ "ok": true }` or `{ "ok": false, "error": "..." }`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct SubmitResponse {
        #[serde(default)]
        pub ok: Option<Value>,
        #[serde(default, deserialize_with = "lenient::text")]
        pub error: Option<String>,
    }

    impl SubmitResponse {
        pub fn accepted() -> Self {
            Self {
                ok: Some(Value::Bool(true)),
                error: None,
            }
        }

        pub fn rejected(error: impl Into<String>) -> Self {
            Self {
                ok: Some(Value::Bool(false)),
                error: Some(error.into()),
            }
        }

        /// Whether the endpoint accepted the row.
        pub fn is_ok(&self) -> bool {
            self.ok.as_ref().is_some_and(is_truthy)
        }

        /// Server-supplied failure message, if it sent a non-empty one.
        pub fn error_message(&self) -> Option<&str> {
            self.error.as_deref().filter(|msg| !msg.is_empty())
        }
    }
}
