//! JSON rendering for stdout.

use calquery_core::{CalQueryError, CalQueryResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// Two-space indented, one key per line
    Pretty,
    Compact,
}

impl JsonStyle {
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            JsonStyle::Compact
        } else {
            JsonStyle::Pretty
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> CalQueryResult<String> {
    let rendered = match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(value),
        JsonStyle::Compact => serde_json::to_string(value),
    };
    rendered.map_err(|e| CalQueryError::Serialization(e.to_string()))
}

/// `{"error": "<message>"}` on one line.
pub fn error_json(message: &str) -> String {
    let message = serde_json::Value::String(message.to_string());
    format!("{{\"error\": {}}}", message)
}
