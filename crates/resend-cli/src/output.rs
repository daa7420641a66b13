//! The JSON result envelope printed once per invocation.

use serde_json::{Map, Value, json};

/// Outcome of a single invocation, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Envelope {
    Success(Value),
    Failure {
        message: String,
        details: Map<String, Value>,
    },
}

impl Envelope {
    pub(crate) const fn success(data: Value) -> Self {
        Self::Success(data)
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self::failure_with(message, Map::new())
    }

    pub(crate) fn failure_with(message: impl Into<String>, details: Map<String, Value>) -> Self {
        Self::Failure {
            message: message.into(),
            details,
        }
    }

    pub(crate) const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// 0 for a success envelope, 1 for any failure.
    pub(crate) const fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    /// `{ success, data }` or `{ success, error: { message, ...details } }`.
    pub(crate) fn to_json(&self) -> Value {
        match self {
            Self::Success(data) => json!({ "success": true, "data": data }),
            Self::Failure { message, details } => {
                let mut error = Map::new();
                error.insert("message".to_string(), Value::String(message.clone()));
                error.extend(details.clone());
                json!({ "success": false, "error": error })
            }
        }
    }

    /// Pretty-printed document with two-space indentation.
    pub(crate) fn render(&self) -> String {
        format!("{:#}", self.to_json())
    }
}
