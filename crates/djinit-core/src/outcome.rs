//! Step outcome reporting shared by both front ends

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result category of a single step invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step ran (or its artifact already existed)
    Success,
    /// Step was not executed
    Skipped,
    /// Step ran with a fallback substitution
    Warning,
    /// Step raised
    Error,
}

impl StepStatus {
    /// Convert to string for JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Success => "success",
            StepStatus::Skipped => "skipped",
            StepStatus::Warning => "warning",
            StepStatus::Error => "error",
        }
    }
}

/// Outcome of one step: status, human message, optional structured payload.
///
/// Produced once per step invocation and consumed immediately by the active
/// front end (printed or serialized). Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub status: StepStatus,
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl StepOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Success,
            message: message.into(),
            data: Value::Object(Default::default()),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Skipped,
            message: message.into(),
            data: Value::Object(Default::default()),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Warning,
            message: message.into(),
            data: Value::Object(Default::default()),
        }
    }

    /// Attach a structured payload
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}
