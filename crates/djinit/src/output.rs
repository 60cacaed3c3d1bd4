//! Structured event output for the automation front end

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use djinit_core::{BootstrapError, StepOutcome, StepStatus};

/// One event in the newline-delimited stream
#[derive(Debug, Clone, Serialize)]
pub struct JsonEvent {
    /// Step name, e.g. "git" or "virtualenv"
    pub event: String,
    /// Status: success, skipped, warning, error
    pub status: String,
    /// Human readable message describing the event
    pub message: String,
    /// Payload with additional information
    pub data: Value,
    /// UTC timestamp, RFC 3339
    pub ts: String,
    /// Error code when status represents a failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl JsonEvent {
    pub fn new(
        event: &str,
        status: &str,
        message: &str,
        data: Value,
        error_code: Option<String>,
    ) -> Self {
        Self {
            event: event.to_string(),
            status: status.to_string(),
            message: message.to_string(),
            data,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            error_code,
        }
    }
}

/// Renders step events as JSON Lines (`--json`) or terse plain lines.
pub struct EventSink {
    json: bool,
}

impl EventSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Emit a step outcome under its event name.
    pub fn emit_outcome(&self, event: &str, outcome: &StepOutcome) {
        self.emit(
            event,
            outcome.status.as_str(),
            &outcome.message,
            outcome.data.clone(),
            None,
        );
    }

    /// Emit a step failure with its stable error code.
    pub fn emit_error(&self, event: &str, err: &BootstrapError) {
        self.emit(
            event,
            StepStatus::Error.as_str(),
            &err.to_string(),
            Value::Object(Default::default()),
            Some(err.code().to_string()),
        );
    }

    pub fn emit(
        &self,
        event: &str,
        status: &str,
        message: &str,
        data: Value,
        error_code: Option<String>,
    ) {
        let ev = JsonEvent::new(event, status, message, data, error_code);
        if self.json {
            println!("{}", serde_json::to_string(&ev).unwrap());
        } else {
            println!("[{}] {}: {}", ev.status, ev.event, ev.message);
        }
    }
}
