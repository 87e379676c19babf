use serde_json::Value;

use crate::item::{classify_item, Item, RawItem};

/// Prefix of every transport-level failure message.
pub const TRANSPORT_FAILURE_MARKER: &str = "Request failed";
pub const UNKNOWN_ERROR_FORMAT: &str = "Unknown error format";
const BALANCE_MARKER: &str = "balance";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a usable response.
    Transport,
    /// The remote service refused the spin for lack of funds.
    BalanceExhausted,
    Other,
}

impl FailureKind {
    /// Balance exhaustion wins over the transport marker when a message
    /// carries both, so such a failure stops the session without the
    /// transport backoff.
    pub fn classify(message: &str) -> Self {
        if message.to_lowercase().contains(BALANCE_MARKER) {
            FailureKind::BalanceExhausted
        } else if message.contains(TRANSPORT_FAILURE_MARKER) {
            FailureKind::Transport
        } else {
            FailureKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Success { items: Vec<Item> },
    Failure { kind: FailureKind, message: String },
}

impl SpinOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        SpinOutcome::Failure {
            kind: FailureKind::classify(&message),
            message,
        }
    }

    /// Builds the outcome of a request that did not complete normally.
    ///
    /// A `message` in the remote error payload takes precedence over the
    /// local description of the failure.
    pub fn transport_failure(payload: Option<&Value>, detail: &str) -> Self {
        match payload.and_then(|p| message_of(p.get("message"))) {
            Some(message) => SpinOutcome::failure(message),
            None => SpinOutcome::failure(format!("{TRANSPORT_FAILURE_MARKER}: {detail}")),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SpinOutcome::Success { .. })
    }
}

/// Classifies a decoded response body.
///
/// An array is a successful spin, even when empty. Anything else is a
/// failure carrying the body's `message` when there is one.
pub fn interpret_body(body: &Value) -> SpinOutcome {
    match body {
        Value::Array(entries) => SpinOutcome::Success {
            items: entries
                .iter()
                .cloned()
                .map(RawItem::from_value)
                .map(|raw| classify_item(&raw))
                .collect(),
        },
        other => SpinOutcome::failure(
            message_of(other.get("message")).unwrap_or_else(|| UNKNOWN_ERROR_FORMAT.to_string()),
        ),
    }
}

fn message_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
