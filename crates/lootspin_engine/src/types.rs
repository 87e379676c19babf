use std::fmt;

use lootspin_core::SessionReport;
use serde_json::Value;

/// Everything a session reports upward.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Progress(String),
    Report(SessionReport),
    /// The session task returned normally.
    Completed,
    /// The session task panicked or was aborted.
    Crashed(String),
}

/// A session event tagged with the wallet it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchEvent {
    pub wallet: String,
    pub event: SessionEvent,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
    /// Decoded JSON body of an error response, when there was one.
    pub payload: Option<Value>,
}

impl TransportError {
    pub fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.payload = payload;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    InvalidEndpoint,
    InvalidProxy,
    HttpStatus(u16),
    Timeout,
    Connect,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::InvalidEndpoint => write!(f, "invalid endpoint"),
            TransportFailure::InvalidProxy => write!(f, "invalid proxy"),
            TransportFailure::HttpStatus(code) => write!(f, "http status {code}"),
            TransportFailure::Timeout => write!(f, "timeout"),
            TransportFailure::Connect => write!(f, "connection failed"),
            TransportFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            TransportFailure::Network => write!(f, "network error"),
        }
    }
}
