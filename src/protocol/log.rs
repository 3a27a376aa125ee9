//! Performance log entry types.
//!
//! Chrome's `performance` log wraps every DevTools event in a JSON string.
//! This module decodes that string into a [`ProtocolMessage`].
//!
//! # Format
//!
//! ```json
//! {
//!   "level": "INFO",
//!   "timestamp": 1700000000000,
//!   "message": "{\"message\":{\"method\":\"Network.webSocketCreated\",\"params\":{...}},\"webview\":\"...\"}"
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, from_str, json};

use crate::error::{Error, Result};

// ============================================================================
// LogEntry
// ============================================================================

/// One raw entry as returned by a performance log poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Log level reported by the driver (usually `INFO`).
    #[serde(default)]
    pub level: String,

    /// JSON-encoded protocol envelope.
    pub message: String,

    /// Wall-clock milliseconds assigned by the driver when it logged the entry.
    #[serde(default)]
    pub timestamp: i64,
}

impl LogEntry {
    /// Creates an entry from a raw envelope string.
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            level: "INFO".to_string(),
            message: message.into(),
            timestamp: 0,
        }
    }

    /// Creates an entry wrapping a DevTools event, shaped the way chromedriver
    /// emits it.
    #[must_use]
    pub fn performance(method: &str, params: Value) -> Self {
        let envelope = json!({
            "message": { "method": method, "params": params },
            "webview": "",
        });
        Self::new(envelope.to_string())
    }

    /// Decodes the wrapped protocol message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEntry`] if `message` is not JSON or lacks an
    /// inner `message` object.
    pub fn decode(&self) -> Result<ProtocolMessage> {
        from_str::<Envelope>(&self.message)
            .map(|envelope| envelope.message)
            .map_err(|e| Error::malformed_entry(e.to_string()))
    }
}

// ============================================================================
// ProtocolMessage
// ============================================================================

/// Outer wrapper added by chromedriver around each DevTools event.
#[derive(Deserialize)]
struct Envelope {
    message: ProtocolMessage,
}

/// A DevTools protocol event carried by a log entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProtocolMessage {
    /// Event name in `Domain.eventName` format. Empty if absent, null or
    /// not a string.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub method: String,

    /// Event-specific data. `Null` if absent.
    #[serde(default)]
    pub params: Value,
}

/// Reads any JSON value, keeping it only if it is a string.
fn string_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

impl ProtocolMessage {
    /// Gets a string from params.
    #[inline]
    pub(crate) fn get_string(&self, key: &str) -> String {
        self.params
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Gets an identifier from params.
    ///
    /// DevTools sends ids as strings, but numeric ids are accepted and
    /// rendered in decimal so they still correlate. Anything else is empty.
    #[inline]
    pub(crate) fn get_id(&self, key: &str) -> String {
        match self.params.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Gets a float from params, `0.0` when absent.
    #[inline]
    pub(crate) fn get_f64(&self, key: &str) -> f64 {
        self.params
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or_default()
    }

    /// Gets a string nested one object deep, e.g. `response.payloadData`.
    #[inline]
    pub(crate) fn get_nested_string(&self, outer: &str, key: &str) -> String {
        self.params
            .get(outer)
            .and_then(|v| v.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
