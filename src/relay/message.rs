//! Relayed WebSocket message record.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifiers::ConnectionId;

// ============================================================================
// Constants
// ============================================================================

/// URL reported for frames on a connection whose creation was never seen.
pub const UNKNOWN_URL: &str = "Unknown URL";

// ============================================================================
// Direction
// ============================================================================

/// Which way a frame travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Server to page.
    Received,
    /// Page to server.
    Sent,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => f.write_str("Received"),
            Self::Sent => f.write_str("Sent"),
        }
    }
}

// ============================================================================
// WebSocketMessage
// ============================================================================

/// One WebSocket frame observed in the browser.
///
/// Immutable once built; fields are only reachable through getters.
///
/// `timestamp` is the DevTools protocol clock (monotonic seconds since an
/// arbitrary origin), not Unix time. Compare it only against other
/// timestamps from the same browser session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSocketMessage {
    payload: String,
    request_id: ConnectionId,
    timestamp: f64,
    url: String,
    received: bool,
}

impl WebSocketMessage {
    /// Creates a message record.
    #[inline]
    #[must_use]
    pub fn new(
        payload: impl Into<String>,
        request_id: ConnectionId,
        timestamp: f64,
        url: impl Into<String>,
        received: bool,
    ) -> Self {
        Self {
            payload: payload.into(),
            request_id,
            timestamp,
            url: url.into(),
            received,
        }
    }

    /// Raw frame content.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Connection the frame belongs to.
    #[inline]
    #[must_use]
    pub fn request_id(&self) -> &ConnectionId {
        &self.request_id
    }

    /// DevTools protocol timestamp.
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Endpoint URL, or [`UNKNOWN_URL`].
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `true` for inbound frames.
    #[inline]
    #[must_use]
    pub fn received(&self) -> bool {
        self.received
    }

    /// Frame direction.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.received {
            Direction::Received
        } else {
            Direction::Sent
        }
    }

    /// Returns `false` when the URL fell back to [`UNKNOWN_URL`].
    #[inline]
    #[must_use]
    pub fn is_url_resolved(&self) -> bool {
        self.url != UNKNOWN_URL
    }

    /// Consumes the record, returning the payload.
    #[inline]
    #[must_use]
    pub fn into_payload(self) -> String {
        self.payload
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let msg = WebSocketMessage::new("hi", ConnectionId::from("1"), 1.0, "wss://a", true);
        assert_eq!(msg.payload(), "hi");
        assert_eq!(msg.request_id().as_str(), "1");
        assert_eq!(msg.timestamp(), 1.0);
        assert_eq!(msg.url(), "wss://a");
        assert!(msg.received());
        assert_eq!(msg.direction(), Direction::Received);
        assert!(msg.is_url_resolved());
    }

    #[test]
    fn test_unknown_url_is_unresolved() {
        let msg = WebSocketMessage::new("ping", ConnectionId::from("9"), 2.5, UNKNOWN_URL, false);
        assert_eq!(msg.direction(), Direction::Sent);
        assert!(!msg.is_url_resolved());
    }

    #[test]
    fn test_serializes_for_consumers() {
        let msg = WebSocketMessage::new("hi", ConnectionId::from("1"), 1.0, "wss://a", true);
        let json = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(json["request_id"], "1");
        assert_eq!(json["received"], true);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Received.to_string(), "Received");
        assert_eq!(Direction::Sent.to_string(), "Sent");
    }
}
