//! WebSocket event classification.
//!
//! Each [`ProtocolMessage`] is decoded once into a [`WsEvent`], so the
//! relay never matches on method strings itself.
//!
//! # Event Types
//!
//! | Method | Variant |
//! |--------|---------|
//! | `Network.webSocketCreated` | [`WsEvent::ConnectionCreated`] |
//! | `Network.webSocketFrameReceived` | [`WsEvent::FrameReceived`] |
//! | `Network.webSocketFrameSent` | [`WsEvent::FrameSent`] |
//! | anything else | [`WsEvent::Ignored`] |

// ============================================================================
// Imports
// ============================================================================

use crate::error::Result;
use crate::identifiers::ConnectionId;

use super::log::{LogEntry, ProtocolMessage};

// ============================================================================
// Constants
// ============================================================================

/// Emitted when the page opens a WebSocket.
pub const WEBSOCKET_CREATED: &str = "Network.webSocketCreated";

/// Emitted for every inbound frame.
pub const WEBSOCKET_FRAME_RECEIVED: &str = "Network.webSocketFrameReceived";

/// Emitted for every outbound frame.
pub const WEBSOCKET_FRAME_SENT: &str = "Network.webSocketFrameSent";

// ============================================================================
// Frame
// ============================================================================

/// Fields shared by both frame directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Connection the frame travelled on.
    pub request_id: ConnectionId,

    /// `response.payloadData`, empty if absent.
    pub payload: String,

    /// DevTools monotonic timestamp in seconds, `0.0` if absent.
    pub timestamp: f64,
}

// ============================================================================
// WsEvent
// ============================================================================

/// Classified WebSocket event.
#[derive(Debug, Clone, PartialEq)]
pub enum WsEvent {
    /// A connection was opened.
    ConnectionCreated {
        /// Connection id, empty if absent.
        request_id: ConnectionId,
        /// Endpoint URL, empty if absent.
        url: String,
    },

    /// A frame arrived from the server.
    FrameReceived(Frame),

    /// A frame was sent by the page.
    FrameSent(Frame),

    /// Any method this crate does not track.
    Ignored {
        /// Event method.
        method: String,
    },
}

impl WsEvent {
    /// Returns `true` for frame events.
    #[inline]
    #[must_use]
    pub fn is_frame(&self) -> bool {
        matches!(self, Self::FrameReceived(_) | Self::FrameSent(_))
    }
}

// ============================================================================
// Classification
// ============================================================================

impl ProtocolMessage {
    /// Classifies the message by method name.
    #[must_use]
    pub fn classify(&self) -> WsEvent {
        match self.method.as_str() {
            WEBSOCKET_CREATED => WsEvent::ConnectionCreated {
                request_id: ConnectionId::new(self.get_id("requestId")),
                url: self.get_string("url"),
            },

            WEBSOCKET_FRAME_RECEIVED => WsEvent::FrameReceived(self.frame()),

            WEBSOCKET_FRAME_SENT => WsEvent::FrameSent(self.frame()),

            _ => WsEvent::Ignored {
                method: self.method.clone(),
            },
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            request_id: ConnectionId::new(self.get_id("requestId")),
            payload: self.get_nested_string("response", "payloadData"),
            timestamp: self.get_f64("timestamp"),
        }
    }
}

impl LogEntry {
    /// Decodes and classifies the entry in one step.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedEntry`] if the entry does not decode.
    #[inline]
    pub fn classify(&self) -> Result<WsEvent> {
        Ok(self.decode()?.classify())
    }
}

// ============================================================================
// Tests
// ============================================================================
