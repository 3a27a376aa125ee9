//! DevTools performance log decoding.
//!
//! # Pipeline
//!
//! | Step | Type | Module |
//! |------|------|--------|
//! | Raw poll result | [`LogEntry`] | `log` |
//! | Decoded envelope | [`ProtocolMessage`] | `log` |
//! | Classified event | [`WsEvent`] | `event` |
//!
//! Decoding is the only fallible step. Classification is total: unknown
//! methods become [`WsEvent::Ignored`].

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket event classification.
pub mod event;

/// Raw log entry and protocol envelope.
pub mod log;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::{
    Frame, WEBSOCKET_CREATED, WEBSOCKET_FRAME_RECEIVED, WEBSOCKET_FRAME_SENT, WsEvent,
};
pub use log::{LogEntry, ProtocolMessage};
