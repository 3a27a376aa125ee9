//! Connection tracking and message delivery.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`WebSocketMessage`] | Immutable frame record handed to consumers |
//! | [`MessageQueue`] | Thread-safe delivery queue |
//! | [`ConnectionRegistry`] | `requestId` to URL map |
//! | [`Relay`] | Registry plus emitter, one per session |

// ============================================================================
// Submodules
// ============================================================================

/// Frame record type.
pub mod message;

/// Delivery queue.
pub mod queue;

/// Connection registry and emitter.
pub mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use message::{Direction, UNKNOWN_URL, WebSocketMessage};
pub use queue::MessageQueue;
pub use registry::{BatchStats, ConnectionRegistry, MalformedEntryPolicy, Relay};
