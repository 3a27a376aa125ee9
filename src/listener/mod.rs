//! Listener lifecycle and configuration.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`WsListener`] | Start/close lifecycle around one worker |
//! | [`ListenerBuilder`] | Fluent configuration builder |
//! | [`ChromeOptions`] | Pass-through browser options |
//! | [`ListenerState`] | Idle / Running / Stopping |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for listener configuration.
pub mod builder;

/// Listener lifecycle.
pub mod core;

/// Chrome launch options.
pub mod options;

/// Lifecycle state machine.
pub mod state;

/// Poll loop.
mod worker;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{DEFAULT_POLL_INTERVAL, ListenerBuilder};
pub use self::core::WsListener;
pub use options::{ChromeOptions, DEFAULT_PROFILE};
pub use state::ListenerState;
