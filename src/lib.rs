//! Chrome WebSocket listener - relay page WebSocket traffic from DevTools logs.
//!
//! This library watches a Chrome session's `performance` log and rebuilds
//! the WebSocket frames the page sends and receives, without touching the
//! sockets themselves.
//!
//! # Architecture
//!
//! A single background worker per listener runs
//! `poll → classify → resolve → emit`:
//!
//! - **Poll**: [`BrowserSession::poll_logs`] returns new [`LogEntry`] values
//! - **Classify**: each entry decodes into a [`WsEvent`]
//! - **Resolve**: frames look up their URL in the [`ConnectionRegistry`]
//! - **Emit**: a [`WebSocketMessage`] is pushed onto the [`MessageQueue`]
//!
//! Key design principles:
//!
//! - Chrome itself is driven by a caller-supplied [`SessionLauncher`]
//! - The worker shares only the queue and one atomic state with callers
//! - Ordering follows log retrieval order, not wire order
//!
//! # Quick Start
//!
//! ```ignore
//! use chrome_ws_listener::{Result, WsListener};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let listener = WsListener::builder()
//!         .url("https://example.com/live")
//!         .launcher(MyChromedriverLauncher::default())
//!         .logging(true)
//!         .build()?;
//!
//!     listener.start()?;
//!     let message = listener.messages().recv().await;
//!     println!("[{}] {} {}", message.direction(), message.url(), message.payload());
//!
//!     listener.close().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`listener`] | [`WsListener`], builder, options, lifecycle |
//! | [`relay`] | Registry, emitter, queue, message record |
//! | [`protocol`] | Performance log decoding and classification |
//! | [`transport`] | Browser session collaborator traits |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Listener lifecycle and configuration.
///
/// Use [`WsListener::builder()`] to create a configured listener.
pub mod listener;

/// DevTools performance log decoding.
pub mod protocol;

/// Connection registry, emitter and delivery queue.
pub mod relay;

/// Browser session collaborator traits.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Listener types
pub use listener::{ChromeOptions, ListenerBuilder, ListenerState, WsListener};

// Relay types
pub use relay::{
    BatchStats, ConnectionRegistry, Direction, MalformedEntryPolicy, MessageQueue, Relay,
    UNKNOWN_URL, WebSocketMessage,
};

// Protocol types
pub use protocol::{Frame, LogEntry, ProtocolMessage, WsEvent};

// Transport types
pub use transport::{BrowserSession, SessionLauncher};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ConnectionId, ListenerId};
