//! Browser transport layer.
//!
//! This module defines the seam between the listener and whatever drives
//! Chrome (chromedriver, a DevTools client, a test double).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  WsListener     │     SessionLauncher          │  Chrome         │
//! │  (worker task)  │─────────────────────────────►│                 │
//! │                 │     BrowserSession           │  performance    │
//! │  Relay          │◄─────── poll_logs ───────────│  log            │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Session Lifecycle
//!
//! 1. `SessionLauncher::launch` - Start Chrome with performance logging
//! 2. `BrowserSession::enable_network` - Send `Network.enable`
//! 3. `BrowserSession::navigate` - Open the target page
//! 4. `BrowserSession::poll_logs` - Repeated until stop or failure
//! 5. `BrowserSession::quit` - Always runs once the session was launched

// ============================================================================
// Submodules
// ============================================================================

/// Session collaborator traits.
pub mod session;

/// Scripted in-memory session for tests.
#[cfg(test)]
pub(crate) mod scripted;

// ============================================================================
// Re-exports
// ============================================================================

pub use session::{BrowserSession, NETWORK_ENABLE, SessionLauncher};
