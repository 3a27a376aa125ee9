//! Error types for the WebSocket listener.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use chrome_ws_listener::{Error, Result};
//!
//! fn example(listener: &WsListener) -> Result<()> {
//!     match listener.start() {
//!         Err(Error::AlreadyRunning) => Ok(()),
//!         other => other,
//!     }
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidUrl`] |
//! | Lifecycle | [`Error::AlreadyRunning`], [`Error::WorkerPanicked`] |
//! | Session | [`Error::Session`], [`Error::SessionClosed`] |
//! | Log decoding | [`Error::MalformedEntry`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when listener configuration is incomplete or invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Target URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        message: String,
    },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// `start` was called while a worker is still alive.
    #[error("Listener is already running")]
    AlreadyRunning,

    /// The worker task panicked or was cancelled before finishing teardown.
    #[error("Listener worker terminated abnormally: {message}")]
    WorkerPanicked {
        /// Join error description.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// Browser session collaborator failed.
    ///
    /// Returned for launch, capture-enable, navigation, poll or quit failures.
    #[error("Session error: {message}")]
    Session {
        /// Description of the session failure.
        message: String,
    },

    /// Browser session was closed externally.
    #[error("Session closed")]
    SessionClosed,

    // ========================================================================
    // Log Errors
    // ========================================================================
    /// A performance log entry did not decode as a protocol message.
    #[error("Malformed log entry: {message}")]
    MalformedEntry {
        /// Decoder message.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    #[inline]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a session error.
    #[inline]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Creates a malformed entry error.
    #[inline]
    pub fn malformed_entry(message: impl Into<String>) -> Self {
        Self::MalformedEntry {
            message: message.into(),
        }
    }

    /// Creates a worker panicked error.
    #[inline]
    pub fn worker_panicked(message: impl Into<String>) -> Self {
        Self::WorkerPanicked {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error reports lifecycle misuse or worker death.
    #[inline]
    #[must_use]
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(self, Self::AlreadyRunning | Self::WorkerPanicked { .. })
    }

    /// Returns `true` if this error came from the browser session collaborator.
    #[inline]
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::Session { .. } | Self::SessionClosed)
    }

    /// Returns `true` if this error ends a running worker.
    ///
    /// The listener stays inert afterwards until started again.
    #[inline]
    #[must_use]
    pub fn is_fatal_to_worker(&self) -> bool {
        matches!(
            self,
            Self::Session { .. }
                | Self::SessionClosed
                | Self::MalformedEntry { .. }
                | Self::Json(_)
                | Self::WorkerPanicked { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::session("chromedriver went away");
        assert_eq!(err.to_string(), "Session error: chromedriver went away");
    }

    #[test]
    fn test_already_running_display() {
        assert_eq!(
            Error::AlreadyRunning.to_string(),
            "Listener is already running"
        );
    }

    #[test]
    fn test_invalid_url_display() {
        let err = Error::invalid_url("nope", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Invalid URL 'nope': relative URL without a base"
        );
    }

    #[test]
    fn test_is_lifecycle_error() {
        assert!(Error::AlreadyRunning.is_lifecycle_error());
        assert!(Error::worker_panicked("boom").is_lifecycle_error());
        assert!(!Error::SessionClosed.is_lifecycle_error());
    }

    #[test]
    fn test_is_session_error() {
        assert!(Error::session("x").is_session_error());
        assert!(Error::SessionClosed.is_session_error());
        assert!(!Error::config("x").is_session_error());
    }

    #[test]
    fn test_is_fatal_to_worker() {
        assert!(Error::malformed_entry("bad").is_fatal_to_worker());
        assert!(Error::SessionClosed.is_fatal_to_worker());
        assert!(!Error::AlreadyRunning.is_fatal_to_worker());
        assert!(!Error::config("x").is_fatal_to_worker());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
