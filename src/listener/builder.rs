//! Builder pattern for listener configuration.
//!
//! Provides a fluent API for configuring and creating [`WsListener`] instances.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! use chrome_ws_listener::{MessageQueue, WsListener};
//!
//! let sink = MessageQueue::new();
//! let listener = WsListener::builder()
//!     .url("https://example.com/live")
//!     .profile("Profile 1")
//!     .headless(false)
//!     .queue(sink.clone())
//!     .logging(true)
//!     .poll_interval(Duration::from_millis(250))
//!     .launcher(my_launcher)
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::relay::{MalformedEntryPolicy, MessageQueue};
use crate::transport::SessionLauncher;

use super::core::WsListener;
use super::options::ChromeOptions;
use super::worker::ListenerConfig;

// ============================================================================
// Constants
// ============================================================================

/// Pause after a performance log poll that returned nothing.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// ============================================================================
// ListenerBuilder
// ============================================================================

/// Builder for configuring a [`WsListener`].
///
/// Use [`WsListener::builder()`] to create a new builder.
#[derive(Clone)]
pub struct ListenerBuilder {
    url: Option<String>,
    options: ChromeOptions,
    queue: Option<MessageQueue>,
    logging: bool,
    poll_interval: Duration,
    malformed_policy: MalformedEntryPolicy,
    launcher: Option<Arc<dyn SessionLauncher>>,
}

impl Default for ListenerBuilder {
    fn default() -> Self {
        Self {
            url: None,
            options: ChromeOptions::new(),
            queue: None,
            logging: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            malformed_policy: MalformedEntryPolicy::default(),
            launcher: None,
        }
    }
}

impl fmt::Debug for ListenerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBuilder")
            .field("url", &self.url)
            .field("options", &self.options)
            .field("shared_queue", &self.queue.is_some())
            .field("logging", &self.logging)
            .field("poll_interval", &self.poll_interval)
            .field("malformed_policy", &self.malformed_policy)
            .field("launcher", &self.launcher.is_some())
            .finish()
    }
}

// ============================================================================
// ListenerBuilder Implementation
// ============================================================================

impl ListenerBuilder {
    /// Creates a new builder with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page to open once the session is up.
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the Chrome profile directory name (default `"Default"`).
    #[inline]
    #[must_use]
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.options.profile = profile.into();
        self
    }

    /// Sets the Chrome user data directory.
    #[inline]
    #[must_use]
    pub fn user_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.user_data_dir = Some(path.into());
        self
    }

    /// Enables or disables headless mode (default enabled).
    #[inline]
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.options.headless = headless;
        self
    }

    /// Replaces all Chrome options at once.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ChromeOptions) -> Self {
        self.options = options;
        self
    }

    /// Delivers into an existing queue instead of a private one.
    ///
    /// Lets several listeners feed one consumer.
    #[inline]
    #[must_use]
    pub fn queue(mut self, queue: MessageQueue) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Writes every classified event as a human-readable INFO line.
    #[inline]
    #[must_use]
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Sets the pause after an empty poll. A non-empty batch is followed
    /// by the next poll right away. Zero polls back-to-back.
    #[inline]
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Chooses how undecodable log entries are handled.
    #[inline]
    #[must_use]
    pub fn malformed_policy(mut self, policy: MalformedEntryPolicy) -> Self {
        self.malformed_policy = policy;
        self
    }

    /// Sets the session launcher.
    #[inline]
    #[must_use]
    pub fn launcher(mut self, launcher: impl SessionLauncher + 'static) -> Self {
        self.launcher = Some(Arc::new(launcher));
        self
    }

    /// Sets a session launcher already shared elsewhere.
    #[inline]
    #[must_use]
    pub fn launcher_arc(mut self, launcher: Arc<dyn SessionLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Builds the listener with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the URL or launcher is not set
    /// - [`Error::InvalidUrl`] if the URL is not absolute
    /// - [`Error::Config`] if the Chrome options are invalid
    pub fn build(self) -> Result<WsListener> {
        let url = self.validate_url()?;
        self.options.validate().map_err(Error::config)?;

        let launcher = self.launcher.ok_or_else(|| {
            Error::config(
                "Session launcher is required. Use .launcher() to set it.\n\
                 Example: WsListener::builder().launcher(my_chromedriver_launcher)",
            )
        })?;

        let config = ListenerConfig {
            url,
            options: self.options,
            logging: self.logging,
            poll_interval: self.poll_interval,
            malformed_policy: self.malformed_policy,
        };

        Ok(WsListener::from_parts(
            config,
            launcher,
            self.queue.unwrap_or_default(),
        ))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ListenerBuilder {
    fn validate_url(&self) -> Result<Url> {
        let raw = self.url.as_deref().ok_or_else(|| {
            Error::config(
                "Target URL is required. Use .url() to set it.\n\
                 Example: WsListener::builder().url(\"https://example.com\")",
            )
        })?;

        Url::parse(raw).map_err(|e| Error::invalid_url(raw, e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::listener::ListenerState;
    use crate::transport::scripted::ScriptedLauncher;

    #[test]
    fn test_build_with_defaults() {
        let listener = ListenerBuilder::new()
            .url("https://example.com")
            .launcher(ScriptedLauncher::new())
            .build()
            .expect("build");

        assert_eq!(listener.url().as_str(), "https://example.com/");
        assert_eq!(listener.options(), &ChromeOptions::new());
        assert_eq!(listener.state(), ListenerState::Idle);
        assert!(listener.messages().is_empty());
    }

    #[test]
    fn test_missing_url() {
        let err = ListenerBuilder::new()
            .launcher(ScriptedLauncher::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_relative_url_rejected() {
        let err = ListenerBuilder::new()
            .url("/just/a/path")
            .launcher(ScriptedLauncher::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_missing_launcher() {
        let err = ListenerBuilder::new()
            .url("https://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_empty_profile_rejected() {
        let err = ListenerBuilder::new()
            .url("https://example.com")
            .profile("")
            .launcher(ScriptedLauncher::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_pass_through_options() {
        let listener = ListenerBuilder::new()
            .url("https://example.com")
            .profile("Work")
            .user_data_dir("/tmp/chrome-data")
            .headless(false)
            .launcher(ScriptedLauncher::new())
            .build()
            .expect("build");

        let options = listener.options();
        assert_eq!(options.profile, "Work");
        assert_eq!(options.user_data_dir, Some(PathBuf::from("/tmp/chrome-data")));
        assert!(!options.headless);
    }

    #[test]
    fn test_external_queue_is_used() {
        let sink = MessageQueue::new();
        let listener = ListenerBuilder::new()
            .url("https://example.com")
            .queue(sink.clone())
            .launcher(ScriptedLauncher::new())
            .build()
            .expect("build");

        sink.push(crate::relay::WebSocketMessage::new(
            "x",
            "1".into(),
            0.0,
            "wss://a",
            true,
        ));
        assert_eq!(listener.messages().len(), 1);
    }

    #[test]
    fn test_debug_hides_launcher() {
        let builder = ListenerBuilder::new().url("https://example.com");
        let debug = format!("{builder:?}");
        assert!(debug.contains("launcher: false"));
    }
}
