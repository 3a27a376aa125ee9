//! Chrome launch options.
//!
//! The listener never interprets these. They are handed as-is to the
//! [`SessionLauncher`](crate::transport::SessionLauncher), which decides how
//! to start Chrome.
//!
//! # Example
//!
//! ```ignore
//! use chrome_ws_listener::ChromeOptions;
//!
//! let options = ChromeOptions::new()
//!     .with_profile("Profile 1")
//!     .with_user_data_dir("/home/me/.config/google-chrome");
//!
//! let args = options.to_args();
//! // ["--user-data-dir=/home/me/.config/google-chrome", "--profile-directory=Profile 1", "--headless"]
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use serde_json::{Value, json};

// ============================================================================
// Constants
// ============================================================================

/// Profile directory used when none is given.
pub const DEFAULT_PROFILE: &str = "Default";

// ============================================================================
// ChromeOptions
// ============================================================================

/// Chrome process configuration passed through to the session launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeOptions {
    /// Profile directory name inside the user data dir.
    pub profile: String,

    /// Chrome user data directory. Chrome's own default when `None`.
    pub user_data_dir: Option<PathBuf>,

    /// Run without a visible window.
    pub headless: bool,

    /// Additional custom command-line arguments.
    pub extra_args: Vec<String>,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ChromeOptions {
    /// Creates options for the `Default` profile in headless mode.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            user_data_dir: None,
            headless: true,
            extra_args: Vec::new(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ChromeOptions {
    /// Sets the profile directory name.
    #[inline]
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Sets the user data directory.
    #[inline]
    #[must_use]
    pub fn with_user_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(path.into());
        self
    }

    /// Enables or disables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl ChromeOptions {
    /// Converts options to Chrome command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(3 + self.extra_args.len());

        if let Some(dir) = &self.user_data_dir {
            args.push(format!("--user-data-dir={}", dir.display()));
        }

        args.push(format!("--profile-directory={}", self.profile));

        if self.headless {
            args.push("--headless".to_string());
        }

        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Driver capabilities required for WebSocket capture.
    ///
    /// Performance logging must be on, otherwise the browser never reports
    /// `Network.webSocket*` events through the log.
    #[must_use]
    pub fn capabilities(&self) -> Value {
        json!({
            "goog:loggingPrefs": { "performance": "ALL" },
            "goog:chromeOptions": { "args": self.to_args() },
        })
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.profile.trim().is_empty() {
            return Err("Profile directory name must not be empty".to_string());
        }
        Ok(())
    }

    /// Returns `true` if headless mode is enabled.
    #[inline]
    #[must_use]
    pub const fn is_headless(&self) -> bool {
        self.headless
    }
}

// ============================================================================
// Tests
// ============================================================================
