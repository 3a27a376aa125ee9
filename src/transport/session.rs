//! Browser session collaborator traits.
//!
//! The listener does not launch Chrome or speak the WebDriver wire protocol
//! itself. A host application supplies a [`SessionLauncher`], typically
//! backed by chromedriver, that produces a [`BrowserSession`].
//!
//! # Contract
//!
//! | Call | Used for |
//! |------|----------|
//! | [`SessionLauncher::launch`] | start Chrome with [`ChromeOptions`] |
//! | [`BrowserSession::execute_cdp_cmd`] | `Network.enable` |
//! | [`BrowserSession::navigate`] | open the target page |
//! | [`BrowserSession::poll_logs`] | drain new `performance` log entries |
//! | [`BrowserSession::quit`] | close the browser |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::Result;
use crate::listener::ChromeOptions;
use crate::protocol::LogEntry;

// ============================================================================
// Constants
// ============================================================================

/// DevTools command that turns on network event reporting.
pub const NETWORK_ENABLE: &str = "Network.enable";

// ============================================================================
// BrowserSession
// ============================================================================

/// A live browser session.
///
/// Owned exclusively by the listener worker; never shared with callers.
#[async_trait]
pub trait BrowserSession: Send {
    /// Runs a raw DevTools command.
    async fn execute_cdp_cmd(&mut self, method: &str, params: Value) -> Result<Value>;

    /// Navigates the session to `url`.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Returns entries logged since the previous call.
    ///
    /// Returns an empty vec when nothing new is available. Errors end the
    /// listener worker.
    async fn poll_logs(&mut self) -> Result<Vec<LogEntry>>;

    /// Closes the browser.
    async fn quit(&mut self) -> Result<()>;

    /// Enables network event capture.
    async fn enable_network(&mut self) -> Result<()> {
        self.execute_cdp_cmd(NETWORK_ENABLE, json!({})).await?;
        Ok(())
    }
}

// ============================================================================
// SessionLauncher
// ============================================================================

/// Factory for [`BrowserSession`]s.
///
/// Called once per listener start.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Starts a browser with performance logging enabled.
    async fn launch(&self, options: &ChromeOptions) -> Result<Box<dyn BrowserSession>>;
}
