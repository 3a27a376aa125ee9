//! WebSocket listener lifecycle.
//!
//! [`WsListener`] owns one background worker at a time. `start` spawns it
//! on the current Tokio runtime; `close` asks it to stop and waits.
//!
//! # Example
//!
//! ```ignore
//! use chrome_ws_listener::WsListener;
//!
//! # async fn example(launcher: impl chrome_ws_listener::SessionLauncher + 'static)
//! #     -> chrome_ws_listener::Result<()> {
//! let listener = WsListener::builder()
//!     .url("https://example.com/live")
//!     .launcher(launcher)
//!     .build()?;
//!
//! listener.start()?;
//! while let Some(message) = listener.messages().recv_timeout(Duration::from_secs(5)) {
//!     println!("{} {}", message.url(), message.payload());
//! }
//! listener.close().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::ListenerId;
use crate::relay::MessageQueue;
use crate::transport::SessionLauncher;

use super::builder::ListenerBuilder;
use super::options::ChromeOptions;
use super::state::{ListenerState, StateCell};
use super::worker::{ListenerConfig, Worker};

// ============================================================================
// WsListener
// ============================================================================

/// Relays WebSocket frames seen by a Chrome session into a [`MessageQueue`].
///
/// # Lifecycle
///
/// - [`start`](Self::start) is only valid while Idle and fails with
///   [`Error::AlreadyRunning`] otherwise.
/// - [`close`](Self::close) stops the worker and waits for it. Without a
///   worker to reap it is a no-op returning `Ok(())`.
/// - Concurrent `close` calls all wait for the worker. Only the caller that
///   reaped it sees its error; the others return `Ok(())` once it is Idle.
/// - A stopped listener can be started again. Each run begins with an empty
///   connection registry; the queue is kept.
///
/// Dropping a running listener signals the worker to stop without waiting.
pub struct WsListener {
    id: ListenerId,
    config: ListenerConfig,
    launcher: Arc<dyn SessionLauncher>,
    queue: MessageQueue,
    state: Arc<StateCell>,
    worker: Mutex<Option<JoinHandle<Result<()>>>>,
}

// ============================================================================
// WsListener - Display
// ============================================================================

impl fmt::Debug for WsListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WsListener")
            .field("id", &self.id)
            .field("url", &self.config.url.as_str())
            .field("state", &self.state())
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// WsListener - Public API
// ============================================================================

impl WsListener {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ListenerBuilder {
        ListenerBuilder::new()
    }

    /// Creates a listener for `url` with default options.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if `url` is not an absolute URL
    pub fn new(url: impl Into<String>, launcher: impl SessionLauncher + 'static) -> Result<Self> {
        Self::builder().url(url).launcher(launcher).build()
    }

    /// Spawns the worker.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyRunning`] if a worker is running or stopping
    /// - [`Error::Config`] if no Tokio runtime is available
    pub fn start(&self) -> Result<()> {
        if !self.state.try_start() {
            return Err(Error::AlreadyRunning);
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                self.state.finish();
                return Err(Error::config(format!(
                    "WsListener::start requires a Tokio runtime: {e}"
                )));
            }
        };

        let worker = Worker {
            listener_id: self.id,
            config: self.config.clone(),
            launcher: Arc::clone(&self.launcher),
            queue: self.queue.clone(),
            state: Arc::clone(&self.state),
        };

        let handle = runtime.spawn(worker.run());

        // A handle left over here belongs to a worker that already failed
        // on its own and was never reaped by `close`.
        if self.worker.lock().replace(handle).is_some() {
            debug!(listener_id = %self.id, "Discarded outcome of previous worker");
        }

        info!(listener_id = %self.id, url = %self.config.url, "Listener started");
        Ok(())
    }

    /// Signals the worker to stop and waits until it has terminated.
    ///
    /// Waits at most one in-flight poll iteration plus session teardown.
    /// If another `close` already took the worker, waits until the
    /// listener is Idle and returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the worker, if it ended abnormally:
    /// - [`Error::Session`] / [`Error::SessionClosed`] from the collaborator
    /// - [`Error::MalformedEntry`] under the fatal policy
    /// - [`Error::WorkerPanicked`] if the worker task panicked
    pub async fn close(&self) -> Result<()> {
        if self.state.request_stop() {
            debug!(listener_id = %self.id, "Stop requested");
        }

        let handle = self.worker.lock().take();
        let Some(handle) = handle else {
            self.state.wait_idle().await;
            return Ok(());
        };

        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(Error::worker_panicked(e.to_string())),
        };

        info!(listener_id = %self.id, ok = outcome.is_ok(), "Listener closed");
        outcome
    }

    /// Returns the delivery queue.
    #[inline]
    #[must_use]
    pub fn messages(&self) -> &MessageQueue {
        &self.queue
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ListenerState {
        self.state.load()
    }

    /// Returns `true` while the worker is polling.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == ListenerState::Running
    }

    /// Returns the listener's id, as attached to its log lines.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns the target page URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.config.url
    }

    /// Returns the pass-through Chrome options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ChromeOptions {
        &self.config.options
    }
}

// ============================================================================
// WsListener - Internal API
// ============================================================================

impl WsListener {
    pub(crate) fn from_parts(
        config: ListenerConfig,
        launcher: Arc<dyn SessionLauncher>,
        queue: MessageQueue,
    ) -> Self {
        Self {
            id: ListenerId::generate(),
            config,
            launcher,
            queue,
            state: Arc::new(StateCell::default()),
            worker: Mutex::new(None),
        }
    }
}

impl Drop for WsListener {
    fn drop(&mut self) {
        if self.state.request_stop() {
            debug!(listener_id = %self.id, "Listener dropped while running");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
