//! Connection registry and message emitter.
//!
//! [`Relay`] owns the per-session [`ConnectionRegistry`] and turns classified
//! events into [`WebSocketMessage`] records on the delivery queue.
//!
//! # Flow
//!
//! ```text
//! LogEntry ──classify──► WsEvent ──┬─ ConnectionCreated ──► registry.insert
//!                                  ├─ FrameReceived/Sent ─► resolve url ──► queue.push
//!                                  └─ Ignored ──────────► (dropped)
//! ```

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::ConnectionId;
use crate::protocol::{Frame, LogEntry, WsEvent};

use super::message::{UNKNOWN_URL, WebSocketMessage};
use super::queue::MessageQueue;

// ============================================================================
// MalformedEntryPolicy
// ============================================================================

/// What to do with a log entry that does not decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedEntryPolicy {
    /// Stop the batch and return [`Error::MalformedEntry`], ending the worker.
    #[default]
    Fatal,

    /// Log a warning, drop the entry and continue with the batch.
    Skip,
}

// ============================================================================
// ConnectionRegistry
// ============================================================================

/// Maps connection ids to the URL they were opened with.
///
/// Entries are never removed. A repeated creation event overwrites the URL.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    urls: FxHashMap<ConnectionId, String>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` for `request_id`, returning the URL it replaced.
    pub fn register(&mut self, request_id: ConnectionId, url: String) -> Option<String> {
        self.urls.insert(request_id, url)
    }

    /// Returns the registered URL or [`UNKNOWN_URL`].
    #[inline]
    #[must_use]
    pub fn resolve(&self, request_id: &ConnectionId) -> &str {
        self.urls
            .get(request_id)
            .map_or(UNKNOWN_URL, String::as_str)
    }

    /// Returns `true` if `request_id` has been registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, request_id: &ConnectionId) -> bool {
        self.urls.contains_key(request_id)
    }

    /// Number of known connections.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns `true` if no connection is known.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

// ============================================================================
// BatchStats
// ============================================================================

/// Counters for one processed poll batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Entries in the batch.
    pub entries: usize,
    /// Connections registered.
    pub created: usize,
    /// Messages pushed to the queue.
    pub emitted: usize,
    /// Entries with an untracked method.
    pub ignored: usize,
    /// Malformed entries dropped under [`MalformedEntryPolicy::Skip`].
    pub skipped: usize,
}

// ============================================================================
// Relay
// ============================================================================

/// Registry plus emitter for one listener session.
#[derive(Debug)]
pub struct Relay {
    registry: ConnectionRegistry,
    queue: MessageQueue,
    logging: bool,
}

impl Relay {
    /// Creates a relay with an empty registry.
    ///
    /// With `logging` set, every classified event is also written as an
    /// INFO line.
    #[must_use]
    pub fn new(queue: MessageQueue, logging: bool) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            queue,
            logging,
        }
    }

    /// Returns the connection registry.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Handles a single classified event.
    ///
    /// Returns `true` if a message was pushed.
    pub fn handle(&mut self, event: WsEvent) -> bool {
        match event {
            WsEvent::ConnectionCreated { request_id, url } => {
                self.on_created(request_id, url);
                false
            }
            WsEvent::FrameReceived(frame) => {
                self.emit(frame, true);
                true
            }
            WsEvent::FrameSent(frame) => {
                self.emit(frame, false);
                true
            }
            WsEvent::Ignored { method } => {
                trace!(%method, "Ignoring log entry");
                false
            }
        }
    }

    /// Classifies and handles every entry of one batch, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEntry`] on the first undecodable entry when
    /// `policy` is [`MalformedEntryPolicy::Fatal`]. Messages emitted for
    /// earlier entries of the batch stay queued.
    pub fn process_batch(
        &mut self,
        entries: &[LogEntry],
        policy: MalformedEntryPolicy,
    ) -> Result<BatchStats> {
        let mut stats = BatchStats {
            entries: entries.len(),
            ..BatchStats::default()
        };

        for entry in entries {
            let event = match entry.classify() {
                Ok(event) => event,
                Err(e @ Error::MalformedEntry { .. }) if policy == MalformedEntryPolicy::Skip => {
                    warn!(error = %e, "Skipping malformed log entry");
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            match &event {
                WsEvent::ConnectionCreated { .. } => stats.created += 1,
                WsEvent::Ignored { .. } => stats.ignored += 1,
                WsEvent::FrameReceived(_) | WsEvent::FrameSent(_) => {}
            }

            if self.handle(event) {
                stats.emitted += 1;
            }
        }

        Ok(stats)
    }

    fn on_created(&mut self, request_id: ConnectionId, url: String) {
        if request_id.is_empty() || url.is_empty() {
            debug!(%request_id, %url, "Ignoring incomplete WebSocket creation event");
            return;
        }

        if self.logging {
            info!("WebSocket created: [ID: {request_id}] URL: {url}");
        } else {
            debug!(%request_id, %url, "WebSocket created");
        }

        if let Some(previous) = self.registry.register(request_id.clone(), url) {
            debug!(%request_id, %previous, "WebSocket URL overwritten");
        }
    }

    fn emit(&mut self, frame: Frame, received: bool) {
        let Frame {
            request_id,
            payload,
            timestamp,
        } = frame;
        let url = self.registry.resolve(&request_id).to_string();

        if self.logging {
            if received {
                info!("[Received @ {timestamp}] From {url} : {payload}");
            } else {
                info!("[Sent @ {timestamp}] To {url} : {payload}");
            }
        } else {
            trace!(%request_id, %url, received, len = payload.len(), "WebSocket frame");
        }

        self.queue.push(WebSocketMessage::new(
            payload, request_id, timestamp, url, received,
        ));
    }
}

// ============================================================================
// Tests
// ============================================================================
