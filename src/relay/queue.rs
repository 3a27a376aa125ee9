//! Delivery queue shared between the worker and consumers.
//!
//! [`MessageQueue`] is an unbounded FIFO behind a cloneable handle. The
//! worker pushes; any number of threads or tasks pop. Async consumers use
//! [`MessageQueue::recv`], plain threads use [`MessageQueue::recv_blocking`]
//! or [`MessageQueue::recv_timeout`].
//!
//! # Example
//!
//! ```ignore
//! let queue = MessageQueue::new();
//! let listener = WsListener::builder()
//!     .url("https://example.com")
//!     .launcher(launcher)
//!     .queue(queue.clone())
//!     .build()?;
//!
//! listener.start()?;
//! let message = queue.recv().await;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::future;
use std::thread;
use std::time::{Duration, Instant};

use async_channel::{Receiver, Sender};

use super::message::WebSocketMessage;

// ============================================================================
// Constants
// ============================================================================

/// Upper bound on one sleep while [`MessageQueue::recv_timeout`] waits.
const TIMEOUT_POLL_STEP: Duration = Duration::from_millis(1);

// ============================================================================
// MessageQueue
// ============================================================================

/// Unbounded, ordered, thread-safe queue of [`WebSocketMessage`].
///
/// Clones share the same underlying channel. Every handle owns both ends,
/// so the channel never closes while a handle is alive.
#[derive(Clone)]
pub struct MessageQueue {
    sender: Sender<WebSocketMessage>,
    receiver: Receiver<WebSocketMessage>,
}

impl Default for MessageQueue {
    fn default() -> Self {
        let (sender, receiver) = async_channel::unbounded();
        Self { sender, receiver }
    }
}

impl fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageQueue")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl MessageQueue {
    /// Creates an empty queue.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and wakes one waiting consumer.
    pub fn push(&self, message: WebSocketMessage) {
        // Unbounded and never closed: `try_send` cannot fail here.
        let _ = self.sender.try_send(message);
    }

    /// Pops the oldest message without waiting.
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<WebSocketMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits asynchronously for the next message.
    pub async fn recv(&self) -> WebSocketMessage {
        match self.receiver.recv().await {
            Ok(message) => message,
            Err(_) => future::pending().await,
        }
    }

    /// Parks the current thread until a message is available.
    ///
    /// Do not call from inside an async task; use [`Self::recv`] there.
    #[must_use]
    pub fn recv_blocking(&self) -> WebSocketMessage {
        loop {
            if let Ok(message) = self.receiver.recv_blocking() {
                return message;
            }
            thread::park();
        }
    }

    /// Parks the current thread for at most `timeout`.
    ///
    /// Returns `None` if nothing arrived in time.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WebSocketMessage> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(message) = self.try_recv() {
                return Some(message);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            thread::sleep(remaining.min(TIMEOUT_POLL_STEP));
        }
    }

    /// Removes and returns every queued message in order.
    #[must_use]
    pub fn drain(&self) -> Vec<WebSocketMessage> {
        let mut messages = Vec::with_capacity(self.receiver.len());
        while let Ok(message) = self.receiver.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Number of queued messages.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::identifiers::ConnectionId;

    fn message(payload: &str) -> WebSocketMessage {
        WebSocketMessage::new(payload, ConnectionId::from("1"), 0.0, "wss://a", true)
    }

    #[test]
    fn test_fifo_order() {
        let queue = MessageQueue::new();
        queue.push(message("a"));
        queue.push(message("b"));
        queue.push(message("c"));

        assert_eq!(queue.len(), 3);
        let payloads: Vec<_> = queue.drain().into_iter().map(|m| m.into_payload()).collect();
        assert_eq!(payloads, ["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_try_recv_empty() {
        assert!(MessageQueue::new().try_recv().is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let producer = MessageQueue::new();
        let consumer = producer.clone();
        producer.push(message("shared"));
        assert_eq!(consumer.try_recv().map(|m| m.into_payload()).as_deref(), Some("shared"));
    }

    #[test]
    fn test_recv_timeout_expires() {
        let queue = MessageQueue::new();
        assert!(queue.recv_timeout(Duration::from_millis(20)).is_none());
    }

    #[test]
    fn test_recv_blocking_across_threads() {
        let queue = MessageQueue::new();
        let consumer = queue.clone();

        let handle = thread::spawn(move || consumer.recv_blocking().into_payload());
        thread::sleep(Duration::from_millis(20));
        queue.push(message("wake"));

        assert_eq!(handle.join().expect("consumer thread"), "wake");
    }

    #[test]
    fn test_many_consumers_receive_each_message_once() {
        let queue = MessageQueue::new();
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let q = queue.clone();
                thread::spawn(move || {
                    let mut got = Vec::new();
                    while let Some(m) = q.recv_timeout(Duration::from_millis(200)) {
                        got.push(m.into_payload());
                    }
                    got
                })
            })
            .collect();

        for i in 0..100 {
            queue.push(message(&i.to_string()));
        }

        let mut all: Vec<usize> = consumers
            .into_iter()
            .flat_map(|h| h.join().expect("consumer thread"))
            .map(|p| p.parse().expect("numeric payload"))
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_async_recv_wakes_on_push() {
        let queue = MessageQueue::new();
        let consumer = queue.clone();

        let task = tokio::spawn(async move { consumer.recv().await.into_payload() });
        tokio::time::sleep(Duration::from_millis(10)).await;
        queue.push(message("async"));

        assert_eq!(task.await.expect("consumer task"), "async");
    }

    #[tokio::test]
    async fn test_async_and_blocking_consumers_share_messages() {
        let queue = MessageQueue::new();
        let blocking = queue.clone();
        let thread = thread::spawn(move || blocking.recv_blocking().into_payload());

        queue.push(message("one"));
        queue.push(message("two"));

        let first = tokio::time::timeout(Duration::from_secs(1), queue.recv())
            .await
            .expect("async consumer")
            .into_payload();
        let second = thread.join().expect("blocking consumer");

        let mut got = [first, second];
        got.sort();
        assert_eq!(got, ["one", "two"]);
        assert!(queue.is_empty());
    }
}
