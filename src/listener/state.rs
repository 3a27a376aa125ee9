//! Lifecycle state shared by the controller and the worker.
//!
//! ```text
//!        start            close              worker exits
//! Idle ─────────► Running ──────► Stopping ──────────────► Idle
//!                    │                                      ▲
//!                    └──────── session failure ─────────────┘
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::Notify;

// ============================================================================
// ListenerState
// ============================================================================

/// Listener lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ListenerState {
    /// No worker alive. `start` is allowed.
    Idle = 0,
    /// Worker is polling.
    Running = 1,
    /// Stop requested; worker finishes its current iteration and tears down.
    Stopping = 2,
}

impl ListenerState {
    #[inline]
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Stopping,
            _ => Self::Idle,
        }
    }
}

// ============================================================================
// StateCell
// ============================================================================

/// Atomic [`ListenerState`]. The only state touched by both sides.
#[derive(Debug)]
pub(crate) struct StateCell {
    state: AtomicU8,
    /// Woken every time the cell returns to Idle.
    idle: Notify,
    /// Woken when a stop is requested.
    stop: Notify,
}

impl Default for StateCell {
    fn default() -> Self {
        Self {
            state: AtomicU8::new(ListenerState::Idle as u8),
            idle: Notify::new(),
            stop: Notify::new(),
        }
    }
}

impl StateCell {
    #[inline]
    pub(crate) fn load(&self) -> ListenerState {
        ListenerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Idle → Running. Returns `false` from any other state.
    #[inline]
    pub(crate) fn try_start(&self) -> bool {
        self.transition(ListenerState::Idle, ListenerState::Running)
    }

    /// Running → Stopping. Returns `false` from any other state.
    #[inline]
    pub(crate) fn request_stop(&self) -> bool {
        let stopped = self.transition(ListenerState::Running, ListenerState::Stopping);
        if stopped {
            self.stop.notify_waiters();
        }
        stopped
    }

    /// Back to Idle, from whatever state.
    #[inline]
    pub(crate) fn finish(&self) {
        self.state.store(ListenerState::Idle as u8, Ordering::Release);
        self.idle.notify_waiters();
    }

    /// Resolves once the cell is Idle, or has passed through Idle since the
    /// call began.
    pub(crate) async fn wait_idle(&self) {
        let notified = self.idle.notified();
        if self.load() == ListenerState::Idle {
            return;
        }
        notified.await;
    }

    /// Resolves once the cell has left Running.
    pub(crate) async fn stop_requested(&self) {
        let notified = self.stop.notified();
        if self.load() != ListenerState::Running {
            return;
        }
        notified.await;
    }

    fn transition(&self, from: ListenerState, to: ListenerState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Resets the cell to Idle when dropped, including during unwinding.
pub(crate) struct IdleOnDrop<'a>(pub(crate) &'a StateCell);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

// ============================================================================
// Tests
// ============================================================================
