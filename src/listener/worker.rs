//! Background worker: poll → classify → resolve → emit.
//!
//! The worker owns the browser session and the connection registry. It
//! shares only the [`MessageQueue`] and the lifecycle [`StateCell`] with the
//! controlling side.
//!
//! Teardown is guaranteed once a session was launched: `quit` runs after the
//! loop ends, whether it stopped on request, returned an error or panicked.
//! The state returns to Idle as the very last step.

// ============================================================================
// Imports
// ============================================================================

use std::panic::{AssertUnwindSafe, resume_unwind};
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::time::sleep;
use tracing::{debug, error, info, trace, warn};
use url::Url;

use crate::error::Result;
use crate::identifiers::ListenerId;
use crate::relay::{MalformedEntryPolicy, MessageQueue, Relay};
use crate::transport::{BrowserSession, SessionLauncher};

use super::options::ChromeOptions;
use super::state::{IdleOnDrop, ListenerState, StateCell};

// ============================================================================
// ListenerConfig
// ============================================================================

/// Validated listener configuration.
#[derive(Debug, Clone)]
pub(crate) struct ListenerConfig {
    pub url: Url,
    pub options: ChromeOptions,
    pub logging: bool,
    pub poll_interval: Duration,
    pub malformed_policy: MalformedEntryPolicy,
}

// ============================================================================
// Worker
// ============================================================================

/// Everything one worker run needs, moved into the spawned task.
pub(crate) struct Worker {
    pub listener_id: ListenerId,
    pub config: ListenerConfig,
    pub launcher: Arc<dyn SessionLauncher>,
    pub queue: MessageQueue,
    pub state: Arc<StateCell>,
}

impl Worker {
    /// Runs one listener session to completion.
    pub(crate) async fn run(self) -> Result<()> {
        let _idle = IdleOnDrop(&self.state);

        debug!(listener_id = %self.listener_id, "Launching browser session");
        let mut session = self.launcher.launch(&self.config.options).await?;

        let outcome = AssertUnwindSafe(self.drive(session.as_mut()))
            .catch_unwind()
            .await;

        debug!(listener_id = %self.listener_id, "Closing browser session");
        let teardown = session.quit().await;

        match (outcome, teardown) {
            (Err(panic), _) => {
                error!(listener_id = %self.listener_id, "Listener worker panicked");
                resume_unwind(panic)
            }
            (Ok(Err(e)), teardown) => {
                if let Err(quit_err) = teardown {
                    warn!(listener_id = %self.listener_id, error = %quit_err, "Session teardown failed");
                }
                error!(listener_id = %self.listener_id, error = %e, "Listener worker failed");
                Err(e)
            }
            (Ok(Ok(())), Err(quit_err)) => {
                warn!(listener_id = %self.listener_id, error = %quit_err, "Session teardown failed");
                Err(quit_err)
            }
            (Ok(Ok(())), Ok(())) => {
                info!(listener_id = %self.listener_id, "Listener worker stopped");
                Ok(())
            }
        }
    }

    async fn drive(&self, session: &mut dyn BrowserSession) -> Result<()> {
        session.enable_network().await?;
        session.navigate(self.config.url.as_str()).await?;
        info!(listener_id = %self.listener_id, url = %self.config.url, "Capturing WebSocket traffic");

        let mut relay = Relay::new(self.queue.clone(), self.config.logging);

        while self.state.load() == ListenerState::Running {
            let entries = session.poll_logs().await?;

            if !entries.is_empty() {
                let stats = relay.process_batch(&entries, self.config.malformed_policy)?;
                trace!(listener_id = %self.listener_id, ?stats, "Processed log batch");
                continue;
            }

            // Pace only idle polls; a stop request cuts the pause short.
            if !self.config.poll_interval.is_zero() {
                tokio::select! {
                    () = sleep(self.config.poll_interval) => {}
                    () = self.state.stop_requested() => {}
                }
            }
        }

        debug!(
            listener_id = %self.listener_id,
            connections = relay.registry().len(),
            "Stop requested"
        );
        Ok(())
    }
}
