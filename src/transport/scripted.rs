//! Scripted browser session used by listener tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::listener::ChromeOptions;
use crate::protocol::LogEntry;

use super::session::{BrowserSession, SessionLauncher};

/// One scripted `poll_logs` outcome.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Batch(Vec<LogEntry>),
    Fail(String),
    Panic,
}

#[derive(Debug, Default)]
pub(crate) struct Script {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<String>>,
    launches: AtomicUsize,
    polls: AtomicUsize,
    options: Mutex<Option<ChromeOptions>>,
}

impl Script {
    /// Every collaborator call in order, e.g. `["launch", "Network.enable", ...]`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub(crate) fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub(crate) fn quits(&self) -> usize {
        self.calls.lock().iter().filter(|c| *c == "quit").count()
    }

    pub(crate) fn launched_with(&self) -> Option<ChromeOptions> {
        self.options.lock().clone()
    }

    pub(crate) fn push(&self, step: Step) {
        self.steps.lock().push_back(step);
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }
}

/// Launcher whose sessions replay queued [`Step`]s, then return empty batches.
#[derive(Debug, Default)]
pub(crate) struct ScriptedLauncher {
    script: Arc<Script>,
    poll_delay: Duration,
    fail_launch: bool,
    fail_enable: bool,
    fail_quit: bool,
}

impl ScriptedLauncher {
    pub(crate) fn new() -> Self {
        Self {
            poll_delay: Duration::from_millis(1),
            ..Self::default()
        }
    }

    pub(crate) fn batch(self, entries: Vec<LogEntry>) -> Self {
        self.script.push(Step::Batch(entries));
        self
    }

    pub(crate) fn step(self, step: Step) -> Self {
        self.script.push(step);
        self
    }

    pub(crate) fn poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    pub(crate) fn fail_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub(crate) fn fail_enable(mut self) -> Self {
        self.fail_enable = true;
        self
    }

    pub(crate) fn fail_quit(mut self) -> Self {
        self.fail_quit = true;
        self
    }

    pub(crate) fn script(&self) -> Arc<Script> {
        Arc::clone(&self.script)
    }
}

#[async_trait]
impl SessionLauncher for ScriptedLauncher {
    async fn launch(&self, options: &ChromeOptions) -> Result<Box<dyn BrowserSession>> {
        self.script.launches.fetch_add(1, Ordering::SeqCst);
        self.script.record("launch");
        *self.script.options.lock() = Some(options.clone());

        if self.fail_launch {
            return Err(Error::session("chromedriver not found"));
        }

        Ok(Box::new(ScriptedSession {
            script: Arc::clone(&self.script),
            poll_delay: self.poll_delay,
            fail_enable: self.fail_enable,
            fail_quit: self.fail_quit,
        }))
    }
}

struct ScriptedSession {
    script: Arc<Script>,
    poll_delay: Duration,
    fail_enable: bool,
    fail_quit: bool,
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn execute_cdp_cmd(&mut self, method: &str, _params: Value) -> Result<Value> {
        self.script.record(method);
        if self.fail_enable {
            return Err(Error::session(format!("{method} rejected")));
        }
        Ok(Value::Object(Default::default()))
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.script.record(format!("navigate {url}"));
        Ok(())
    }

    async fn poll_logs(&mut self) -> Result<Vec<LogEntry>> {
        self.script.polls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.poll_delay).await;

        let step = self.script.steps.lock().pop_front();
        match step {
            Some(Step::Batch(entries)) => Ok(entries),
            Some(Step::Fail(message)) => Err(Error::session(message)),
            Some(Step::Panic) => panic!("scripted session panic"),
            None => Ok(Vec::new()),
        }
    }

    async fn quit(&mut self) -> Result<()> {
        self.script.record("quit");
        if self.fail_quit {
            return Err(Error::SessionClosed);
        }
        Ok(())
    }
}
