//! Async driver for a [`LevelSession`].
//!
//! [`spawn`] moves the session into a single tokio task. Hosts send input
//! through a cloneable [`SessionHandle`] and read [`SessionEvent`]s from an
//! unbounded channel. The task only ever waits on three things: host input,
//! the one provider call in flight, and the advance timer.

use std::sync::Arc;
use std::time::Duration;

use cg_core::TerminalScenario;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{ProviderError, SessionError, SessionResult};
use crate::events::{SessionEvent, SessionInput};
use crate::provider::{ScenarioProvider, offline_scenario};
use crate::record::Scorecard;
use crate::session::{LevelSession, Next};

/// Cloneable sender side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inputs: mpsc::UnboundedSender<SessionInput>,
}

impl SessionHandle {
    /// Queue one typed line.
    pub fn submit_line(&self, raw: impl Into<String>) -> SessionResult<()> {
        self.send(SessionInput::Line(raw.into()))
    }

    /// Ask the session to stop.
    pub fn request_exit(&self) -> SessionResult<()> {
        self.send(SessionInput::Exit)
    }

    /// Whether the session task has stopped.
    pub fn is_closed(&self) -> bool {
        self.inputs.is_closed()
    }

    fn send(&self, input: SessionInput) -> SessionResult<()> {
        self.inputs.send(input).map_err(|_| SessionError::Closed)
    }
}

/// A session running on the tokio runtime.
#[derive(Debug)]
pub struct SessionRun {
    /// Input side.
    pub handle: SessionHandle,
    /// Events in the order the session produced them.
    pub events: mpsc::UnboundedReceiver<SessionEvent>,
    /// Resolves to the run's scorecard once the session stops.
    pub task: JoinHandle<Scorecard>,
}

/// Start a session on the current tokio runtime.
///
/// The session stops when the player exits or every [`SessionHandle`] has
/// been dropped.
pub fn spawn(provider: impl ScenarioProvider + 'static, config: SessionConfig) -> SessionRun {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let driver = Driver {
        session: LevelSession::new(config),
        provider: Arc::new(provider),
        inputs: input_rx,
        events: event_tx,
    };

    SessionRun {
        handle: SessionHandle { inputs: input_tx },
        events: event_rx,
        task: tokio::spawn(driver.run()),
    }
}

/// Ask `provider` for `level` within `timeout`, falling back to the offline
/// scenario on any failure.
pub async fn fetch_scenario(
    provider: &dyn ScenarioProvider,
    level: u32,
    timeout: Duration,
) -> TerminalScenario {
    let result = tokio::time::timeout(timeout, provider.scenario(level))
        .await
        .unwrap_or_else(|_| Err(ProviderError::Timeout(timeout)));

    match result {
        Ok(scenario) => scenario,
        Err(err) => {
            warn!(level, error = %err, "scenario provider failed, serving offline scenario");
            offline_scenario(level)
        }
    }
}

struct Driver {
    session: LevelSession,
    provider: Arc<dyn ScenarioProvider>,
    inputs: mpsc::UnboundedReceiver<SessionInput>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl Driver {
    async fn run(mut self) -> Scorecard {
        let mut pending = Some(self.session.level());

        while let Some(level) = pending.take() {
            self.session.begin_load(level);
            let Some(scenario) = self.load(level).await else {
                break;
            };
            self.session.install(scenario);
            self.flush();

            let Some(next) = self.play().await else {
                break;
            };
            if self.wait_advance().await {
                pending = Some(next);
            }
        }

        self.flush();
        debug!("session task finished");
        self.session.into_scorecard()
    }

    /// Fetch the scenario for `level` while still answering input.
    /// Returns `None` if the player left first.
    async fn load(&mut self, level: u32) -> Option<TerminalScenario> {
        let provider = Arc::clone(&self.provider);
        let timeout = self.session.config().provider_timeout;
        let fetch = fetch_scenario(provider.as_ref(), level, timeout);
        tokio::pin!(fetch);

        loop {
            tokio::select! {
                scenario = &mut fetch => return Some(scenario),
                input = self.inputs.recv() => {
                    if self.handle(input) == Next::Exit {
                        return None;
                    }
                }
            }
        }
    }

    /// Run commands until the level is solved (`Some(next_level)`) or the
    /// player leaves (`None`).
    async fn play(&mut self) -> Option<u32> {
        loop {
            let input = self.inputs.recv().await;
            match self.handle(input) {
                Next::Stay => {}
                Next::Advance(level) => return Some(level),
                Next::Exit => return None,
            }
        }
    }

    /// Hold the solved level on screen for the advance delay. Returns
    /// `false` if the player left before it elapsed.
    async fn wait_advance(&mut self) -> bool {
        let deadline = Instant::now() + self.session.config().advance_delay;
        loop {
            tokio::select! {
                biased;
                () = sleep_until(deadline) => return true,
                input = self.inputs.recv() => {
                    if self.handle(input) == Next::Exit {
                        debug!("pending advance cancelled");
                        return false;
                    }
                }
            }
        }
    }

    /// Apply one input. A closed channel counts as exit.
    fn handle(&mut self, input: Option<SessionInput>) -> Next {
        let next = match input {
            Some(input) => self.session.apply(input),
            None => self.session.exit(),
        };
        self.flush();
        next
    }

    fn flush(&mut self) {
        for event in self.session.take_events() {
            // A host that stopped listening does not stop the session.
            let _ = self.events.send(event);
        }
    }
}
