//! Level session state machine.
//!
//! [`LevelSession`] holds everything one player's run needs: the level,
//! its scenario, the transcript and the scorecard. It is synchronous and
//! never waits; the async driver in [`crate::controller`] decides when a
//! scenario is fetched and when a scheduled advance fires, and feeds the
//! results back in. Every state change is queued as a [`SessionEvent`].

use cg_core::{DEFAULT_BOOT_LINES, TerminalScenario};
use cg_shell::{Command, Effect, ShellContext, echo_line, execute};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::events::{SessionEvent, SessionInput};
use crate::record::{LevelRecord, Scorecard};
use crate::transcript::Transcript;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the provider. Commands are rejected.
    Loading,
    /// A scenario is in play and commands run.
    Active,
    /// The level is solved and the next one is scheduled. Commands are
    /// rejected.
    Advancing,
    /// The final level is solved. Only `exit` is accepted.
    Complete,
    /// The player left.
    Exited,
}

/// What the driver must do after an input has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Keep waiting for input.
    Stay,
    /// Schedule loading of the given level after the advance delay.
    Advance(u32),
    /// Stop the session.
    Exit,
}

/// One player's run through the campaign.
#[derive(Debug)]
pub struct LevelSession {
    config: SessionConfig,
    phase: Phase,
    level: u32,
    scenario: Option<TerminalScenario>,
    transcript: Transcript,
    scorecard: Scorecard,
    outbox: Vec<SessionEvent>,
}

impl LevelSession {
    /// Create a session that will open on the configured start level.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            level: config.start_level,
            config,
            phase: Phase::Loading,
            scenario: None,
            transcript: Transcript::new(),
            scorecard: Scorecard::new(),
            outbox: Vec::new(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the current level number.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Get the active scenario. `None` while loading.
    pub fn scenario(&self) -> Option<&TerminalScenario> {
        self.scenario.as_ref()
    }

    /// Get the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Get the levels solved so far.
    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    /// Consume the session, keeping its scorecard.
    pub fn into_scorecard(self) -> Scorecard {
        self.scorecard
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Start loading `level`: drop the scenario and clear the transcript.
    pub fn begin_load(&mut self, level: u32) {
        if self.phase == Phase::Exited {
            return;
        }
        debug!(level, "loading level");
        self.level = level;
        self.phase = Phase::Loading;
        self.scenario = None;
        self.transcript.clear();
    }

    /// Put `scenario` in play for the level being loaded and seed the
    /// transcript with its system message.
    pub fn install(&mut self, scenario: TerminalScenario) {
        if self.phase != Phase::Loading {
            return;
        }

        self.transcript.clear();
        if scenario.system_message.is_empty() {
            self.transcript.extend(DEFAULT_BOOT_LINES.iter().copied());
        } else {
            self.transcript.extend(scenario.system_message.iter().cloned());
        }
        self.phase = Phase::Active;
        info!(level = self.level, title = %scenario.title, "level started");

        self.outbox.push(SessionEvent::LevelChanged {
            level: self.level,
            scenario: scenario.clone(),
        });
        self.scenario = Some(scenario);
        self.publish_transcript();
    }

    /// Apply one host input.
    pub fn apply(&mut self, input: SessionInput) -> Next {
        match input {
            SessionInput::Line(raw) => self.submit_line(&raw),
            SessionInput::Exit => self.exit(),
        }
    }

    /// Run one typed line. Blank lines are ignored; `exit` is honoured in
    /// every phase; anything else only runs while a level is active.
    pub fn submit_line(&mut self, raw: &str) -> Next {
        if self.phase == Phase::Exited {
            return Next::Exit;
        }
        let Some(command) = Command::parse(raw) else {
            return Next::Stay;
        };
        if command == Command::Exit {
            return self.exit();
        }

        let scenario = match (self.phase, &self.scenario) {
            (Phase::Active, Some(scenario)) => scenario,
            (phase, _) => {
                debug!(?phase, line = raw, "input rejected");
                self.outbox.push(SessionEvent::InputRejected {
                    line: raw.to_string(),
                });
                return Next::Stay;
            }
        };

        let outcome = execute(raw, ShellContext::new(scenario, self.level));
        self.transcript.push(echo_line(raw));
        self.transcript.extend(outcome.lines);
        match outcome.effect {
            Some(Effect::ClearTranscript) => self.transcript.clear(),
            Some(Effect::Exit) => return self.exit(),
            None => {}
        }
        self.publish_transcript();

        if outcome.completed {
            self.complete_level()
        } else {
            Next::Stay
        }
    }

    /// Leave the terminal. Cancels whatever the session was waiting for.
    pub fn exit(&mut self) -> Next {
        if self.phase != Phase::Exited {
            info!(level = self.level, solved = self.scorecard.len(), "session exited");
            self.phase = Phase::Exited;
            self.outbox.push(SessionEvent::Exited);
        }
        Next::Exit
    }

    fn complete_level(&mut self) -> Next {
        let title = self
            .scenario
            .as_ref()
            .map(|s| s.title.clone())
            .unwrap_or_default();
        let record = LevelRecord::now(self.level, title);
        let points = record.points;
        info!(level = self.level, points, "level solved");
        self.scorecard.push(record);
        self.outbox.push(SessionEvent::ScoreAwarded(points));

        if self.level >= self.config.final_level {
            info!(total = self.scorecard.total(), "campaign complete");
            self.phase = Phase::Complete;
            self.outbox.push(SessionEvent::GameCompleted);
            Next::Stay
        } else {
            self.phase = Phase::Advancing;
            Next::Advance(self.level + 1)
        }
    }

    fn publish_transcript(&mut self) {
        self.outbox.push(SessionEvent::TranscriptChanged(
            self.transcript.lines().to_vec(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::tutorial::tutorial_level;

    fn loaded(level: u32, scenario: TerminalScenario) -> LevelSession {
        let mut session = LevelSession::new(SessionConfig::default().with_start_level(level));
        session.begin_load(level);
        session.install(scenario);
        session.take_events();
        session
    }

    fn level_one() -> LevelSession {
        loaded(1, tutorial_level(1).unwrap())
    }

    #[test]
    fn new_session_is_loading() {
        let session = LevelSession::new(SessionConfig::default());
        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.level(), 1);
        assert!(session.scenario().is_none());
    }

    #[test]
    fn install_seeds_system_message() {
        let mut session = LevelSession::new(SessionConfig::default());
        session.begin_load(1);
        session.install(tutorial_level(1).unwrap());
        assert_eq!(session.phase(), Phase::Active);

        let events = session.take_events();
        assert!(matches!(
            &events[0],
            SessionEvent::LevelChanged { level: 1, scenario } if scenario.title == "LEVEL 1: LOG ANALYSIS"
        ));
        assert_eq!(
            events[1],
            SessionEvent::TranscriptChanged(vec![
                "CyberGuard OS v2.0 (Kernel 5.15)".to_string(),
                "Analyzing /var/logs/access.log...".to_string(),
                "Anomaly Detected in Auth Subsystem.".to_string(),
            ])
        );
    }

    #[test]
    fn install_without_system_message_uses_boot_lines() {
        let s = TerminalScenario::new(4, "GEN").with_solution("x");
        let session = loaded(4, s);
        assert_eq!(
            session.transcript().lines(),
            [
                "Initializing CTF Environment...",
                "Mounting virtual file system..."
            ]
        );
    }

    #[test]
    fn level_one_end_to_end() {
        let mut session = level_one();

        assert_eq!(session.submit_line("grep password server_access.log"), Next::Stay);
        let lines = session.transcript().lines();
        assert_eq!(
            &lines[lines.len() - 2..],
            [
                "root@kali:~$ grep password server_access.log",
                "[2023-10-27 08:44:00] [DEBUG] Env Var updated: DB_PASS='M4st3r_P4ssw0rd!'",
            ]
        );
        session.take_events();

        assert_eq!(session.submit_line("verify M4st3r_P4ssw0rd!"), Next::Advance(2));
        assert_eq!(session.phase(), Phase::Advancing);
        let events = session.take_events();
        assert!(matches!(events[0], SessionEvent::TranscriptChanged(_)));
        assert_eq!(events[1], SessionEvent::ScoreAwarded(150));
        assert_eq!(session.scorecard().total(), 150);
        assert_eq!(session.scorecard().records()[0].title, "LEVEL 1: LOG ANALYSIS");
    }

    #[test]
    fn wrong_flag_stays() {
        let mut session = level_one();
        assert_eq!(session.submit_line("verify hunter2"), Next::Stay);
        assert_eq!(session.phase(), Phase::Active);
        assert!(session.scorecard().is_empty());
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut session = level_one();
        let before = session.transcript().len();
        assert_eq!(session.submit_line("   "), Next::Stay);
        assert_eq!(session.transcript().len(), before);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn clear_empties_transcript() {
        let mut session = level_one();
        session.submit_line("whoami");
        session.take_events();
        session.submit_line("clear");
        assert!(session.transcript().is_empty());
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::TranscriptChanged(Vec::new())]
        );
    }

    #[test]
    fn exit_stops_without_echo() {
        let mut session = level_one();
        let before = session.transcript().len();
        assert_eq!(session.submit_line("EXIT"), Next::Exit);
        assert_eq!(session.phase(), Phase::Exited);
        assert_eq!(session.transcript().len(), before);
        assert_eq!(session.take_events(), vec![SessionEvent::Exited]);

        assert_eq!(session.submit_line("ls"), Next::Exit);
        assert_eq!(session.exit(), Next::Exit);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn input_rejected_while_advancing_and_loading() {
        let mut session = level_one();
        session.submit_line("verify M4st3r_P4ssw0rd!");
        session.take_events();

        session.submit_line("ls");
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::InputRejected {
                line: "ls".to_string()
            }]
        );

        session.begin_load(2);
        assert!(session.transcript().is_empty());
        session.submit_line("whoami");
        assert!(matches!(
            session.take_events()[..],
            [SessionEvent::InputRejected { .. }]
        ));

        assert_eq!(session.apply(SessionInput::Exit), Next::Exit);
    }

    #[test]
    fn final_level_completes_game() {
        let s = TerminalScenario::new(100, "FINALE")
            .with_file("core.dat", "x")
            .with_solution("CTF{end}");
        let mut session = loaded(100, s);

        assert_eq!(session.submit_line("verify CTF{end}"), Next::Stay);
        assert_eq!(session.phase(), Phase::Complete);
        let events = session.take_events();
        assert_eq!(
            &events[1..],
            [SessionEvent::ScoreAwarded(5100), SessionEvent::GameCompleted]
        );

        session.submit_line("ls");
        assert!(matches!(
            session.take_events()[..],
            [SessionEvent::InputRejected { .. }]
        ));
        assert_eq!(session.submit_line("exit"), Next::Exit);
    }

    #[test]
    fn exploit_levels_through_session() {
        let mut session = loaded(2, tutorial_level(2).unwrap());
        assert_eq!(
            session.submit_line("login admin ' or '1'='1"),
            Next::Advance(3)
        );

        let mut session = loaded(3, tutorial_level(3).unwrap());
        assert_eq!(session.submit_line("ping 8.8.8.8; cat flag.txt"), Next::Advance(4));
        assert!(
            session
                .transcript()
                .lines()
                .contains(&"CYBER{R00T_ACC3SS}".to_string())
        );
    }

    #[test]
    fn install_after_exit_is_ignored() {
        let mut session = LevelSession::new(SessionConfig::default());
        session.begin_load(1);
        session.exit();
        session.take_events();
        session.install(tutorial_level(1).unwrap());
        assert_eq!(session.phase(), Phase::Exited);
        assert!(session.take_events().is_empty());
    }
}
