//! Messages into and out of a running session.

use cg_core::TerminalScenario;

/// Input a host sends to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// One line typed by the player.
    Line(String),
    /// Leave the terminal.
    Exit,
}

/// Notification a session sends to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The transcript changed. Carries the full current transcript.
    TranscriptChanged(Vec<String>),
    /// A new level is active.
    LevelChanged {
        /// The level number.
        level: u32,
        /// The scenario now in play.
        scenario: TerminalScenario,
    },
    /// The player solved a level and earned `points`.
    ScoreAwarded(u32),
    /// The final level was solved.
    GameCompleted,
    /// A line arrived while the session could not take commands.
    InputRejected {
        /// The rejected line as typed.
        line: String,
    },
    /// The session stopped at the player's request.
    Exited,
}
