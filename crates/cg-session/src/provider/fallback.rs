//! Scenario served when a provider fails.

use cg_core::TerminalScenario;

/// Title of the offline scenario.
pub const OFFLINE_TITLE: &str = "SYSTEM OFFLINE";

/// Stand-in scenario for `level` after a provider error or timeout.
///
/// Solvable with `verify retry`, so a broken feed never strands the player.
pub fn offline_scenario(level: u32) -> TerminalScenario {
    TerminalScenario::new(level, OFFLINE_TITLE)
        .with_description("AI Communication Severed.")
        .with_system_line("Reconnecting...")
        .with_file("error.log", "Connection timeout.")
        .with_solution("retry")
        .with_hint("Try again.")
}
