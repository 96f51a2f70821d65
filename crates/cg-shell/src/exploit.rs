//! Exploit simulations for the interactive tutorial levels.
//!
//! These levels do not expose the file-system tools. Each accepts exactly
//! one command and judges its arguments against a vulnerability pattern.

use cg_core::TerminalScenario;
use tracing::debug;

use crate::outcome::Outcome;
use crate::parser::Command;

/// Canned reply when the ping payload carries no injection.
const ICMP_REPLY: &str = "Ping 8.8.8.8: 64 bytes from 8.8.8.8: icmp_seq=1 ttl=116 time=14.2 ms";

/// Bespoke exploit simulation for an interactive level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exploit {
    /// Level 2: SQL injection through the portal password.
    LoginBypass,
    /// Level 3: shell injection through the ping tool.
    CommandInjection,
}

impl Exploit {
    /// The simulation for `level`, if that level has one.
    pub fn for_level(level: u32) -> Option<Self> {
        match level {
            2 => Some(Self::LoginBypass),
            3 => Some(Self::CommandInjection),
            _ => None,
        }
    }

    /// Judge one command. `name` is the lower-cased command as typed.
    pub fn respond(&self, name: &str, command: Command, scenario: &TerminalScenario) -> Outcome {
        match (self, command) {
            (Self::LoginBypass, Command::Login { password, .. }) => login(&password),
            (Self::LoginBypass, _) => {
                Outcome::line(format!("Command '{name}' not available. Use 'login'."))
            }
            (Self::CommandInjection, Command::Ping { payload }) => ping(&payload, scenario),
            (Self::CommandInjection, _) => Outcome::line(format!("Command '{name}' restricted.")),
        }
    }
}

/// Whether `password` smuggles SQL boolean logic into the query.
pub fn is_sql_injection(password: &str) -> bool {
    password.to_lowercase().contains("' or") || password.contains("'='")
}

/// Whether `payload` chains a second shell command after the ping target.
pub fn is_command_chain(payload: &str) -> bool {
    payload.contains(';') || payload.contains("&&")
}

fn login(password: &str) -> Outcome {
    if is_sql_injection(password) {
        debug!("login bypass accepted");
        Outcome::lines([
            ">> SQL INJECTION DETECTED. BYPASS SUCCESS.",
            ">> LEVEL COMPLETE.",
        ])
        .solved()
    } else {
        Outcome::line("Access Denied. Invalid credentials.")
    }
}

fn ping(payload: &str, scenario: &TerminalScenario) -> Outcome {
    if !is_command_chain(payload) {
        return Outcome::line(ICMP_REPLY);
    }

    if payload.contains("cat") && payload.contains("flag") {
        debug!("command injection reached the flag");
        Outcome::lines([
            format!("root@host:~/ # {payload}"),
            scenario.solution.clone(),
            ">> ROOT ACCESS CONFIRMED.".to_string(),
        ])
        .solved()
    } else {
        Outcome::line("Ping executed. Try reading the flag file.")
    }
}
