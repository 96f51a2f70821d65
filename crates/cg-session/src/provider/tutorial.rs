//! Built-in tutorial levels 1-3.

use cg_core::TerminalScenario;

use crate::error::{ProviderError, ProviderResult};

use super::ScenarioProvider;

/// Last level served from the built-in table.
pub const LAST_TUTORIAL_LEVEL: u32 = 3;

const SERVER_ACCESS_LOG: &str = "[2023-10-27 08:41:12] [INFO] Session started for user 'guest'
[2023-10-27 08:42:05] [WARN] Failed login attempt user 'admin'
[2023-10-27 08:44:00] [DEBUG] Env Var updated: DB_PASS='M4st3r_P4ssw0rd!'
[2023-10-27 08:45:22] [INFO] Service restarted
[2023-10-27 08:46:10] [INFO] Backup completed";

/// The built-in scenario for `level`, if it is a tutorial level.
pub fn tutorial_level(level: u32) -> Option<TerminalScenario> {
    let scenario = match level {
        1 => TerminalScenario::new(1, "LEVEL 1: LOG ANALYSIS")
            .with_description("Admin credentials leaked into a server log. Find the admin password.")
            .with_system_line("CyberGuard OS v2.0 (Kernel 5.15)")
            .with_system_line("Analyzing /var/logs/access.log...")
            .with_system_line("Anomaly Detected in Auth Subsystem.")
            .with_file(
                "readme.txt",
                "The admin reset the password yesterday. Check server_access.log for traces.",
            )
            .with_file("server_access.log", SERVER_ACCESS_LOG)
            .with_solution("M4st3r_P4ssw0rd!")
            .with_hint("Try 'cat server_access.log' or 'grep password server_access.log'"),
        2 => TerminalScenario::new(2, "LEVEL 2: SQL INJECTION")
            .with_description("The admin login portal is vulnerable. Get in without the password.")
            .with_system_line("Connected to Web Admin Portal")
            .with_system_line("Login Service: ACTIVE")
            .with_system_line("Protection: LOW")
            .with_solution("SQL_BYPASS")
            .with_hint("Put 'OR' logic in the password. Example: login admin ' or '1'='1")
            .interactive(),
        3 => TerminalScenario::new(3, "LEVEL 3: REMOTE CODE EXECUTION")
            .with_description(
                "The 'ping' tool is vulnerable to command injection. Read /root/flag.txt.",
            )
            .with_system_line("Network Diagnostic Tool v1.0")
            .with_system_line("Ping Service Ready.")
            .with_solution("CYBER{R00T_ACC3SS}")
            .with_hint("Chain a command after the IP with ';'. Example: ping 8.8.8.8; ls")
            .interactive(),
        _ => return None,
    };
    Some(scenario)
}

/// Serves the three built-in tutorial levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TutorialProvider;

#[async_trait::async_trait]
impl ScenarioProvider for TutorialProvider {
    async fn scenario(&self, level: u32) -> ProviderResult<TerminalScenario> {
        tutorial_level(level).ok_or(ProviderError::Unavailable(level))
    }
}
