//! Command dispatch.
//!
//! `execute` maps one raw line to an [`Outcome`]. Built-ins (`clear`, `exit`,
//! `whoami`, `pwd`, `help`) work on every level. Interactive levels with an
//! [`Exploit`] route everything else through it; all other levels get the
//! file-system tools.

use cg_core::{FileSystem, Listing, TerminalScenario};
use tracing::debug;

use crate::decode::{Encoding, decode};
use crate::error::{ShellError, ShellResult};
use crate::exploit::Exploit;
use crate::help::help_text;
use crate::outcome::{Effect, Outcome};
use crate::parser::{Command, Invocation};
use crate::text;

/// Prompt prefixed to echoed input lines.
pub const PROMPT: &str = "root@kali:~$";

/// Read-only context for one command.
#[derive(Debug, Clone, Copy)]
pub struct ShellContext<'a> {
    /// The active scenario.
    pub scenario: &'a TerminalScenario,
    /// Current level number. Drives help gating and exploit selection.
    pub level: u32,
}

impl<'a> ShellContext<'a> {
    /// Context for `scenario` at `level`.
    pub fn new(scenario: &'a TerminalScenario, level: u32) -> Self {
        Self { scenario, level }
    }
}

/// The transcript line echoing `raw` behind the prompt.
pub fn echo_line(raw: &str) -> String {
    format!("{PROMPT} {raw}")
}

/// Run one line of input. Blank input produces an empty outcome.
pub fn execute(input: &str, ctx: ShellContext<'_>) -> Outcome {
    let Some(inv) = Invocation::parse(input) else {
        return Outcome::default();
    };
    let command = Command::from_invocation(&inv);
    debug!(command = %inv.name, args = inv.args.len(), level = ctx.level, "dispatch");

    match command {
        Command::Clear => return Outcome::effect(Effect::ClearTranscript),
        Command::Exit => return Outcome::effect(Effect::Exit),
        Command::Whoami => return Outcome::line("root"),
        Command::Pwd => return Outcome::line("/root/ctf_challenge"),
        Command::Help => {
            return Outcome::lines(help_text(ctx.level, ctx.scenario.is_interactive));
        }
        _ => {}
    }

    if let Some(exploit) = Exploit::for_level(ctx.level).filter(|_| ctx.scenario.is_interactive) {
        return exploit.respond(&inv.name, command, ctx.scenario);
    }

    run_file_command(command, ctx.scenario).unwrap_or_else(|err| Outcome::line(err.to_string()))
}

fn run_file_command(command: Command, scenario: &TerminalScenario) -> ShellResult<Outcome> {
    let fs = FileSystem::of(scenario);
    match command {
        Command::Ls => Ok(do_ls(fs)),
        Command::Cat { file } => do_cat(fs, file.as_deref()),
        Command::Head { file } => do_head(fs, file.as_deref()),
        Command::Tail { file } => do_tail(fs, file.as_deref()),
        Command::Grep { pattern, file } => do_grep(fs, pattern.as_deref(), file.as_deref()),
        Command::Strings { file } => do_strings(fs, file.as_deref()),
        Command::Rev { text } => do_rev(text.as_deref()),
        Command::Decode { encoding, payload } => do_decode(encoding.as_deref(), payload.as_deref()),
        Command::Verify { flag } => Ok(do_verify(flag.as_deref(), scenario)),
        Command::Login { .. } => Err(ShellError::CommandNotFound("login".to_string())),
        Command::Ping { .. } => Err(ShellError::CommandNotFound("ping".to_string())),
        Command::Unknown { name } => Err(ShellError::CommandNotFound(name)),
        Command::Clear | Command::Exit | Command::Whoami | Command::Pwd | Command::Help => {
            Ok(Outcome::default())
        }
    }
}

/// Read `file` for `command`, turning a missing file into the command's
/// own not-found message.
fn read<'a>(fs: FileSystem<'a>, command: &'static str, file: &str) -> ShellResult<&'a str> {
    fs.read(file).map_err(|_| ShellError::FileNotFound {
        command,
        file: file.to_string(),
    })
}

fn do_ls(fs: FileSystem<'_>) -> Outcome {
    match fs.list() {
        Listing::Empty => Outcome::line("(directory empty)"),
        Listing::Entries(names) => Outcome::line(names.join("    ")),
    }
}

fn do_cat(fs: FileSystem<'_>, file: Option<&str>) -> ShellResult<Outcome> {
    let file = file.ok_or(ShellError::Usage("cat [filename]"))?;
    let content = read(fs, "cat", file)?;
    Ok(Outcome::lines([
        format!("--- START OF {file} ---"),
        content.to_string(),
        "--- END OF FILE ---".to_string(),
    ]))
}

fn do_head(fs: FileSystem<'_>, file: Option<&str>) -> ShellResult<Outcome> {
    let file = file.ok_or(ShellError::Usage("head [filename]"))?;
    let excerpt = text::head(read(fs, "head", file)?);
    let mut out = Outcome::lines(excerpt.lines);
    if excerpt.truncated {
        out.lines.push("... (use 'cat' or 'grep' for more)".to_string());
    }
    Ok(out)
}

fn do_tail(fs: FileSystem<'_>, file: Option<&str>) -> ShellResult<Outcome> {
    let file = file.ok_or(ShellError::Usage("tail [filename]"))?;
    let excerpt = text::tail(read(fs, "tail", file)?);
    let mut lines = Vec::with_capacity(excerpt.lines.len() + 1);
    if excerpt.truncated {
        lines.push("... (previous lines hidden)".to_string());
    }
    lines.extend(excerpt.lines.into_iter().map(str::to_string));
    Ok(Outcome::lines(lines))
}

fn do_grep(
    fs: FileSystem<'_>,
    pattern: Option<&str>,
    file: Option<&str>,
) -> ShellResult<Outcome> {
    let (Some(pattern), Some(file)) = (pattern, file) else {
        return Err(ShellError::Usage("grep [pattern] [filename]"));
    };
    let matches = text::grep(read(fs, "grep", file)?, pattern);
    if matches.is_empty() {
        Ok(Outcome::line("grep: No matches found."))
    } else {
        Ok(Outcome::lines(matches))
    }
}

fn do_strings(fs: FileSystem<'_>, file: Option<&str>) -> ShellResult<Outcome> {
    let file = file.ok_or(ShellError::Usage("strings [filename]"))?;
    let runs = text::printable_runs(read(fs, "strings", file)?);
    if runs.is_empty() {
        Ok(Outcome::line("strings: No printable strings found."))
    } else {
        Ok(Outcome::lines(runs))
    }
}

fn do_rev(text: Option<&str>) -> ShellResult<Outcome> {
    let text = text.ok_or(ShellError::Usage("rev [string]"))?;
    Ok(Outcome::line(text::reverse(text)))
}

fn do_decode(encoding: Option<&str>, payload: Option<&str>) -> ShellResult<Outcome> {
    let (Some(encoding), Some(payload)) = (encoding, payload) else {
        return Err(ShellError::Usage("decode [base64|hex] [string]"));
    };
    let encoding =
        Encoding::parse(encoding).ok_or_else(|| ShellError::UnknownEncoding(encoding.to_string()))?;
    let decoded = decode(encoding, payload)?;
    Ok(Outcome::line(format!("Decoded ({encoding}): {decoded}")))
}

fn do_verify(flag: Option<&str>, scenario: &TerminalScenario) -> Outcome {
    if flag == Some(scenario.solution.as_str()) {
        debug!(level = scenario.id, "flag accepted");
        Outcome::lines([
            ">> FLAG ACCEPTED. SYSTEM SECURED.",
            ">> UPLOADING TO SECURE SERVER...",
        ])
        .solved()
    } else {
        Outcome::line("Error: Invalid Flag. Access Denied.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ACCESS_LOG: &str = "[2023-10-27 08:41:12] [INFO] Session started for user 'guest'
[2023-10-27 08:42:05] [WARN] Failed login attempt user 'admin'
[2023-10-27 08:44:00] [DEBUG] Env Var updated: DB_PASS='M4st3r_P4ssw0rd!'
[2023-10-27 08:45:22] [INFO] Service restarted
[2023-10-27 08:46:10] [INFO] Backup completed";

    fn log_level() -> TerminalScenario {
        TerminalScenario::new(1, "LOG ANALYSIS")
            .with_file("readme.txt", "Check server_access.log.")
            .with_file("server_access.log", ACCESS_LOG)
            .with_solution("M4st3r_P4ssw0rd!")
    }

    fn run(scenario: &TerminalScenario, level: u32, input: &str) -> Outcome {
        execute(input, ShellContext::new(scenario, level))
    }

    fn lines(scenario: &TerminalScenario, input: &str) -> Vec<String> {
        run(scenario, scenario.id, input).lines
    }

    #[test]
    fn blank_input_does_nothing() {
        let s = log_level();
        assert_eq!(run(&s, 1, "   "), Outcome::default());
    }

    #[test]
    fn echo_uses_prompt() {
        assert_eq!(echo_line("ls"), "root@kali:~$ ls");
    }

    #[test]
    fn builtins() {
        let s = log_level();
        assert_eq!(lines(&s, "whoami"), vec!["root"]);
        assert_eq!(lines(&s, "pwd"), vec!["/root/ctf_challenge"]);
        assert_eq!(
            run(&s, 1, "clear").effect,
            Some(Effect::ClearTranscript)
        );
        let exit = run(&s, 1, "exit");
        assert_eq!(exit.effect, Some(Effect::Exit));
        assert!(exit.lines.is_empty());
    }

    #[test]
    fn builtins_work_on_interactive_levels() {
        let s = TerminalScenario::new(2, "SQLI").interactive();
        assert_eq!(run(&s, 2, "whoami").lines, vec!["root"]);
        assert!(run(&s, 2, "help").lines.iter().any(|l| l.contains("login")));
    }

    #[test]
    fn ls_lists_files_in_order() {
        let s = log_level();
        assert_eq!(lines(&s, "ls"), vec!["readme.txt    server_access.log"]);
    }

    #[test]
    fn ls_empty_directory() {
        let s = TerminalScenario::new(9, "EMPTY").with_solution("x");
        assert_eq!(lines(&s, "ls"), vec!["(directory empty)"]);
    }

    #[test]
    fn cat_prints_whole_file_between_markers() {
        let s = log_level();
        assert_eq!(
            lines(&s, "cat server_access.log"),
            vec![
                "--- START OF server_access.log ---".to_string(),
                ACCESS_LOG.to_string(),
                "--- END OF FILE ---".to_string(),
            ]
        );
    }

    #[test]
    fn cat_errors() {
        let s = log_level();
        assert_eq!(lines(&s, "cat"), vec!["Usage: cat [filename]"]);
        assert_eq!(lines(&s, "cat flag.txt"), vec!["cat: flag.txt: No such file"]);
        assert_eq!(
            lines(&s, "cat README.TXT"),
            vec!["cat: README.TXT: No such file"]
        );
    }

    #[test]
    fn head_and_tail_short_file() {
        let s = log_level();
        assert_eq!(lines(&s, "head server_access.log").len(), 5);
        assert_eq!(lines(&s, "tail server_access.log").len(), 5);
        assert_eq!(lines(&s, "head"), vec!["Usage: head [filename]"]);
        assert_eq!(lines(&s, "tail nope"), vec!["tail: nope: No such file"]);
    }

    #[test]
    fn head_and_tail_long_file_notices() {
        let s = TerminalScenario::new(4, "LONG")
            .with_file("auth.log", "1\n2\n3\n4\n5\n6\n7")
            .with_solution("x");
        assert_eq!(
            lines(&s, "head auth.log"),
            vec!["1", "2", "3", "4", "5", "... (use 'cat' or 'grep' for more)"]
        );
        assert_eq!(
            lines(&s, "tail auth.log"),
            vec!["... (previous lines hidden)", "3", "4", "5", "6", "7"]
        );
    }

    #[test]
    fn grep_finds_password_line() {
        let s = log_level();
        assert_eq!(
            lines(&s, "grep password server_access.log"),
            vec!["[2023-10-27 08:44:00] [DEBUG] Env Var updated: DB_PASS='M4st3r_P4ssw0rd!'"]
        );
    }

    #[test]
    fn grep_errors() {
        let s = log_level();
        assert_eq!(
            lines(&s, "grep password"),
            vec!["Usage: grep [pattern] [filename]"]
        );
        assert_eq!(
            lines(&s, "grep kerberos server_access.log"),
            vec!["grep: No matches found."]
        );
        assert_eq!(
            lines(&s, "grep x missing.log"),
            vec!["grep: missing.log: No such file"]
        );
    }

    #[test]
    fn strings_extracts_runs() {
        let s = TerminalScenario::new(60, "DUMP")
            .with_file("process.dmp", "@@#!\u{1}CTF{m3m_dump}\u{0}..ab..")
            .with_file("noise.bin", "!@#$ ab cd")
            .with_solution("CTF{m3m_dump}");
        assert_eq!(lines(&s, "strings process.dmp"), vec!["CTF{m3m_dump}"]);
        assert_eq!(
            lines(&s, "strings noise.bin"),
            vec!["strings: No printable strings found."]
        );
        assert_eq!(lines(&s, "strings"), vec!["Usage: strings [filename]"]);
        assert_eq!(
            lines(&s, "strings x"),
            vec!["strings: x: No such file"]
        );
    }

    #[test]
    fn rev_reverses_first_argument() {
        let s = log_level();
        assert_eq!(lines(&s, "rev }galf{FTC"), vec!["CTF{flag}"]);
        assert_eq!(lines(&s, "rev ab cd"), vec!["ba"]);
        assert_eq!(lines(&s, "rev"), vec!["Usage: rev [string]"]);
    }

    #[test]
    fn decode_works_at_every_level() {
        let s = log_level();
        assert_eq!(
            run(&s, 1, "decode base64 Q1RGe2I2NH0=").lines,
            vec!["Decoded (Base64): CTF{b64}"]
        );
        assert_eq!(
            run(&s, 1, "decode hex 4354467b6865787d").lines,
            vec!["Decoded (Hex): CTF{hex}"]
        );
    }

    #[test]
    fn decode_errors() {
        let s = log_level();
        assert_eq!(
            lines(&s, "decode base64"),
            vec!["Usage: decode [base64|hex] [string]"]
        );
        assert_eq!(lines(&s, "decode"), vec!["Usage: decode [base64|hex] [string]"]);
        assert_eq!(
            lines(&s, "decode rot13 uryyb"),
            vec!["Unknown encoding type. Supported: base64, hex"]
        );
        assert_eq!(
            lines(&s, "decode base64 %%%%"),
            vec!["Error: Invalid Base64 string."]
        );
        assert_eq!(lines(&s, "decode hex xyz1"), vec!["Error: Invalid Hex string."]);
    }

    #[test]
    fn verify_exact_flag_completes() {
        let s = log_level();
        let out = run(&s, 1, "verify M4st3r_P4ssw0rd!");
        assert!(out.completed);
        assert_eq!(
            out.lines,
            vec![
                ">> FLAG ACCEPTED. SYSTEM SECURED.",
                ">> UPLOADING TO SECURE SERVER..."
            ]
        );
    }

    #[test]
    fn verify_is_case_sensitive() {
        let s = log_level();
        let out = run(&s, 1, "verify m4st3r_p4ssw0rd!");
        assert!(!out.completed);
        assert_eq!(out.lines, vec!["Error: Invalid Flag. Access Denied."]);
        assert!(!run(&s, 1, "verify").completed);
    }

    #[test]
    fn unknown_command() {
        let s = log_level();
        assert_eq!(lines(&s, "nmap -sV"), vec!["bash: nmap: command not found"]);
    }

    #[test]
    fn exploit_commands_unknown_on_file_levels() {
        let s = log_level();
        assert_eq!(
            lines(&s, "login admin ' or 1=1"),
            vec!["bash: login: command not found"]
        );
        assert_eq!(lines(&s, "ping 8.8.8.8"), vec!["bash: ping: command not found"]);
    }

    #[test]
    fn interactive_level_does_not_read_files() {
        let s = TerminalScenario::new(3, "RCE")
            .with_file("flag.txt", "leaked")
            .with_solution("CYBER{R00T_ACC3SS}")
            .interactive();
        assert_eq!(
            run(&s, 3, "cat flag.txt").lines,
            vec!["Command 'cat' restricted."]
        );
    }

    #[test]
    fn interactive_scenario_without_exploit_uses_file_tools() {
        let s = TerminalScenario::new(7, "ODD")
            .with_file("a.txt", "b")
            .with_solution("x")
            .interactive();
        assert_eq!(run(&s, 7, "ls").lines, vec!["a.txt"]);
    }

    #[test]
    fn level_two_and_three_end_to_end() {
        let sqli = TerminalScenario::new(2, "SQLI")
            .with_solution("SQL_BYPASS")
            .interactive();
        assert!(run(&sqli, 2, r#"login admin "x' or '1'='1""#).completed);
        assert!(!run(&sqli, 2, "login admin wrongpass").completed);

        let rce = TerminalScenario::new(3, "RCE")
            .with_solution("CYBER{R00T_ACC3SS}")
            .interactive();
        assert!(!run(&rce, 3, "ping 8.8.8.8").completed);
        let out = run(&rce, 3, "ping 8.8.8.8; cat flag.txt");
        assert!(out.completed);
        assert!(out.lines.contains(&"CYBER{R00T_ACC3SS}".to_string()));
    }

    proptest! {
        #[test]
        fn verify_completes_only_on_exact_solution(
            solution in "[A-Za-z0-9{}_!]{1,16}",
            guess in "[A-Za-z0-9{}_!]{1,16}",
        ) {
            let s = TerminalScenario::new(5, "P").with_file("f", "x").with_solution(solution.clone());
            let exact = run(&s, 5, &format!("verify {solution}"));
            prop_assert!(exact.completed);
            let out = run(&s, 5, &format!("verify {guess}"));
            prop_assert_eq!(out.completed, guess == solution);
        }
    }
}
