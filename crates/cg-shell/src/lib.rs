//! Virtual shell for CyberGuard terminal levels.
//!
//! Turns one line of player input into the transcript lines it produces,
//! given the active [`TerminalScenario`](cg_core::TerminalScenario) and the
//! current level. File-system levels get a small set of Unix-flavoured
//! forensics tools (`ls`, `cat`, `grep`, `strings`, `decode`, ...); levels 2
//! and 3 replace them with exploit simulations (login bypass and command
//! injection). The interpreter is pure: it never touches session state and
//! reports clearing, exiting and level completion through its [`Outcome`].

/// Base64 and hex decoding for the `decode` command.
pub mod decode;
/// Error types for the shell.
pub mod error;
/// Exploit simulations for interactive levels.
pub mod exploit;
/// Level-gated help text.
pub mod help;
/// Command dispatch.
pub mod interpreter;
/// Interpreter results.
pub mod outcome;
/// Input tokenization and command parsing.
pub mod parser;
/// Text-processing tools (`head`, `tail`, `grep`, `strings`, `rev`).
pub mod text;

pub use decode::{DecodeError, Encoding, decode};
pub use error::{ShellError, ShellResult};
pub use exploit::Exploit;
pub use help::help_text;
pub use interpreter::{PROMPT, ShellContext, echo_line, execute};
pub use outcome::{Effect, Outcome};
pub use parser::{Command, Invocation};
