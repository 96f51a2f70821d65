//! Error types for the shell.
//!
//! Every variant renders as the exact transcript line the player sees, so
//! the interpreter reports failures by appending `err.to_string()`.

use thiserror::Error;

use crate::decode::DecodeError;

/// Result type for shell command handlers.
pub type ShellResult<T> = Result<T, ShellError>;

/// Non-fatal command failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    /// Missing or malformed arguments. Holds the synopsis.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// The named file is not in the scenario.
    #[error("{command}: {file}: No such file")]
    FileNotFound {
        /// Command that tried to read the file.
        command: &'static str,
        /// Requested filename.
        file: String,
    },

    /// The command name is not known to the file-system shell.
    #[error("bash: {0}: command not found")]
    CommandNotFound(String),

    /// `decode` was given an encoding other than base64 or hex.
    #[error("Unknown encoding type. Supported: base64, hex")]
    UnknownEncoding(String),

    /// The payload is not valid for the requested encoding.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_transcript_phrasing() {
        assert_eq!(
            ShellError::Usage("cat [filename]").to_string(),
            "Usage: cat [filename]"
        );
        assert_eq!(
            ShellError::FileNotFound {
                command: "cat",
                file: "flag.txt".into()
            }
            .to_string(),
            "cat: flag.txt: No such file"
        );
        assert_eq!(
            ShellError::CommandNotFound("nmap".into()).to_string(),
            "bash: nmap: command not found"
        );
        assert_eq!(
            ShellError::from(DecodeError::InvalidHex).to_string(),
            "Error: Invalid Hex string."
        );
    }
}
