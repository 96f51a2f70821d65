//! Command parsing for terminal input.

/// One tokenized line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Command name, lower-cased.
    pub name: String,
    /// Positional arguments, case preserved.
    pub args: Vec<String>,
    /// The line exactly as typed.
    pub raw: String,
}

impl Invocation {
    /// Split `raw` on whitespace runs. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut words = raw.split_whitespace();
        let name = words.next()?.to_lowercase();
        Some(Self {
            name,
            args: words.map(str::to_string).collect(),
            raw: raw.to_string(),
        })
    }

    /// Argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset the transcript.
    Clear,
    /// Leave the terminal.
    Exit,
    /// Print the current user.
    Whoami,
    /// Print the working directory.
    Pwd,
    /// Print the command list.
    Help,
    /// List the scenario's files.
    Ls,
    /// Print a whole file.
    Cat {
        /// File to print.
        file: Option<String>,
    },
    /// Print the first lines of a file.
    Head {
        /// File to print.
        file: Option<String>,
    },
    /// Print the last lines of a file.
    Tail {
        /// File to print.
        file: Option<String>,
    },
    /// Case-insensitive line filter.
    Grep {
        /// Substring to look for.
        pattern: Option<String>,
        /// File to search.
        file: Option<String>,
    },
    /// Extract printable runs from a file.
    Strings {
        /// File to scan.
        file: Option<String>,
    },
    /// Reverse a string.
    Rev {
        /// Text to reverse (first argument only).
        text: Option<String>,
    },
    /// Decode a Base64 or hex payload.
    Decode {
        /// Encoding token as typed.
        encoding: Option<String>,
        /// Payload to decode.
        payload: Option<String>,
    },
    /// Submit a flag.
    Verify {
        /// Submitted flag.
        flag: Option<String>,
    },
    /// Portal login (interactive level 2).
    Login {
        /// Username, unused by the check.
        user: Option<String>,
        /// Every argument after the username, joined by single spaces.
        password: String,
    },
    /// Network diagnostic (interactive level 3).
    Ping {
        /// Raw input after the leading `ping ` prefix.
        payload: String,
    },
    /// Anything else.
    Unknown {
        /// The command name as lower-cased.
        name: String,
    },
}

/// Length of the `ping ` prefix stripped from the raw line.
const PING_PREFIX_LEN: usize = "ping ".len();

impl Command {
    /// Parse a tokenized invocation.
    pub fn from_invocation(inv: &Invocation) -> Self {
        let first = || inv.arg(0).map(str::to_string);
        let second = || inv.arg(1).map(str::to_string);

        match inv.name.as_str() {
            "clear" => Self::Clear,
            "exit" => Self::Exit,
            "whoami" => Self::Whoami,
            "pwd" => Self::Pwd,
            "help" => Self::Help,
            "ls" => Self::Ls,
            "cat" => Self::Cat { file: first() },
            "head" => Self::Head { file: first() },
            "tail" => Self::Tail { file: first() },
            "grep" => Self::Grep {
                pattern: first(),
                file: second(),
            },
            "strings" => Self::Strings { file: first() },
            "rev" => Self::Rev { text: first() },
            "decode" => Self::Decode {
                encoding: first(),
                payload: second(),
            },
            "verify" => Self::Verify { flag: first() },
            "login" => Self::Login {
                user: first(),
                password: inv.args.get(1..).unwrap_or(&[]).join(" "),
            },
            "ping" => Self::Ping {
                payload: inv
                    .raw
                    .trim_start()
                    .get(PING_PREFIX_LEN..)
                    .unwrap_or("")
                    .to_string(),
            },
            other => Self::Unknown {
                name: other.to_string(),
            },
        }
    }

    /// Tokenize and parse `raw`. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        Invocation::parse(raw).map(|inv| Self::from_invocation(&inv))
    }
}
