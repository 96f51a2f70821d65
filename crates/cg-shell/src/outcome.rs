/// Side effect a command asks the session to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Reset the transcript to empty.
    ClearTranscript,
    /// Leave the terminal and hand control back to the host.
    Exit,
}

/// What one line of input produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Lines to append to the transcript, in order.
    pub lines: Vec<String>,
    /// Whether the level was solved by this command.
    pub completed: bool,
    /// Session-level side effect, if any.
    pub effect: Option<Effect>,
}

impl Outcome {
    /// An outcome with a single output line.
    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            ..Self::default()
        }
    }

    /// An outcome with several output lines.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// An outcome with no output that triggers `effect`.
    pub fn effect(effect: Effect) -> Self {
        Self {
            effect: Some(effect),
            ..Self::default()
        }
    }

    /// Mark this outcome as solving the level.
    pub fn solved(mut self) -> Self {
        self.completed = true;
        self
    }
}
