use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty band a level falls into.
///
/// Levels 1-3 are the built-in tutorial. Every later band tells a scenario
/// generator what kind of puzzle to build and which artifact to put in the
/// virtual file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    /// Levels 1-3: hand-written walkthrough levels.
    Tutorial,
    /// Levels 4-20: flag encoded once or buried in a long log.
    Intermediate,
    /// Levels 21-50: reversed or double-encoded flags.
    Cryptography,
    /// Levels 51-75: binary-looking dumps that need `strings`.
    Forensics,
    /// Levels 76-90: source code whose accepted input is the flag.
    ReverseEngineering,
    /// Level 91 and up: raw binary or hex signals.
    Singularity,
}

impl DifficultyTier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Tutorial,
        Self::Intermediate,
        Self::Cryptography,
        Self::Forensics,
        Self::ReverseEngineering,
        Self::Singularity,
    ];

    /// Tier for a level number. Level 0 is treated as tutorial.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=3 => Self::Tutorial,
            4..=20 => Self::Intermediate,
            21..=50 => Self::Cryptography,
            51..=75 => Self::Forensics,
            76..=90 => Self::ReverseEngineering,
            _ => Self::Singularity,
        }
    }

    /// Inclusive level range covered by this tier. The last tier is open
    /// ended and reports `u32::MAX`.
    pub fn levels(&self) -> (u32, u32) {
        match self {
            Self::Tutorial => (1, 3),
            Self::Intermediate => (4, 20),
            Self::Cryptography => (21, 50),
            Self::Forensics => (51, 75),
            Self::ReverseEngineering => (76, 90),
            Self::Singularity => (91, u32::MAX),
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tutorial => "Tutorial",
            Self::Intermediate => "Intermediate",
            Self::Cryptography => "Cryptography",
            Self::Forensics => "Forensics",
            Self::ReverseEngineering => "Reverse Engineering",
            Self::Singularity => "Singularity",
        }
    }

    /// What a scenario in this tier asks of the player.
    pub fn briefing(&self) -> &'static str {
        match self {
            Self::Tutorial => "Guided log analysis, login bypass and command injection.",
            Self::Intermediate => "Flag is Base64/Hex encoded or hidden in a long log.",
            Self::Cryptography => "Flag is reversed or double encoded (Base64 of Hex).",
            Self::Forensics => "Binary or memory dump; the flag only survives `strings`.",
            Self::ReverseEngineering => {
                "Source code or pseudo-assembly; the flag is the input it accepts."
            }
            Self::Singularity => "Binary or hex signal that decodes to ASCII.",
        }
    }

    /// Artifact file a generator is asked to produce, if any.
    pub fn artifact(&self) -> Option<&'static str> {
        match self {
            Self::Tutorial => None,
            Self::Intermediate => Some("auth.log"),
            Self::Cryptography => Some("secret.enc"),
            Self::Forensics => Some("process.dmp"),
            Self::ReverseEngineering => Some("login_logic.c"),
            Self::Singularity => Some("signal_from_void.dat"),
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
