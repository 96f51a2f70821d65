use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Ordered map of filename to file content. Order is the order the
/// scenario author listed the files in, which is what `ls` shows.
pub type FileMap = IndexMap<String, String>;

/// Lines seeded into the transcript when a generated scenario ships
/// without its own system message.
pub const DEFAULT_BOOT_LINES: &[&str] = &[
    "Initializing CTF Environment...",
    "Mounting virtual file system...",
];

/// Immutable description of one CTF level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalScenario {
    /// Level number this scenario was built for (1-based).
    pub id: u32,
    /// Short headline shown above the terminal.
    pub title: String,
    /// Flavor text describing the objective.
    pub description: String,
    /// Lines pre-seeded into the transcript when the level loads.
    #[serde(default)]
    pub system_message: Vec<String>,
    /// Virtual files readable by the shell. Empty for interactive levels.
    #[serde(default)]
    pub file_system: FileMap,
    /// The exact flag or credential that passes the level.
    pub solution: String,
    /// Nudge shown to the player.
    pub hint: String,
    /// Whether the level uses a bespoke exploit simulation instead of the
    /// file-system shell.
    #[serde(default)]
    pub is_interactive: bool,
}

/// Wire shape of a generator response. Every field is optional so that
/// missing data is reported as [`CoreError::MissingField`] instead of a
/// serde message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedScenario {
    title: Option<String>,
    description: Option<String>,
    system_message: Option<Vec<String>>,
    file_system: Option<FileMap>,
    solution: Option<String>,
    hint: Option<String>,
}

impl TerminalScenario {
    /// Create an empty, non-interactive scenario for `id`.
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            system_message: Vec::new(),
            file_system: FileMap::new(),
            solution: String::new(),
            hint: String::new(),
            is_interactive: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a system message line.
    pub fn with_system_line(mut self, line: impl Into<String>) -> Self {
        self.system_message.push(line.into());
        self
    }

    /// Add (or replace) a virtual file.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.file_system.insert(name.into(), content.into());
        self
    }

    /// Set the solution flag.
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = solution.into();
        self
    }

    /// Set the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Mark the scenario as an interactive exploit level.
    pub fn interactive(mut self) -> Self {
        self.is_interactive = true;
        self
    }

    /// Build a scenario from a generator's JSON response for `level`.
    ///
    /// `title`, `description`, `fileSystem`, `solution` and `hint` are
    /// required. The payload's own `id` and `isInteractive` are ignored:
    /// the id is always `level` and generated levels are never interactive.
    pub fn from_generated_json(level: u32, json: &str) -> CoreResult<Self> {
        if level == 0 {
            return Err(CoreError::InvalidLevel(level));
        }

        let raw: GeneratedScenario = serde_json::from_str(json)?;

        let title = raw.title.ok_or(CoreError::MissingField("title"))?;
        if title.trim().is_empty() {
            return Err(CoreError::MissingField("title"));
        }
        let description = raw
            .description
            .ok_or(CoreError::MissingField("description"))?;
        let file_system = raw
            .file_system
            .ok_or(CoreError::MissingField("fileSystem"))?;
        let solution = raw.solution.ok_or(CoreError::MissingField("solution"))?;
        if solution.is_empty() {
            return Err(CoreError::MissingField("solution"));
        }
        let hint = raw.hint.ok_or(CoreError::MissingField("hint"))?;

        let system_message = raw
            .system_message
            .unwrap_or_else(|| DEFAULT_BOOT_LINES.iter().map(|s| s.to_string()).collect());

        Ok(Self {
            id: level,
            title,
            description,
            system_message,
            file_system,
            solution,
            hint,
            is_interactive: false,
        })
    }
}
