use crate::error::{CoreError, CoreResult};
use crate::scenario::{FileMap, TerminalScenario};

/// Result of listing a scenario's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<'a> {
    /// The scenario ships no files.
    Empty,
    /// Filenames in declaration order.
    Entries(Vec<&'a str>),
}

/// Read-only view over the files of one scenario.
///
/// Lookups are exact and case-sensitive. Nothing here mutates the scenario,
/// and nothing survives a level change: the view borrows the scenario it
/// was built from.
#[derive(Debug, Clone, Copy)]
pub struct FileSystem<'a> {
    files: &'a FileMap,
}

impl<'a> FileSystem<'a> {
    /// View the files of `scenario`.
    pub fn of(scenario: &'a TerminalScenario) -> Self {
        Self {
            files: &scenario.file_system,
        }
    }

    /// Return the full content of `name`.
    pub fn read(&self, name: &str) -> CoreResult<&'a str> {
        self.files
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| CoreError::FileNotFound(name.to_string()))
    }

    /// List all filenames.
    pub fn list(&self) -> Listing<'a> {
        if self.files.is_empty() {
            Listing::Empty
        } else {
            Listing::Entries(self.files.keys().map(String::as_str).collect())
        }
    }
}
