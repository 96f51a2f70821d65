//! Scenarios from a directory of generated JSON files.
//!
//! Level `N` is read from `level_N.json`, falling back to the zero-padded
//! `level_00N.json`. Each file holds one generator response in the scenario
//! JSON schema.

use std::io;
use std::path::{Path, PathBuf};

use cg_core::TerminalScenario;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

use super::ScenarioProvider;

const PREFIX: &str = "level_";
const SUFFIX: &str = ".json";

/// Level number encoded in a scenario file name such as `level_7.json` or
/// `level_007.json`.
pub fn level_from_file_name(name: &str) -> Option<u32> {
    let digits = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&level| level > 0)
}

/// Every scenario file in `dir` with its level, sorted by level then name.
pub fn scan(dir: &Path) -> io::Result<Vec<(u32, PathBuf)>> {
    let mut files: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let level = level_from_file_name(&e.file_name().to_string_lossy())?;
            Some((level, e.path()))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Serves levels from `level_*.json` files under one directory.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    /// Serve scenarios from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory scenarios are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, level: u32) -> [PathBuf; 2] {
        [
            self.root.join(format!("{PREFIX}{level}{SUFFIX}")),
            self.root.join(format!("{PREFIX}{level:03}{SUFFIX}")),
        ]
    }
}

#[async_trait::async_trait]
impl ScenarioProvider for DirectoryProvider {
    async fn scenario(&self, level: u32) -> ProviderResult<TerminalScenario> {
        for path in self.candidates(level) {
            match tokio::fs::read_to_string(&path).await {
                Ok(json) => {
                    debug!(level, path = %path.display(), "reading scenario file");
                    return TerminalScenario::from_generated_json(level, &json)
                        .map_err(ProviderError::from);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(ProviderError::Unavailable(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_JSON: &str = r#"{
        "title": "LEVEL 4: BRUTE FORCE",
        "description": "Someone hammered the SSH daemon.",
        "fileSystem": { "auth.log": "Failed password for root\nAccepted password for root" },
        "solution": "CTF{ssh_in}",
        "hint": "grep Accepted auth.log"
    }"#;

    #[test]
    fn file_names() {
        assert_eq!(level_from_file_name("level_4.json"), Some(4));
        assert_eq!(level_from_file_name("level_042.json"), Some(42));
        assert_eq!(level_from_file_name("level_0.json"), None);
        assert_eq!(level_from_file_name("level_.json"), None);
        assert_eq!(level_from_file_name("level_4.yaml"), None);
        assert_eq!(level_from_file_name("level_+4.json"), None);
        assert_eq!(level_from_file_name("notes.json"), None);
    }

    #[test]
    fn scan_sorts_by_level() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level_10.json"), "{}").unwrap();
        std::fs::write(dir.path().join("level_004.json"), "{}").unwrap();
        std::fs::write(dir.path().join("README.md"), "x").unwrap();
        let levels: Vec<u32> = scan(dir.path()).unwrap().into_iter().map(|(l, _)| l).collect();
        assert_eq!(levels, vec![4, 10]);
    }

    #[tokio::test]
    async fn reads_plain_and_padded_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level_4.json"), LEVEL_JSON).unwrap();
        std::fs::write(dir.path().join("level_005.json"), LEVEL_JSON).unwrap();
        let p = DirectoryProvider::new(dir.path());

        let four = p.scenario(4).await.unwrap();
        assert_eq!(four.id, 4);
        assert_eq!(four.title, "LEVEL 4: BRUTE FORCE");
        assert!(!four.is_interactive);

        assert_eq!(p.scenario(5).await.unwrap().id, 5);
    }

    #[tokio::test]
    async fn missing_level_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let p = DirectoryProvider::new(dir.path());
        assert!(matches!(
            p.scenario(9).await,
            Err(ProviderError::Unavailable(9))
        ));
    }

    #[tokio::test]
    async fn bad_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level_6.json"), r#"{"title": "x"}"#).unwrap();
        let p = DirectoryProvider::new(dir.path());
        assert!(matches!(
            p.scenario(6).await,
            Err(ProviderError::Malformed(_))
        ));
    }
}
