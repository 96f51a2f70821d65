//! Scenario sources.
//!
//! A [`ScenarioProvider`] turns a level number into a [`TerminalScenario`].
//! Levels 1-3 are built in ([`TutorialProvider`]); later levels come from an
//! external source such as a directory of generated JSON files
//! ([`DirectoryProvider`]). [`CampaignProvider`] stitches the two together.

pub mod campaign;
pub mod directory;
pub mod fallback;
pub mod tutorial;

use cg_core::TerminalScenario;

use crate::error::ProviderResult;

pub use campaign::CampaignProvider;
pub use directory::DirectoryProvider;
pub use fallback::offline_scenario;
pub use tutorial::TutorialProvider;

/// Async source of level scenarios.
///
/// Implementations may be slow or fail; the session bounds every call with
/// a timeout and replaces failures with [`offline_scenario`].
#[async_trait::async_trait]
pub trait ScenarioProvider: Send + Sync {
    /// Produce the scenario for `level`.
    async fn scenario(&self, level: u32) -> ProviderResult<TerminalScenario>;
}
