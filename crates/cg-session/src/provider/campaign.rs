//! The full campaign: tutorial levels plus an optional generator.

use std::sync::Arc;

use cg_core::TerminalScenario;

use crate::error::{ProviderError, ProviderResult};

use super::ScenarioProvider;
use super::tutorial::{LAST_TUTORIAL_LEVEL, tutorial_level};

/// Serves levels 1-3 from the built-in table and delegates everything
/// later to a generator.
///
/// Without a generator, generated levels report
/// [`ProviderError::Unavailable`] and the session plays the offline
/// scenario instead.
#[derive(Clone, Default)]
pub struct CampaignProvider {
    generator: Option<Arc<dyn ScenarioProvider>>,
}

impl CampaignProvider {
    /// Tutorial levels only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `generator` for levels after the tutorial.
    pub fn with_generator(mut self, generator: impl ScenarioProvider + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }
}

impl std::fmt::Debug for CampaignProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignProvider")
            .field("generator", &self.generator.is_some())
            .finish()
    }
}

#[async_trait::async_trait]
impl ScenarioProvider for CampaignProvider {
    async fn scenario(&self, level: u32) -> ProviderResult<TerminalScenario> {
        if level <= LAST_TUTORIAL_LEVEL {
            return tutorial_level(level).ok_or(ProviderError::Unavailable(level));
        }
        match &self.generator {
            Some(generator) => generator.scenario(level).await,
            None => Err(ProviderError::Unavailable(level)),
        }
    }
}
