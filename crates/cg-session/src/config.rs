//! Configuration for a level session.

use std::time::Duration;

/// Highest level the campaign runs to.
pub const DEFAULT_FINAL_LEVEL: u32 = 100;

/// Configuration for a level session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Level the session opens on.
    pub start_level: u32,
    /// Pause between solving a level and loading the next one.
    pub advance_delay: Duration,
    /// Upper bound on a single provider request.
    pub provider_timeout: Duration,
    /// Solving this level ends the game.
    pub final_level: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_level: 1,
            advance_delay: Duration::from_millis(1500),
            provider_timeout: Duration::from_secs(30),
            final_level: DEFAULT_FINAL_LEVEL,
        }
    }
}

impl SessionConfig {
    /// Set the opening level (clamped to `1..=final_level`).
    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level.clamp(1, self.final_level);
        self
    }

    /// Set the delay before the next level loads.
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    /// Set the provider timeout.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Set the final level (at least 1). The start level is pulled down if
    /// it now lies beyond the end.
    pub fn with_final_level(mut self, level: u32) -> Self {
        self.final_level = level.max(1);
        self.start_level = self.start_level.min(self.final_level);
        self
    }
}
