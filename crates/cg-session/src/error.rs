//! Error types for the session controller and scenario providers.

use std::time::Duration;

use thiserror::Error;

/// Result type for scenario providers.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result type for session handle operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Why a provider could not produce a scenario.
///
/// None of these reach the player: the session swaps in the offline
/// scenario and logs the cause.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no source for this level.
    #[error("no scenario source for level {0}")]
    Unavailable(u32),

    /// The provider did not answer in time.
    #[error("scenario request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered with an unusable scenario.
    #[error("malformed scenario: {0}")]
    Malformed(#[from] cg_core::CoreError),

    /// Reading the scenario source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned to hosts talking to a running session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session task has stopped and no longer accepts input.
    #[error("session has ended")]
    Closed,
}
