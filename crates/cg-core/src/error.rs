/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or querying a scenario.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The named file is not part of the scenario's file system.
    #[error("{0}: No such file")]
    FileNotFound(String),

    /// The scenario payload is not valid JSON or has the wrong shape.
    #[error("malformed scenario payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A required scenario field is absent or empty.
    #[error("scenario is missing required field `{0}`")]
    MissingField(&'static str),

    /// Level numbers start at 1.
    #[error("invalid level number: {0}")]
    InvalidLevel(u32),
}
