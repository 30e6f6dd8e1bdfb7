//! Skill error types.

use nextevent_core::TracingError;
use nextevent_providers::ProviderError;
use thiserror::Error;

/// Result type for skill operations.
pub type SkillResult<T> = Result<T, SkillError>;

/// Errors that can occur while handling requests or running the CLI.
#[derive(Debug, Error)]
pub enum SkillError {
    /// The request type is not handled by this skill.
    #[error("unsupported request type")]
    UnsupportedRequest,

    /// The intent is not handled by this skill.
    #[error("unsupported intent: {0}")]
    UnsupportedIntent(String),

    /// Request or response JSON could not be (de)serialized.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Logging could not be set up.
    #[error(transparent)]
    Tracing(#[from] TracingError),
}
