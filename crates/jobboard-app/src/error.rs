//! Job board application error types.

use jobboard_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The tracing subscriber could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// A command failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Read models could not be serialized for output.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}
