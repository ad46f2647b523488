//! Configuration error types.

use crate::builder::BuildError;
use thiserror::Error;

/// Errors that can occur while loading, saving or applying a [`LabelConfig`](super::LabelConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input was not a valid label configuration document
    #[error("Failed to parse label config: {0}")]
    Parse(#[source] serde_json::Error),

    /// Configuration could not be written out
    #[error("Failed to serialize label config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Configuration parsed but holds values the builder rejects
    #[error(transparent)]
    Build(#[from] BuildError),
}
