//! Checkpoint error types.

use thiserror::Error;

/// Errors from saving, loading or restoring a label [`Checkpoint`](super::Checkpoint).
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to encode label checkpoint: {0}")]
    SerializationFailed(String),

    #[error("Failed to decode label checkpoint: {0}")]
    DeserializationFailed(String),

    /// Written by a build with a different checkpoint format
    #[error("Label checkpoint format {found} is not readable (this build reads {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Decoded, but holds timing the label setters could never produce
    #[error("Label checkpoint has invalid timing: {0}")]
    ValidationFailed(String),
}
