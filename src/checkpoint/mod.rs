//! Snapshot and restore of label state.
//!
//! A [`Checkpoint`] captures what a label shows, what it still has to show,
//! and how it animates, so that a countdown or ticker can pick up where it
//! left off after the view is rebuilt. Host state (running animations,
//! timers) is not captured: restoring re-queues every pending value,
//! including any that were mid-transition.

use crate::core::{Timing, TransitionHistory, TransitionStyle};
use crate::engine::{LabelSettings, QueuedLabel};
use crate::host::{Color, Font, RenderHost};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a [`QueuedLabel`].
///
/// # Example
///
/// ```rust
/// use segue::core::TransitionStyle;
/// use segue::engine::QueuedLabel;
/// use segue::host::VirtualHost;
///
/// let label = QueuedLabel::new(VirtualHost::new(), TransitionStyle::FlipVertical);
/// label.set_text("3");
/// label.set_text("2");
///
/// let json = label.checkpoint().to_json().unwrap();
/// let restored = segue::checkpoint::Checkpoint::from_json(&json)
///     .unwrap()
///     .restore(VirtualHost::new())
///     .unwrap();
///
/// assert_eq!(restored.text(), "3");
/// assert_eq!(restored.pending(), vec!["2".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub style: TransitionStyle,
    pub timing: Timing,

    /// Text on screen, or `None` if nothing has been shown yet
    pub displayed: Option<String>,

    /// Values still to be shown, front first
    pub pending: Vec<String>,

    pub color: Option<Color>,
    pub font: Option<Font>,

    /// Completed transitions
    pub history: TransitionHistory,
}

impl Checkpoint {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse JSON and check the format version.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()
    }

    /// Serialize to compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode binary and check the format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()
    }

    /// Check the format version and the timing block.
    fn validate(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            tracing::warn!(
                found = self.version,
                supported = CHECKPOINT_VERSION,
                "rejected checkpoint"
            );
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if let Err(reason) = self.timing.validate() {
            tracing::warn!(id = %self.id, %reason, "rejected checkpoint timing");
            return Err(CheckpointError::ValidationFailed(reason));
        }
        Ok(self)
    }

    /// Rebuild a label on `host` and resume draining the pending values.
    pub fn restore<H: RenderHost + 'static>(
        self,
        host: H,
    ) -> Result<QueuedLabel<H>, CheckpointError> {
        let checkpoint = self.validate()?;
        tracing::debug!(
            id = %checkpoint.id,
            pending = checkpoint.pending.len(),
            "restoring checkpoint"
        );

        let settings = LabelSettings {
            style: checkpoint.style,
            timing: checkpoint.timing,
            color: checkpoint.color,
            font: checkpoint.font,
            history_limit: checkpoint.history.limit(),
            displayed: checkpoint.displayed,
            history: Some(checkpoint.history),
        };
        let label = QueuedLabel::with_settings(host, settings);
        for value in checkpoint.pending {
            label.set_text(value);
        }
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineStatus;
    use crate::host::{SurfaceId, VirtualHost};
    use std::time::Duration;

    fn drained_label() -> QueuedLabel<VirtualHost> {
        let host = VirtualHost::new();
        let clock = host.clock();
        let label = QueuedLabel::new(host, TransitionStyle::Bounce);
        label.set_color(Color::WHITE);
        label.set_text("1");
        label.set_text("2");
        clock.advance(Duration::from_millis(200));
        label.set_text("3");
        label.set_text("4");
        label
    }

    #[test]
    fn checkpoint_captures_label_state() {
        let label = drained_label();
        let checkpoint = label.checkpoint();

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.style, TransitionStyle::Bounce);
        assert_eq!(checkpoint.displayed.as_deref(), Some("2"));
        assert_eq!(checkpoint.pending, vec!["3".to_string(), "4".to_string()]);
        assert_eq!(checkpoint.color, Some(Color::WHITE));
        assert_eq!(checkpoint.history.get_path(), vec!["1", "2"]);
    }

    #[test]
    fn checkpoint_ids_are_unique() {
        let label = drained_label();
        assert_ne!(label.checkpoint().id, label.checkpoint().id);
    }

    #[test]
    fn json_and_binary_forms_agree() {
        let checkpoint = drained_label().checkpoint();

        let from_json = Checkpoint::from_json(&checkpoint.to_json().unwrap()).unwrap();
        let from_bytes = Checkpoint::from_bytes(&checkpoint.to_bytes().unwrap()).unwrap();

        assert_eq!(from_json, checkpoint);
        assert_eq!(from_bytes, checkpoint);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = drained_label().checkpoint();
        checkpoint.version = 99;
        let json = checkpoint.to_json().unwrap();

        match Checkpoint::from_json(&json) {
            Err(CheckpointError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, 99);
                assert_eq!(supported, CHECKPOINT_VERSION);
            }
            other => panic!("expected version error, got {other:?}"),
        }
        assert!(checkpoint.restore(VirtualHost::new()).is_err());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = Checkpoint::from_bytes(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CheckpointError::DeserializationFailed(_))));
    }

    #[test]
    fn restore_resumes_draining() {
        let checkpoint = drained_label().checkpoint();

        let host = VirtualHost::new();
        let clock = host.clock();
        let restored = checkpoint.restore(host).unwrap();

        assert_eq!(restored.text(), "2");
        assert_eq!(restored.status(), EngineStatus::Draining);
        restored.with_host(|h| {
            assert_eq!(h.surface(SurfaceId::Primary).color, Some(Color::WHITE));
        });

        clock.advance(Duration::from_millis(400));
        assert_eq!(restored.text(), "4");
        assert!(restored.pending().is_empty());
        assert_eq!(restored.history().get_path(), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn restoring_a_fresh_label_keeps_first_value_immediate() {
        let label = QueuedLabel::new(VirtualHost::new(), TransitionStyle::RotateDown);
        let restored = label.checkpoint().restore(VirtualHost::new()).unwrap();

        restored.set_text("go");
        assert_eq!(restored.text(), "go");
        assert_eq!(restored.status(), EngineStatus::Idle);
    }

    #[test]
    fn corrupt_timing_is_rejected_before_restore() {
        let checkpoint = drained_label().checkpoint();
        let json = checkpoint.to_json().unwrap();
        let corrupt = json.replace("\"duration\": 0.1", "\"duration\": -1.0");
        assert_ne!(corrupt, json);

        match Checkpoint::from_json(&corrupt) {
            Err(CheckpointError::ValidationFailed(reason)) => assert!(reason.contains("duration")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn cramped_interval_is_rejected_in_binary_form() {
        let mut checkpoint = drained_label().checkpoint();
        let mut value = serde_json::to_value(checkpoint.timing).unwrap();
        value["interval"] = serde_json::json!(0.1);
        checkpoint.timing = serde_json::from_value(value).unwrap();

        let bytes = checkpoint.to_bytes().unwrap();
        assert!(matches!(
            Checkpoint::from_bytes(&bytes),
            Err(CheckpointError::ValidationFailed(_))
        ));
        assert!(matches!(
            checkpoint.restore(VirtualHost::new()),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }
}
