//! Declarative label configuration.
//!
//! A [`LabelConfig`] is the serde form of everything a
//! [`LabelBuilder`] accepts. Absent timing fields fall back to the style's
//! defaults, and style names are matched leniently, so
//! `{"style": "FLIPVERTICAL"}` is a complete document.

use crate::builder::LabelBuilder;
use crate::core::TransitionStyle;
use crate::engine::QueuedLabel;
use crate::host::{Color, Font, RenderHost};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Serializable label settings.
///
/// # Example
///
/// ```rust
/// use segue::config::LabelConfig;
/// use segue::core::TransitionStyle;
/// use segue::host::VirtualHost;
///
/// let config = LabelConfig::from_json_str(r#"{ "style": "bounce", "text": "9" }"#).unwrap();
/// assert_eq!(config.style, TransitionStyle::Bounce);
///
/// let label = config.build(VirtualHost::new()).unwrap();
/// assert_eq!(label.text(), "9");
/// assert_eq!(label.interval(), 0.2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelConfig {
    pub style: TransitionStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    /// Initial value, shown without a transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
}

impl LabelConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "rejected label config");
            ConfigError::Parse(e)
        })
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// A builder preloaded with these settings.
    pub fn builder(&self) -> LabelBuilder {
        LabelBuilder::new().config(self)
    }

    pub fn build<H: RenderHost + 'static>(&self, host: H) -> Result<QueuedLabel<H>, ConfigError> {
        Ok(self.builder().build(host)?)
    }
}

impl LabelBuilder {
    /// Overlay every field set in `config`.
    pub fn config(mut self, config: &LabelConfig) -> Self {
        self = self.style(config.style);
        if let Some(duration) = config.duration {
            self = self.duration(duration);
        }
        if let Some(interval) = config.interval {
            self = self.interval(interval);
        }
        if let Some(scale) = config.zoom_scale {
            self = self.zoom_scale(scale);
        }
        if let Some(color) = config.color {
            self = self.color(color);
        }
        if let Some(font) = &config.font {
            self = self.font(font.clone());
        }
        if let Some(text) = &config.text {
            self = self.text(text.clone());
        }
        if let Some(limit) = config.history_limit {
            self = self.history_limit(limit);
        }
        self
    }
}
