//! Builder for constructing labels.

use crate::builder::error::BuildError;
use crate::core::{Timing, TransitionStyle, DEFAULT_HISTORY_LIMIT, MIN_INTERVAL};
use crate::engine::{LabelSettings, QueuedLabel};
use crate::host::{Color, Font, RenderHost};

/// Builder for constructing a [`QueuedLabel`] with a fluent API.
///
/// Timing overrides are applied on top of the style defaults in the order
/// duration, interval, zoom scale, so an interval shorter than
/// `duration + 0.05` is raised rather than rejected.
///
/// # Example
///
/// ```rust
/// use segue::builder::LabelBuilder;
/// use segue::core::TransitionStyle;
/// use segue::host::VirtualHost;
///
/// let label = LabelBuilder::new()
///     .style(TransitionStyle::FadedZoom)
///     .duration(0.6)
///     .text("0")
///     .build(VirtualHost::new())
///     .unwrap();
///
/// assert_eq!(label.text(), "0");
/// assert!((label.interval() - 0.65).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LabelBuilder {
    style: TransitionStyle,
    duration: Option<f64>,
    interval: Option<f64>,
    zoom_scale: Option<f64>,
    color: Option<Color>,
    font: Option<Font>,
    text: Option<String>,
    history_limit: Option<usize>,
}

impl LabelBuilder {
    /// Create a builder for a `None`-style label.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: TransitionStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the style by name; unknown names select `None`.
    pub fn style_name(self, name: &str) -> Self {
        self.style(TransitionStyle::resolve(Some(name)))
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn interval(mut self, seconds: f64) -> Self {
        self.interval = Some(seconds);
        self
    }

    pub fn zoom_scale(mut self, scale: f64) -> Self {
        self.zoom_scale = Some(scale);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Value shown immediately, without a transition.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Maximum number of completed transitions kept in history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Validate the settings without building.
    pub fn timing(&self) -> Result<Timing, BuildError> {
        let mut timing = Timing::for_style(self.style);
        if let Some(duration) = self.duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(BuildError::InvalidDuration(duration));
            }
            timing.set_duration(duration);
        }
        if let Some(interval) = self.interval {
            if !interval.is_finite() || interval < MIN_INTERVAL {
                return Err(BuildError::IntervalBelowFloor {
                    interval,
                    floor: MIN_INTERVAL,
                });
            }
            timing.set_interval(interval);
        }
        if let Some(scale) = self.zoom_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(BuildError::InvalidZoomScale(scale));
            }
            timing.set_zoom_scale(scale);
        }
        Ok(timing)
    }

    /// Build the label on `host`.
    pub fn build<H: RenderHost + 'static>(self, host: H) -> Result<QueuedLabel<H>, BuildError> {
        let timing = self.timing()?;
        let settings = LabelSettings {
            style: self.style,
            timing,
            color: self.color,
            font: self.font,
            history_limit: self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
            displayed: None,
            history: None,
        };
        tracing::debug!(style = %settings.style, ?timing, "building label");

        let label = QueuedLabel::with_settings(host, settings);
        if let Some(text) = self.text {
            label.set_text(text);
        }
        Ok(label)
    }
}
