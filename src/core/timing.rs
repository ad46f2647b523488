//! Transition timing with its clamping rules.
//!
//! `Timing` holds the animation duration, the drain interval and the zoom
//! factor. Setters never fail; out-of-range input is clamped or ignored so
//! that `interval >= duration + MIN_GAP` holds after any change.

use super::style::TransitionStyle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest interval accepted by [`Timing::set_interval`], in seconds.
pub const MIN_INTERVAL: f64 = 0.1;

/// Required headroom between the end of one transition and the next start.
pub const MIN_GAP: f64 = 0.05;

/// Scale used by styles without a zoom factor of their own.
pub const IDENTITY_SCALE: f64 = 1.0;

/// Duration, interval and zoom scale, all in seconds except the scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    duration: f64,
    interval: f64,
    zoom_scale: f64,
}

impl Timing {
    /// Registry defaults for `style`.
    pub fn for_style(style: TransitionStyle) -> Self {
        let defaults = style.defaults();
        Self {
            duration: defaults.duration,
            interval: defaults.interval,
            zoom_scale: defaults.scale.unwrap_or(IDENTITY_SCALE),
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    /// Set the animation duration, widening the interval when needed.
    ///
    /// Negative values clamp to zero and non-finite values are ignored.
    /// The interval is only ever lengthened here.
    ///
    /// ```rust
    /// use segue::core::{Timing, TransitionStyle};
    ///
    /// let mut timing = Timing::for_style(TransitionStyle::FlipVertical);
    /// timing.set_interval(10.0);
    /// timing.set_duration(9.99);
    /// assert!((timing.interval() - 10.04).abs() < 1e-9);
    /// ```
    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() {
            tracing::debug!(duration, "ignoring non-finite duration");
            return;
        }
        let duration = duration.max(0.0);
        self.duration = duration;
        if self.interval < duration + MIN_GAP {
            self.interval = duration + MIN_GAP;
        }
    }

    /// Set the drain interval.
    ///
    /// Values under [`MIN_INTERVAL`] are ignored. Values that would not
    /// leave [`MIN_GAP`] after the duration are raised to the minimum.
    pub fn set_interval(&mut self, interval: f64) {
        if !interval.is_finite() || interval < MIN_INTERVAL {
            tracing::debug!(interval, "ignoring interval below floor");
            return;
        }
        let floor = self.duration + MIN_GAP;
        self.interval = if interval < floor { floor } else { interval };
    }

    /// Override the zoom factor. Non-positive or non-finite values are ignored.
    pub fn set_zoom_scale(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            tracing::debug!(scale, "ignoring invalid zoom scale");
            return;
        }
        self.zoom_scale = scale;
    }

    /// Duration as a [`Duration`], for handing to the host.
    ///
    /// Saturates at [`Duration::MAX`] for values too large to represent.
    pub fn duration_span(&self) -> Duration {
        span(self.duration)
    }

    /// Interval as a [`Duration`], for arming the drain timer.
    ///
    /// Never shorter than [`MIN_INTERVAL`], so a `None` row cannot spin a timer.
    pub fn interval_span(&self) -> Duration {
        span(self.interval.max(MIN_INTERVAL))
    }

    /// Whether `interval >= duration + MIN_GAP`, within float tolerance.
    pub fn keeps_gap(&self) -> bool {
        self.interval + 1e-9 >= self.duration + MIN_GAP
    }

    /// Check values that did not come through the setters, e.g. decoded ones.
    ///
    /// Accepts exactly what the setters can produce: finite non-negative
    /// seconds, a positive zoom scale, and the gap (or the untouched `0/0`
    /// of the `None` style).
    pub fn validate(&self) -> Result<(), String> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(format!("duration {} is not a non-negative number", self.duration));
        }
        if !self.interval.is_finite() || self.interval < 0.0 {
            return Err(format!("interval {} is not a non-negative number", self.interval));
        }
        if !self.zoom_scale.is_finite() || self.zoom_scale <= 0.0 {
            return Err(format!("zoom scale {} is not positive", self.zoom_scale));
        }
        let untouched_none = self.duration == 0.0 && self.interval == 0.0;
        if !self.keeps_gap() && !untouched_none {
            return Err(format!(
                "interval {} leaves less than {MIN_GAP}s after duration {}",
                self.interval, self.duration
            ));
        }
        Ok(())
    }
}

fn span(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX)
}

impl Default for Timing {
    fn default() -> Self {
        Self::for_style(TransitionStyle::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn style_defaults_are_applied() {
        let timing = Timing::for_style(TransitionStyle::Bounce);
        assert_eq!(timing.duration(), 0.1);
        assert_eq!(timing.interval(), 0.2);
        assert_eq!(timing.zoom_scale(), 1.2);

        let timing = Timing::for_style(TransitionStyle::RotateUp);
        assert_eq!(timing.zoom_scale(), IDENTITY_SCALE);
    }

    #[test]
    fn interval_below_floor_is_ignored() {
        let mut timing = Timing::for_style(TransitionStyle::Bounce);
        timing.set_interval(0.05);
        assert_eq!(timing.interval(), 0.2);

        timing.set_interval(f64::NAN);
        assert_eq!(timing.interval(), 0.2);
    }

    #[test]
    fn interval_is_raised_to_duration_plus_gap() {
        let mut timing = Timing::for_style(TransitionStyle::FadedZoom);
        timing.set_interval(0.2);
        assert!(approx(timing.interval(), 0.45));
    }

    #[test]
    fn interval_accepts_valid_value() {
        let mut timing = Timing::for_style(TransitionStyle::FlipHorizontal);
        timing.set_interval(1.5);
        assert_eq!(timing.interval(), 1.5);
    }

    #[test]
    fn long_duration_widens_interval() {
        let mut timing = Timing::for_style(TransitionStyle::FlipHorizontal);
        timing.set_interval(10.0);
        timing.set_duration(9.99);
        assert!(approx(timing.interval(), 10.04));
        assert!(timing.keeps_gap());
    }

    #[test]
    fn short_duration_keeps_interval() {
        let mut timing = Timing::for_style(TransitionStyle::FlipHorizontal);
        timing.set_interval(2.0);
        timing.set_duration(0.01);
        assert_eq!(timing.interval(), 2.0);
        assert_eq!(timing.duration(), 0.01);
    }

    #[test]
    fn duration_at_interval_widens_it() {
        let mut timing = Timing::for_style(TransitionStyle::Bounce);
        timing.set_duration(0.2);
        assert!(approx(timing.interval(), 0.25));
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        let mut timing = Timing::for_style(TransitionStyle::Bounce);
        timing.set_duration(-1.0);
        assert_eq!(timing.duration(), 0.0);
        assert_eq!(timing.interval(), 0.2);
    }

    #[test]
    fn invalid_zoom_scale_is_ignored() {
        let mut timing = Timing::for_style(TransitionStyle::FadedZoom);
        timing.set_zoom_scale(0.0);
        timing.set_zoom_scale(f64::INFINITY);
        assert_eq!(timing.zoom_scale(), 1.4);

        timing.set_zoom_scale(2.0);
        assert_eq!(timing.zoom_scale(), 2.0);
    }

    #[test]
    fn spans_convert_seconds() {
        let timing = Timing::for_style(TransitionStyle::ZoomInOut);
        assert_eq!(timing.duration_span(), Duration::from_millis(250));
        let drift = timing.interval_span().abs_diff(Duration::from_millis(300));
        assert!(drift <= Duration::from_nanos(1));
    }

    #[test]
    fn huge_values_saturate_spans() {
        let mut timing = Timing::for_style(TransitionStyle::FlipVertical);
        timing.set_interval(1e20);
        timing.set_duration(f64::MAX);

        assert_eq!(timing.duration_span(), Duration::MAX);
        assert_eq!(timing.interval_span(), Duration::MAX);
        assert!(timing.validate().is_ok());
    }

    #[test]
    fn none_interval_span_is_floored() {
        let timing = Timing::default();
        assert_eq!(timing.duration_span(), Duration::ZERO);
        let drift = timing.interval_span().abs_diff(Duration::from_millis(100));
        assert!(drift <= Duration::from_nanos(1));
    }

    #[test]
    fn validate_accepts_setter_output() {
        for style in TransitionStyle::ALL {
            let mut timing = Timing::for_style(style);
            assert!(timing.validate().is_ok(), "{style:?}");
            timing.set_duration(0.0);
            assert!(timing.validate().is_ok(), "{style:?} after set_duration(0)");
        }
    }

    #[test]
    fn validate_rejects_impossible_values() {
        let good = Timing::for_style(TransitionStyle::Bounce);

        let negative = Timing { duration: -1.0, ..good };
        assert!(negative.validate().unwrap_err().contains("duration"));

        let nan = Timing { interval: f64::NAN, ..good };
        assert!(nan.validate().unwrap_err().contains("interval"));

        let flat = Timing { zoom_scale: 0.0, ..good };
        assert!(flat.validate().unwrap_err().contains("zoom"));

        let cramped = Timing { duration: 0.3, interval: 0.3, ..good };
        assert!(cramped.validate().unwrap_err().contains("leaves less"));
    }
}
