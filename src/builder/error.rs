//! Build errors for label construction.

use thiserror::Error;

/// Errors that can occur when building a label from explicit settings.
///
/// The engine's own setters clamp bad input silently; the builder rejects
/// it instead so that configuration mistakes surface at startup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Duration must be a finite, non-negative number of seconds (got {0})")]
    InvalidDuration(f64),

    #[error("Interval {interval}s is below the {floor}s floor")]
    IntervalBelowFloor { interval: f64, floor: f64 },

    #[error("Zoom scale must be finite and positive (got {0})")]
    InvalidZoomScale(f64),
}
