//! Transition style registry.
//!
//! A closed set of named transition styles, each mapped to default timing
//! through a static table. Lookup is pure: resolving an unknown or absent
//! name yields [`TransitionStyle::None`] rather than an error.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Named transition style applied when the displayed text changes.
///
/// Serializes as its canonical name. Deserializing an unrecognized name
/// falls back to `None`, matching [`TransitionStyle::resolve`].
///
/// # Example
///
/// ```rust
/// use segue::core::TransitionStyle;
///
/// let style = TransitionStyle::resolve(Some("flipVertical"));
/// assert_eq!(style, TransitionStyle::FlipVertical);
/// assert_eq!(style.canonical_name(), "flipVertical");
/// assert_eq!(style.display_title(), "Flip Vertical");
///
/// assert_eq!(TransitionStyle::resolve(Some("wobble")), TransitionStyle::None);
/// assert_eq!(TransitionStyle::resolve(None), TransitionStyle::None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransitionStyle {
    #[default]
    None,
    Bounce,
    FadedZoom,
    ZoomInOut,
    FlipHorizontal,
    FlipVertical,
    RotateDown,
    RotateUp,
}

/// Default timing attached to a style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleDefaults {
    /// Length of the animated phase, in seconds.
    pub duration: f64,
    /// Minimum spacing between the starts of consecutive transitions, in seconds.
    pub interval: f64,
    /// Zoom or bounce magnitude, for styles that scale.
    pub scale: Option<f64>,
}

struct StyleEntry {
    style: TransitionStyle,
    name: &'static str,
    title: &'static str,
    defaults: StyleDefaults,
}

const fn entry(
    style: TransitionStyle,
    name: &'static str,
    title: &'static str,
    duration: f64,
    interval: f64,
    scale: Option<f64>,
) -> StyleEntry {
    StyleEntry {
        style,
        name,
        title,
        defaults: StyleDefaults {
            duration,
            interval,
            scale,
        },
    }
}

// Indexed by `TransitionStyle as usize`.
const REGISTRY: [StyleEntry; 8] = [
    entry(TransitionStyle::None, "none", "None", 0.0, 0.0, None),
    entry(TransitionStyle::Bounce, "bounce", "Bounce", 0.1, 0.2, Some(1.2)),
    entry(TransitionStyle::FadedZoom, "fadedZoom", "Faded Zoom", 0.4, 0.45, Some(1.4)),
    entry(TransitionStyle::ZoomInOut, "zoomInOut", "Zoom In-Out", 0.25, 0.3, None),
    entry(TransitionStyle::FlipHorizontal, "flipHorizontal", "Flip Horizontal", 0.25, 0.3, None),
    entry(TransitionStyle::FlipVertical, "flipVertical", "Flip Vertical", 0.25, 0.3, None),
    entry(TransitionStyle::RotateDown, "rotateDown", "Rotate Down", 0.25, 0.3, None),
    entry(TransitionStyle::RotateUp, "rotateUp", "Rotate Up", 0.25, 0.3, None),
];

impl TransitionStyle {
    /// Every style, in declaration order.
    pub const ALL: [TransitionStyle; 8] = [
        Self::None,
        Self::Bounce,
        Self::FadedZoom,
        Self::ZoomInOut,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::RotateDown,
        Self::RotateUp,
    ];

    /// Resolve a style from its name.
    ///
    /// Canonical names match exactly; other ASCII casings are accepted too.
    /// Absent or unknown names resolve to `None`.
    pub fn resolve(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Self::None;
        };
        REGISTRY
            .iter()
            .find(|e| e.name == name)
            .or_else(|| REGISTRY.iter().find(|e| e.name.eq_ignore_ascii_case(name)))
            .map_or(Self::None, |e| e.style)
    }

    /// Canonical machine name, e.g. `"fadedZoom"`.
    pub fn canonical_name(self) -> &'static str {
        self.entry().name
    }

    /// Human-readable title, e.g. `"Faded Zoom"`.
    pub fn display_title(self) -> &'static str {
        self.entry().title
    }

    /// Default duration, interval and scale for this style.
    pub fn defaults(self) -> StyleDefaults {
        self.entry().defaults
    }

    /// Whether changing text under this style runs any animation at all.
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::None)
    }

    fn entry(self) -> &'static StyleEntry {
        &REGISTRY[self as usize]
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_title())
    }
}

impl FromStr for TransitionStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::resolve(Some(s)))
    }
}

impl From<&str> for TransitionStyle {
    fn from(name: &str) -> Self {
        Self::resolve(Some(name))
    }
}

impl From<String> for TransitionStyle {
    fn from(name: String) -> Self {
        Self::resolve(Some(&name))
    }
}

impl From<TransitionStyle> for String {
    fn from(style: TransitionStyle) -> Self {
        style.canonical_name().to_string()
    }
}
