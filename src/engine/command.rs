//! Work items serialized through the engine inbox.

use crate::core::TransitionStyle;
use crate::host::{Color, Font};

/// A single mutation of engine state.
///
/// Public mutators and host callbacks never touch the engine directly; they
/// enqueue one of these and let the inbox pump apply it in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    SetText(String),
    SetStyle(TransitionStyle),
    SetDuration(f64),
    SetInterval(f64),
    SetZoomScale(f64),
    SetColor(Color),
    SetFont(Font),
    /// An animated phase of transition `transition` finished
    PhaseComplete { transition: u64 },
    /// The drain timer armed as `generation` fired
    Tick { generation: u64 },
}

impl Command {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::SetText(_) => "set_text",
            Self::SetStyle(_) => "set_style",
            Self::SetDuration(_) => "set_duration",
            Self::SetInterval(_) => "set_interval",
            Self::SetZoomScale(_) => "set_zoom_scale",
            Self::SetColor(_) => "set_color",
            Self::SetFont(_) => "set_font",
            Self::PhaseComplete { .. } => "phase_complete",
            Self::Tick { .. } => "tick",
        }
    }
}
