//! Building transition plans for each style.

use crate::core::{Timing, TransitionStyle};
use crate::host::{Animation, Appearance, Curve, RenderHost, Surface, SurfaceId, Transform};
use std::f64::consts::FRAC_PI_2;

/// Scale the outgoing and incoming surfaces shrink to under `ZoomInOut`.
pub const ZOOM_SHRINK: f64 = 0.01;

/// Perspective distance used by the rotate styles.
pub const EYE_DISTANCE: f64 = 500.0;

/// Spring used by the bounce pulse.
pub const BOUNCE_SPRING: Curve = Curve::Spring {
    damping: 0.2,
    initial_velocity: 6.0,
};

/// An immediate change to one surface.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCommand {
    Text(SurfaceId, String),
    Opacity(SurfaceId, f64),
    Transform(SurfaceId, Transform),
    Hidden(SurfaceId, bool),
}

impl SurfaceCommand {
    pub fn target(&self) -> SurfaceId {
        match self {
            Self::Text(id, _) | Self::Opacity(id, _) | Self::Transform(id, _) | Self::Hidden(id, _) => {
                *id
            }
        }
    }

    /// Apply this command to the matching surface of `host`.
    pub fn apply<H: RenderHost + ?Sized>(&self, host: &mut H) {
        let surface = host.surface_mut(self.target());
        match self {
            Self::Text(_, text) => surface.set_text(text),
            Self::Opacity(_, opacity) => surface.set_opacity(*opacity),
            Self::Transform(_, transform) => surface.set_transform(*transform),
            Self::Hidden(_, hidden) => surface.set_hidden(*hidden),
        }
    }
}

/// Complete description of one text change.
#[derive(Clone, Debug, PartialEq)]
pub struct Choreography {
    pub style: TransitionStyle,
    /// The value being transitioned to
    pub value: String,
    /// Applied before the first phase starts
    pub setup: Vec<SurfaceCommand>,
    /// Animated phases, run strictly one after another
    pub phases: Vec<Animation>,
    /// Applied once the last phase completes
    pub finish: Vec<SurfaceCommand>,
}

use SurfaceCommand::{Hidden, Opacity, Text, Transform as Xform};
use SurfaceId::{Ghost, Primary};

impl Choreography {
    /// Plan the transition to `value` under `style` with the given timing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use segue::choreography::Choreography;
    /// use segue::core::{Timing, TransitionStyle};
    ///
    /// let style = TransitionStyle::RotateUp;
    /// let plan = Choreography::plan(style, &Timing::for_style(style), "42");
    /// assert_eq!(plan.phases.len(), 2);
    /// assert!(!plan.is_instant());
    /// ```
    pub fn plan(style: TransitionStyle, timing: &Timing, value: &str) -> Self {
        let (setup, phases, finish) = match style {
            TransitionStyle::None => (
                vec![Hidden(Ghost, true), Text(Primary, value.to_string())],
                Vec::new(),
                Vec::new(),
            ),
            TransitionStyle::Bounce => bounce(timing, value),
            TransitionStyle::FadedZoom => cross(
                timing,
                value,
                Transform::uniform(timing.zoom_scale()),
                Transform::Identity,
            ),
            TransitionStyle::ZoomInOut => cross(
                timing,
                value,
                Transform::uniform(ZOOM_SHRINK),
                Transform::uniform(ZOOM_SHRINK),
            ),
            TransitionStyle::FlipHorizontal => {
                let mirror = Transform::Scale { x: -1.0, y: 1.0 };
                cross(timing, value, mirror, mirror)
            }
            TransitionStyle::FlipVertical => {
                let mirror = Transform::Scale { x: 1.0, y: -1.0 };
                cross(timing, value, mirror, mirror)
            }
            TransitionStyle::RotateDown => rotate(timing, value, 1.0),
            TransitionStyle::RotateUp => rotate(timing, value, -1.0),
        };

        Self {
            style,
            value: value.to_string(),
            setup,
            phases,
            finish,
        }
    }

    /// True when the change has no animated phase and completes at once.
    pub fn is_instant(&self) -> bool {
        self.phases.is_empty()
    }
}

type Parts = (Vec<SurfaceCommand>, Vec<Animation>, Vec<SurfaceCommand>);

fn bounce(timing: &Timing, value: &str) -> Parts {
    let pulse = Animation {
        duration: timing.duration_span(),
        curve: BOUNCE_SPRING,
        autoreverse: true,
        targets: vec![(
            Primary,
            Appearance::new(1.0, Transform::uniform(timing.zoom_scale())),
        )],
    };
    (
        vec![Hidden(Ghost, true), Text(Primary, value.to_string())],
        vec![pulse],
        vec![Xform(Primary, Transform::Identity)],
    )
}

// Ghost enters from `ghost_from`; primary leaves towards `primary_to`.
fn cross(timing: &Timing, value: &str, ghost_from: Transform, primary_to: Transform) -> Parts {
    let phase = Animation {
        duration: timing.duration_span(),
        curve: Curve::EaseInOut,
        autoreverse: false,
        targets: vec![
            (Ghost, Appearance::VISIBLE),
            (Primary, Appearance::new(0.0, primary_to)),
        ],
    };
    (
        vec![
            Hidden(Ghost, false),
            Opacity(Ghost, 0.0),
            Xform(Ghost, ghost_from),
            Text(Ghost, value.to_string()),
        ],
        vec![phase],
        settle(value),
    )
}

// `sign` is +1 for rotating down, -1 for rotating up.
fn rotate(timing: &Timing, value: &str, sign: f64) -> Parts {
    let half = timing.duration_span() / 2;
    let tilt = |radians: f64| Transform::RotateX {
        radians,
        eye_distance: EYE_DISTANCE,
    };
    let out = Animation {
        duration: half,
        curve: Curve::EaseInOut,
        autoreverse: false,
        targets: vec![(Primary, Appearance::new(0.0, tilt(-sign * FRAC_PI_2)))],
    };
    let inbound = Animation {
        duration: half,
        curve: Curve::EaseInOut,
        autoreverse: false,
        targets: vec![(Ghost, Appearance::new(1.0, tilt(0.0)))],
    };
    (
        vec![
            Hidden(Ghost, false),
            Opacity(Ghost, 0.0),
            Text(Ghost, value.to_string()),
            Xform(Ghost, tilt(sign * FRAC_PI_2)),
        ],
        vec![out, inbound],
        settle(value),
    )
}

fn settle(value: &str) -> Vec<SurfaceCommand> {
    vec![
        Xform(Ghost, Transform::Identity),
        Opacity(Ghost, 1.0),
        Hidden(Ghost, true),
        Xform(Primary, Transform::Identity),
        Opacity(Primary, 1.0),
        Text(Primary, value.to_string()),
    ]
}
