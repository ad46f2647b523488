//! Render-layer capabilities consumed by the engine.
//!
//! The engine never draws. It drives two text surfaces (a primary one and a
//! ghost used for cross-transitions) and asks the host to interpolate them
//! and to run a repeating timer. A toolkit integration implements
//! [`Surface`] and [`RenderHost`]; [`VirtualHost`] is a headless
//! implementation with a virtual clock.
//!
//! # Callback contract
//!
//! Hosts should invoke [`Completion`] and [`TickFn`] callbacks from their
//! own event loop rather than from inside `animate`/`schedule`. Synchronous
//! delivery is tolerated: the engine queues re-entrant work and handles it
//! once the current operation returns.

mod virtual_host;

pub use virtual_host::{HostEvent, VirtualClock, VirtualHost, VirtualSurface};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which of the two surfaces an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceId {
    /// The surface showing the current value
    Primary,
    /// The overlay presenting the incoming value during a transition
    Ghost,
}

/// Geometric transform applied to a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    #[default]
    Identity,
    /// 2D scale around the surface centre. Negative factors mirror.
    Scale { x: f64, y: f64 },
    /// 3D rotation around the horizontal axis, viewed with perspective
    /// from `eye_distance` points away.
    RotateX { radians: f64, eye_distance: f64 },
}

impl Transform {
    /// Uniform scale by `factor`.
    pub fn uniform(factor: f64) -> Self {
        Self::Scale {
            x: factor,
            y: factor,
        }
    }
}

/// Opacity and transform a surface is animated towards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub opacity: f64,
    pub transform: Transform,
}

impl Appearance {
    /// Fully opaque, untransformed.
    pub const VISIBLE: Appearance = Appearance {
        opacity: 1.0,
        transform: Transform::Identity,
    };

    pub fn new(opacity: f64, transform: Transform) -> Self {
        Self { opacity, transform }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Timing curve of an animated phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    #[default]
    EaseInOut,
    Spring { damping: f64, initial_velocity: f64 },
}

/// One interpolated phase handed to [`RenderHost::animate`].
///
/// Every target surface moves from its current appearance to the target
/// over `duration`. With `autoreverse` the surfaces return to where they
/// started within the same duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub duration: Duration,
    pub curve: Curve,
    pub autoreverse: bool,
    pub targets: Vec<(SurfaceId, Appearance)>,
}

/// RGBA text colour, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Font request passed through to the host toolkit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Opaque handle to a repeating timer created by [`RenderHost::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Callback fired once when an animated phase finishes.
pub type Completion = Box<dyn FnOnce()>;

/// Callback fired on every period of a repeating timer.
pub type TickFn = Box<dyn FnMut()>;

/// A text surface the engine can restyle.
pub trait Surface {
    fn set_text(&mut self, text: &str);
    fn set_opacity(&mut self, opacity: f64);
    fn set_transform(&mut self, transform: Transform);
    fn set_hidden(&mut self, hidden: bool);
    fn set_color(&mut self, color: Color);
    fn set_font(&mut self, font: &Font);

    /// Apply opacity and transform together.
    fn apply(&mut self, appearance: Appearance) {
        self.set_opacity(appearance.opacity);
        self.set_transform(appearance.transform);
    }
}

/// Host toolkit capabilities: two surfaces, interpolation and a timer.
pub trait RenderHost {
    type Surface: Surface;

    fn surface_mut(&mut self, id: SurfaceId) -> &mut Self::Surface;

    /// Interpolate the targets of `animation`, then call `on_complete` once.
    fn animate(&mut self, animation: Animation, on_complete: Completion);

    /// Call `on_tick` every `period` until cancelled.
    fn schedule(&mut self, period: Duration, on_tick: TickFn) -> TimerHandle;

    /// Stop a timer. Cancelling an unknown or already-cancelled handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        opacity: Option<f64>,
        transform: Option<Transform>,
    }

    impl Surface for Probe {
        fn set_text(&mut self, _text: &str) {}
        fn set_opacity(&mut self, opacity: f64) {
            self.opacity = Some(opacity);
        }
        fn set_transform(&mut self, transform: Transform) {
            self.transform = Some(transform);
        }
        fn set_hidden(&mut self, _hidden: bool) {}
        fn set_color(&mut self, _color: Color) {}
        fn set_font(&mut self, _font: &Font) {}
    }

    #[test]
    fn apply_sets_opacity_and_transform() {
        let mut probe = Probe::default();
        probe.apply(Appearance::new(0.5, Transform::uniform(2.0)));

        assert_eq!(probe.opacity, Some(0.5));
        assert_eq!(probe.transform, Some(Transform::Scale { x: 2.0, y: 2.0 }));
    }

    #[test]
    fn default_appearance_is_visible_identity() {
        assert_eq!(Appearance::default(), Appearance::VISIBLE);
        assert_eq!(Appearance::default().transform, Transform::Identity);
    }
}
