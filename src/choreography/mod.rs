//! Per-style transition plans.
//!
//! A [`Choreography`] describes one text change as data: surface commands
//! applied at the start, animated phases run one after another, and the
//! commands that settle both surfaces once the last phase finishes. Plans
//! are pure values; the engine executes them against a host.

mod plan;

pub use plan::{Choreography, SurfaceCommand, BOUNCE_SPRING, EYE_DISTANCE, ZOOM_SHRINK};
