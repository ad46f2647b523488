//! Core value types of the label engine.
//!
//! This module holds the pure pieces of the engine:
//! - The style registry and its timing table
//! - Timing values with their clamping rules
//! - The pending-value queue
//! - Drain status and the completed-transition history
//!
//! Nothing here talks to a host; the engine module drives these types.

mod history;
mod queue;
mod status;
mod style;
mod timing;

pub use history::{TransitionHistory, TransitionRecord, DEFAULT_HISTORY_LIMIT};
pub use queue::PendingQueue;
pub use status::EngineStatus;
pub use style::{StyleDefaults, TransitionStyle};
pub use timing::{Timing, IDENTITY_SCALE, MIN_GAP, MIN_INTERVAL};
