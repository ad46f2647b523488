//! The queued transition engine.
//!
//! [`QueuedLabel`] accepts text updates at any rate and shows them one at a
//! time. Updates are appended to a FIFO backlog; a repeating timer, armed
//! while there is work left, starts one transition per tick. Each finished
//! transition removes exactly one backlog entry.
//!
//! # State machine
//!
//! - **Idle**: no timer armed.
//! - **Draining**: timer armed; each tick starts the next pending value,
//!   and the first tick with nothing left to start cancels the timer.
//!
//! Style, duration and interval setters never change the state.
//!
//! # Re-entrancy
//!
//! Mutations from any call site, including host callbacks and surface
//! setters, go through one inbox and are applied in arrival order.

mod command;
mod label;
mod machine;

pub use label::{QueuedLabel, WeakLabel};
pub(crate) use machine::LabelSettings;
