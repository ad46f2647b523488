//! Builder API for label construction.
//!
//! [`LabelBuilder`] collects style, timing and cosmetic settings, validates
//! them, and produces a [`QueuedLabel`](crate::engine::QueuedLabel) bound to
//! a host.

pub mod error;
pub mod label;

pub use error::BuildError;
pub use label::LabelBuilder;
