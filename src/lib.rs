//! Segue: queued text transitions for animated labels
//!
//! A [`QueuedLabel`] displays a short string (a counter, a price, a status
//! word) and animates every change. Updates can arrive faster than the
//! animations run; they are queued and shown one at a time, in order, with
//! at least `interval` seconds between transition starts.
//!
//! The crate does not draw anything itself. A [`RenderHost`](host::RenderHost)
//! owns two text surfaces, runs animations and fires timers; the engine
//! decides what to ask for and when. [`VirtualHost`](host::VirtualHost) is a
//! headless host with a manually advanced clock.
//!
//! # Core Concepts
//!
//! - **Style**: one of eight [`TransitionStyle`]s, each with default timing
//! - **Timing**: duration, interval and zoom scale, kept at least 50 ms apart
//! - **Choreography**: the pure per-style plan of surface commands and phases
//! - **Engine**: the FIFO backlog and drain timer behind [`QueuedLabel`]
//!
//! # Example
//!
//! ```rust
//! use segue::{LabelBuilder, TransitionStyle};
//! use segue::host::VirtualHost;
//! use std::time::Duration;
//!
//! let host = VirtualHost::new();
//! let clock = host.clock();
//! let label = LabelBuilder::new()
//!     .style(TransitionStyle::RotateDown)
//!     .text("10")
//!     .build(host)
//!     .unwrap();
//!
//! for n in (7..10).rev() {
//!     label.set_text(n.to_string());
//! }
//! assert_eq!(label.text(), "10");
//!
//! clock.advance(Duration::from_secs(1));
//! assert_eq!(label.text(), "7");
//! assert_eq!(label.history().get_path(), vec!["10", "9", "8", "7"]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod choreography;
pub mod config;
pub mod core;
pub mod engine;
pub mod host;

// Re-export commonly used types
pub use builder::{BuildError, LabelBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{ConfigError, LabelConfig};
pub use core::{EngineStatus, Timing, TransitionStyle};
pub use engine::{QueuedLabel, WeakLabel};
