//! Drain status of a label engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the engine is currently draining its backlog.
///
/// `Idle` means no drain timer is armed; the queue may still hold a value
/// whose transition is finishing. `Draining` means the timer is armed and
/// ticks will start the next pending transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    #[default]
    Idle,
    Draining,
}

impl EngineStatus {
    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Draining => "Draining",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
