//! Discrete events emitted by the simulation
//!
//! Presentation (audio, HUD flashes) reacts to these; it never inspects the
//! per-tick drift flag directly.

use serde::{Deserialize, Serialize};

use super::collision::CrashCause;

/// How the drift modifier changed between two consecutive Playing ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftEdge {
    /// Not held, was not held
    #[default]
    Idle,
    /// Pressed this tick
    Started,
    /// Still held
    Held,
    /// Let go this tick
    Released,
}

impl DriftEdge {
    /// Next edge given whether the modifier is held this tick
    pub fn next(self, held: bool) -> Self {
        match (self.is_active(), held) {
            (false, false) => Self::Idle,
            (false, true) => Self::Started,
            (true, true) => Self::Held,
            (true, false) => Self::Released,
        }
    }

    /// Drift is currently on
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Started | Self::Held)
    }

    /// Event to emit for this edge, if any
    pub fn event(self) -> Option<GameEvent> {
        match self {
            Self::Started => Some(GameEvent::DriftStarted),
            Self::Released => Some(GameEvent::DriftStopped),
            Self::Idle | Self::Held => None,
        }
    }
}

/// Something observable happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new attempt began (from Menu or after a crash)
    SessionStarted { attempt: u32, obstacles: usize },
    DriftStarted,
    DriftStopped,
    /// Playing -> Crashed, emitted once per attempt
    Crashed {
        cause: CrashCause,
        score: u32,
        new_best: bool,
    },
}
