//! Fixed-step simulation tick
//!
//! One call advances the session by exactly one tick. No clock is read: the
//! host decides when ticks happen, tests call this directly.

use super::collision::detect_crash;
use super::events::GameEvent;
use super::obstacles::PlacementError;
use super::state::{GamePhase, Session};
use super::vehicle::SteerInput;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    /// Drift modifier held
    pub drift: bool,
    /// START activated (honoured in Menu only)
    pub start: bool,
    /// RESTART activated (honoured in Crashed only)
    pub restart: bool,
}

impl TickInput {
    pub fn steer(&self) -> SteerInput {
        SteerInput {
            left: self.steer_left,
            right: self.steer_right,
            drift: self.drift,
        }
    }

    pub fn from_steer(steer: SteerInput) -> Self {
        Self {
            steer_left: steer.left,
            steer_right: steer.right,
            drift: steer.drift,
            ..Default::default()
        }
    }
}

/// Advance the session by one tick, returning what happened
///
/// A tick that starts an attempt does not also move the car. Only a start or
/// restart can fail, and then the session is left as it was.
pub fn tick(session: &mut Session, input: &TickInput) -> Result<Vec<GameEvent>, PlacementError> {
    let mut events = Vec::new();

    match session.phase {
        GamePhase::Menu => {
            if input.start {
                events.push(session.start()?);
            }
            return Ok(events);
        }
        GamePhase::Crashed => {
            if input.restart {
                events.push(session.start()?);
            }
            return Ok(events);
        }
        GamePhase::Playing => {}
    }

    session.elapsed_ticks += 1;

    session.drift = session.drift.next(input.drift);
    if let Some(event) = session.drift.event() {
        log::debug!("{:?} at tick {}", event, session.elapsed_ticks);
        events.push(event);
    }

    session.vehicle.step(&input.steer(), &session.tuning);

    let arena = session.arena();
    if let Some(cause) = detect_crash(&session.vehicle, &session.obstacles, &arena) {
        session.crash(cause, &mut events);
    }

    Ok(events)
}
