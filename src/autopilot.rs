//! Look-ahead driver
//!
//! Each tick, every steering option is rolled forward on a copy of the car
//! with the input held constant. The option that stays alive longest wins;
//! ties keep the previous choice, then prefer grip over drift, then straight.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audio::{CueSink, dispatch};
use crate::sim::{
    CrashCause, GameEvent, GamePhase, PlacementError, Session, SteerInput, TickInput, detect_crash,
    tick,
};

/// Rollout length used when none is given
pub const DEFAULT_HORIZON: u32 = 45;

const OPTIONS: [SteerInput; 6] = [
    SteerInput { left: false, right: false, drift: false },
    SteerInput { left: true, right: false, drift: false },
    SteerInput { left: false, right: true, drift: false },
    SteerInput { left: false, right: false, drift: true },
    SteerInput { left: true, right: false, drift: true },
    SteerInput { left: false, right: true, drift: true },
];

#[derive(Debug, Clone)]
pub struct Autopilot {
    horizon: u32,
    last: SteerInput,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON)
    }
}

impl Autopilot {
    pub fn new(horizon: u32) -> Self {
        Self {
            horizon: horizon.max(1),
            last: SteerInput::NONE,
        }
    }

    /// Forget the previous choice (call between attempts)
    pub fn reset(&mut self) {
        self.last = SteerInput::NONE;
    }

    /// Pick the steering for the next tick
    pub fn choose(&mut self, session: &Session) -> SteerInput {
        if !session.phase.is_simulating() {
            return SteerInput::NONE;
        }

        let best = OPTIONS
            .iter()
            .copied()
            .max_by_key(|option| {
                (
                    self.survival(session, option),
                    *option == self.last,
                    !option.drift,
                    !option.left && !option.right,
                )
            })
            .unwrap_or(SteerInput::NONE);

        self.last = best;
        best
    }

    /// Ticks the car lasts holding `input`, capped at the horizon
    fn survival(&self, session: &Session, input: &SteerInput) -> u32 {
        let arena = session.arena();
        let mut car = session.vehicle.clone();
        for t in 0..self.horizon {
            car.step(input, &session.tuning);
            if detect_crash(&car, &session.obstacles, &arena).is_some() {
                return t;
            }
        }
        self.horizon
    }
}

/// Outcome of one autopiloted attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptReport {
    pub attempt: u32,
    pub ticks: u64,
    pub score: u32,
    pub new_best: bool,
    /// None if the tick limit ran out first
    pub cause: Option<CrashCause>,
    pub drifts: u32,
}

/// Why an attempt could not be driven
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// The fresh obstacle field could not be laid out
    Placement(PlacementError),
    /// The previous attempt hit the tick limit and is still running
    AttemptInProgress { attempt: u32 },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement(err) => write!(f, "could not start attempt: {err}"),
            Self::AttemptInProgress { attempt } => {
                write!(f, "attempt {attempt} has not crashed yet")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Placement(err) => Some(err),
            Self::AttemptInProgress { .. } => None,
        }
    }
}

impl From<PlacementError> for RunError {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}

/// Start (or restart) an attempt and drive it until it crashes or `max_ticks` pass
///
/// An attempt left running by an earlier tick limit is not resumed.
pub fn drive_attempt<S: CueSink + ?Sized>(
    session: &mut Session,
    pilot: &mut Autopilot,
    max_ticks: u64,
    sink: &mut S,
) -> Result<AttemptReport, RunError> {
    if session.phase == GamePhase::Playing {
        return Err(RunError::AttemptInProgress {
            attempt: session.attempt,
        });
    }

    let activation = TickInput {
        start: session.phase == GamePhase::Menu,
        restart: session.phase == GamePhase::Crashed,
        ..Default::default()
    };
    let events = tick(session, &activation)?;
    dispatch(&events, sink);
    pilot.reset();

    let mut report = AttemptReport {
        attempt: session.attempt,
        ticks: 0,
        score: 0,
        new_best: false,
        cause: None,
        drifts: 0,
    };

    while session.phase == GamePhase::Playing && report.ticks < max_ticks {
        let steer = pilot.choose(session);
        let events = tick(session, &TickInput::from_steer(steer))?;
        dispatch(&events, sink);
        report.ticks += 1;

        for event in &events {
            match *event {
                GameEvent::DriftStarted => report.drifts += 1,
                GameEvent::Crashed {
                    cause,
                    score,
                    new_best,
                } => {
                    report.cause = Some(cause);
                    report.score = score;
                    report.new_best = new_best;
                }
                _ => {}
            }
        }
    }

    if report.cause.is_none() {
        report.score = session.elapsed_whole_secs();
    }
    Ok(report)
}
