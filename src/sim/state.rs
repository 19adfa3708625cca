//! Session state and phase transitions
//!
//! The session is the single owner of the car, the obstacle field, the run
//! clock and the scoreboard. Only [`super::tick`] mutates it during play.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Arena, CrashCause};
use super::events::{DriftEdge, GameEvent};
use super::obstacles::{FieldParams, Obstacle, PlacementError, generate_obstacles};
use super::vehicle::Vehicle;
use crate::scoreboard::Scoreboard;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for START
    #[default]
    Menu,
    /// Car is driving
    Playing,
    /// Run ended, waiting for RESTART
    Crashed,
}

impl GamePhase {
    /// Only Playing advances the simulation
    #[inline]
    pub fn is_simulating(self) -> bool {
        self == GamePhase::Playing
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the obstacle RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Meaningful once the first attempt has started
    pub vehicle: Vehicle,
    /// Empty until the first start; replaced on every start
    pub obstacles: Vec<Obstacle>,
    /// Playing ticks in the current attempt, frozen on crash
    pub elapsed_ticks: u64,
    pub scoreboard: Scoreboard,
    /// 1-based index of the current attempt, 0 before the first start
    pub attempt: u32,
    /// Drift modifier state as of the last Playing tick
    pub drift: DriftEdge,
    rng: Pcg32,
}

impl Session {
    /// Create a session in the Menu phase with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a session in the Menu phase, rejecting tuning that fails validation
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let vehicle = Vehicle::spawn(tuning.start_position(), &tuning);
        Self {
            seed,
            tuning,
            phase: GamePhase::Menu,
            vehicle,
            obstacles: Vec::new(),
            elapsed_ticks: 0,
            scoreboard: Scoreboard::new(),
            attempt: 0,
            drift: DriftEdge::Idle,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn arena(&self) -> Arena {
        self.tuning.arena()
    }

    /// Seconds survived in the current attempt
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ticks as f32 / self.tick_rate() as f32
    }

    /// Whole seconds survived, as shown on the HUD and scored on crash
    pub fn elapsed_whole_secs(&self) -> u32 {
        (self.elapsed_ticks / u64::from(self.tick_rate())) as u32
    }

    // `tuning` is public, so a zero rate can still be written after construction
    fn tick_rate(&self) -> u32 {
        self.tuning.tick_rate.max(1)
    }

    /// Begin a new attempt: reset the car and clock, lay out a fresh field
    ///
    /// Used for both START (from Menu) and RESTART (from Crashed). On a
    /// placement failure nothing changes.
    pub fn start(&mut self) -> Result<GameEvent, PlacementError> {
        let start = self.tuning.start_position();
        let params = FieldParams::from_tuning(&self.tuning);
        let obstacles = generate_obstacles(&mut self.rng, &params, start)?;

        self.vehicle = Vehicle::spawn(start, &self.tuning);
        self.obstacles = obstacles;
        self.elapsed_ticks = 0;
        self.drift = DriftEdge::Idle;
        self.attempt += 1;
        self.phase = GamePhase::Playing;

        log::info!(
            "Attempt {} started with {} obstacles (highscore {} s)",
            self.attempt,
            self.obstacles.len(),
            self.scoreboard.highscore
        );
        Ok(GameEvent::SessionStarted {
            attempt: self.attempt,
            obstacles: self.obstacles.len(),
        })
    }

    /// Playing -> Crashed. Freezes the car and records the score.
    ///
    /// Does nothing outside Playing, so a second hit in the same tick (or a
    /// later one) cannot record the attempt twice.
    pub fn crash(&mut self, cause: CrashCause, events: &mut Vec<GameEvent>) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }

        // A held drift loop must stop with the car
        if self.drift.is_active() {
            events.push(GameEvent::DriftStopped);
        }
        self.drift = DriftEdge::Idle;

        self.vehicle.freeze();
        let score = self.elapsed_whole_secs();
        let new_best = self.scoreboard.record(score);
        self.phase = GamePhase::Crashed;

        log::info!("Attempt {} crashed ({:?}) after {} s", self.attempt, cause, score);
        if new_best {
            log::info!("New highscore: {} s", score);
        }
        events.push(GameEvent::Crashed {
            cause,
            score,
            new_best,
        });
        true
    }

    /// Start position of the current attempt
    pub fn start_position(&self) -> Vec2 {
        self.tuning.start_position()
    }
}
