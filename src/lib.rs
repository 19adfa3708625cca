//! Crazy Car - a top-down arcade survival game core
//!
//! Core modules:
//! - `sim`: Gameplay simulation (vehicle motion, obstacle field, collisions, session phases)
//! - `tuning`: Data-driven game balance, loadable from JSON
//! - `scoreboard`: Last score and process-lifetime highscore
//! - `audio`: Mapping from game events to audio cues
//! - `ui`: Menu button layout and click hit-testing
//! - `autopilot`: Look-ahead driver used by the headless runner

pub mod audio;
pub mod autopilot;
pub mod scoreboard;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use scoreboard::Scoreboard;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation rate the per-tick constants were tuned for
    pub const TICK_RATE: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 1024.0;
    /// Top band (y < this) is off-limits to obstacles and to the car
    pub const OBSTACLE_MIN_Y: f32 = 300.0;
    /// Horizontal margin for obstacle placement
    pub const SPAWN_MARGIN_X: f32 = 50.0;

    /// Obstacle field
    pub const OBSTACLE_COUNT: usize = 8;
    pub const OBSTACLE_SIZE: f32 = 40.0;
    /// No obstacle is placed closer than this to the car's start position
    pub const SAFE_RADIUS: f32 = 150.0;
    /// Candidate draws per obstacle before the generator gives up on a constraint
    pub const PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Car sprite footprint (length along heading, width across it)
    pub const VEHICLE_LENGTH: f32 = 48.0;
    pub const VEHICLE_WIDTH: f32 = 24.0;

    /// Kinematics (units per tick, degrees per tick)
    pub const START_SPEED: f32 = 0.5;
    pub const START_ACCELERATION: f32 = 0.00005;
    /// Added to acceleration every tick
    pub const ACCEL_GROWTH: f32 = 0.00005;
    /// Facing "up" the screen
    pub const START_HEADING: f32 = -90.0;
    pub const TURN_SPEED: f32 = 2.0;

    /// Drift tuning
    pub const DRIFT_ACCEL: f32 = 0.33;
    pub const DRIFT_VISUAL_GAIN: f32 = 0.6;
    /// Per-tick decay of angular velocity and drift yaw while drifting
    pub const DRIFT_DECAY: f32 = 0.92;
    /// Per-tick decay of drift yaw once the drift is released
    pub const DRIFT_VISUAL_DECAY: f32 = 0.9;
}

/// Unit vector for a heading in degrees (0 = +x, -90 = up the screen)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}
