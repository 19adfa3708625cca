//! Game balance values
//!
//! Every constant the simulation reads lives here so a tuning file can
//! override it. Missing fields fall back to [`crate::consts`].

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Arena;

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Top band (y < min_y) is off-limits
    pub min_y: f32,
    /// Horizontal placement margin for obstacles
    pub margin_x: f32,

    // === Obstacle field ===
    pub obstacle_count: usize,
    pub obstacle_size: Vec2,
    pub safe_radius: f32,
    /// Candidate draws per obstacle before relaxing (and then failing)
    pub placement_attempts: u32,

    // === Vehicle ===
    /// Footprint: x = length along heading, y = width
    pub vehicle_size: Vec2,
    pub start_speed: f32,
    pub start_acceleration: f32,
    pub accel_growth: f32,
    pub start_heading: f32,
    pub turn_speed: f32,

    // === Drift ===
    pub drift_accel: f32,
    pub drift_visual_gain: f32,
    pub drift_decay: f32,
    pub visual_decay: f32,

    // === Clock ===
    /// Ticks per second, used to turn ticks into survival seconds
    pub tick_rate: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            min_y: OBSTACLE_MIN_Y,
            margin_x: SPAWN_MARGIN_X,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_size: Vec2::splat(OBSTACLE_SIZE),
            safe_radius: SAFE_RADIUS,
            placement_attempts: PLACEMENT_ATTEMPTS,

            vehicle_size: Vec2::new(VEHICLE_LENGTH, VEHICLE_WIDTH),
            start_speed: START_SPEED,
            start_acceleration: START_ACCELERATION,
            accel_growth: ACCEL_GROWTH,
            start_heading: START_HEADING,
            turn_speed: TURN_SPEED,

            drift_accel: DRIFT_ACCEL,
            drift_visual_gain: DRIFT_VISUAL_GAIN,
            drift_decay: DRIFT_DECAY,
            visual_decay: DRIFT_VISUAL_DECAY,

            tick_rate: TICK_RATE,
        }
    }
}

impl Tuning {
    /// Parse a JSON tuning document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(TuningError::Io)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        serde_json::to_string_pretty(self).map_err(TuningError::Parse)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::invalid(field, format!("must be positive, got {value}")))
            }
        }

        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("obstacle_size.x", self.obstacle_size.x)?;
        positive("obstacle_size.y", self.obstacle_size.y)?;
        positive("vehicle_size.x", self.vehicle_size.x)?;
        positive("vehicle_size.y", self.vehicle_size.y)?;
        positive("start_speed", self.start_speed)?;
        positive("start_acceleration", self.start_acceleration)?;

        if !(0.0..self.arena_height).contains(&self.min_y) {
            return Err(TuningError::invalid(
                "min_y",
                format!("must lie in [0, {}), got {}", self.arena_height, self.min_y),
            ));
        }
        if self.margin_x < 0.0 || self.margin_x * 2.0 > self.arena_width {
            return Err(TuningError::invalid(
                "margin_x",
                format!("leaves no placement band in a {} wide arena", self.arena_width),
            ));
        }
        if self.safe_radius < 0.0 {
            return Err(TuningError::invalid("safe_radius", "must not be negative".to_string()));
        }
        if self.accel_growth < 0.0 {
            return Err(TuningError::invalid("accel_growth", "must not be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.drift_decay) || !(0.0..=1.0).contains(&self.visual_decay) {
            return Err(TuningError::invalid("drift_decay", "decay factors must lie in [0, 1]".to_string()));
        }
        if self.placement_attempts == 0 {
            return Err(TuningError::invalid("placement_attempts", "must be at least 1".to_string()));
        }
        if self.tick_rate == 0 {
            return Err(TuningError::invalid("tick_rate", "must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.arena_width,
            height: self.arena_height,
            min_y: self.min_y,
        }
    }

    /// Where the car spawns at session start
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: String) -> Self {
        Self::Invalid { field, reason }
    }
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "malformed tuning json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}
