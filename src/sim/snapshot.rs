//! Read-only view of the session for renderers
//!
//! Collaborators draw from a [`Snapshot`]; they never touch the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::{GamePhase, Session};
use crate::normalize_degrees;

/// Car sprite placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleView {
    pub pos: Vec2,
    /// Sprite rotation in degrees, normalized to [-180, 180)
    pub facing: f32,
    pub bounds: Aabb,
}

/// Obstacle sprite placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub bounds: Aabb,
}

/// What the overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hud {
    Menu,
    Playing { elapsed_secs: u32 },
    Crashed { last_score: u32, highscore: u32 },
}

impl Hud {
    /// Overlay text, top to bottom
    pub fn lines(&self) -> Vec<String> {
        match *self {
            Hud::Menu => vec!["START".to_string()],
            Hud::Playing { elapsed_secs } => vec![format!("Time: {elapsed_secs} s")],
            Hud::Crashed {
                last_score,
                highscore,
            } => vec![
                "GAME OVER".to_string(),
                format!("Highscore: {highscore} s"),
                format!("Your score: {last_score} s"),
                "RESTART".to_string(),
            ],
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// None on the menu
    pub vehicle: Option<VehicleView>,
    pub obstacles: Vec<ObstacleView>,
    pub hud: Hud,
}

impl Session {
    pub fn snapshot(&self) -> Snapshot {
        let hud = match self.phase {
            GamePhase::Menu => Hud::Menu,
            GamePhase::Playing => Hud::Playing {
                elapsed_secs: self.elapsed_whole_secs(),
            },
            GamePhase::Crashed => Hud::Crashed {
                last_score: self.scoreboard.last_score,
                highscore: self.scoreboard.highscore,
            },
        };

        if self.phase == GamePhase::Menu {
            return Snapshot {
                phase: self.phase,
                vehicle: None,
                obstacles: Vec::new(),
                hud,
            };
        }

        Snapshot {
            phase: self.phase,
            vehicle: Some(VehicleView {
                pos: self.vehicle.pos,
                facing: normalize_degrees(self.vehicle.facing()),
                bounds: self.vehicle.bounds(),
            }),
            obstacles: self
                .obstacles
                .iter()
                .map(|ob| ObstacleView {
                    id: ob.id,
                    pos: ob.pos,
                    bounds: ob.bounds(),
                })
                .collect(),
            hud,
        }
    }
}
