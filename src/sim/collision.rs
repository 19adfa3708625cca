//! Crash detection: car against obstacles and against the arena edges

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::obstacles::Obstacle;
use super::vehicle::Vehicle;

/// Drivable area. The band above `min_y` is out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub min_y: f32,
}

impl Arena {
    /// True if `pos` is on the drivable area (edges included)
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= self.min_y && pos.y <= self.height
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Car box touched this obstacle
    Obstacle { id: u32 },
    /// Car centre left the arena
    OutOfBounds,
}

/// First obstacle (in placement order) whose box touches `car`
pub fn first_obstacle_hit(car: &Aabb, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|ob| ob.bounds().intersects(car))
        .map(|ob| ob.id)
}

/// Number of obstacles the car box currently touches
pub fn obstacle_hits(car: &Aabb, obstacles: &[Obstacle]) -> usize {
    obstacles.iter().filter(|ob| ob.bounds().intersects(car)).count()
}

/// Check the car against everything that can kill it
///
/// Obstacles are checked before the arena edge; the first cause found wins.
pub fn detect_crash(vehicle: &Vehicle, obstacles: &[Obstacle], arena: &Arena) -> Option<CrashCause> {
    if let Some(id) = first_obstacle_hit(&vehicle.bounds(), obstacles) {
        return Some(CrashCause::Obstacle { id });
    }
    if !arena.contains(vehicle.pos) {
        return Some(CrashCause::OutOfBounds);
    }
    None
}
