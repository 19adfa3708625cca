//! Gameplay simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed tick per call, no clock reads
//! - Seeded RNG only (one stream per session)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod collision;
pub mod events;
pub mod obstacles;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use aabb::{Aabb, distance, intersects};
pub use collision::{Arena, CrashCause, detect_crash};
pub use events::{DriftEdge, GameEvent};
pub use obstacles::{FieldParams, Obstacle, PlacementError, generate_obstacles};
pub use snapshot::{Hud, ObstacleView, Snapshot, VehicleView};
pub use state::{GamePhase, Session};
pub use tick::{TickInput, tick};
pub use vehicle::{SteerInput, Vehicle};
