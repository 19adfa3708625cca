//! Obstacle field generation
//!
//! Rejection sampling: draw a candidate, keep it only if it is far enough from
//! the car's start and does not touch an obstacle already placed. Draws are
//! capped per obstacle. When the cap is hit the overlap rule is dropped for one
//! more bounded round; if even that fails the field is infeasible.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, distance};
use super::collision::Arena;
use crate::tuning::Tuning;

/// A static hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.pos, self.size)
    }
}

/// Inputs to the generator
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    pub count: usize,
    pub arena: Arena,
    pub margin_x: f32,
    pub safe_radius: f32,
    pub obstacle_size: Vec2,
    /// Candidate draws per obstacle, per round
    pub max_attempts: u32,
}

impl FieldParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            count: tuning.obstacle_count,
            arena: tuning.arena(),
            margin_x: tuning.margin_x,
            safe_radius: tuning.safe_radius,
            obstacle_size: tuning.obstacle_size,
            max_attempts: tuning.placement_attempts,
        }
    }

    /// Anchor band candidates are drawn from: x in [margin, w - margin], y in [min_y, h]
    pub fn band(&self) -> Option<(Vec2, Vec2)> {
        let min = Vec2::new(self.margin_x, self.arena.min_y);
        let max = Vec2::new(self.arena.width - self.margin_x, self.arena.height);
        (min.x <= max.x && min.y <= max.y).then_some((min, max))
    }
}

/// The generator could not place the requested field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Margins or the reserved band leave nowhere to draw from
    EmptyBand,
    /// No candidate cleared the safe radius within the attempt budget
    Infeasible {
        placed: usize,
        requested: usize,
        attempts: u32,
    },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBand => write!(f, "obstacle placement band is empty"),
            Self::Infeasible {
                placed,
                requested,
                attempts,
            } => write!(
                f,
                "placement infeasible: placed {placed} of {requested} obstacles, \
                 gave up after {attempts} draws"
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Build a fresh obstacle field around `player_start`
///
/// Every obstacle's anchor is at least `safe_radius` from `player_start`.
/// Boxes do not touch one another unless the overlap rule had to be relaxed,
/// which is logged.
pub fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    params: &FieldParams,
    player_start: Vec2,
) -> Result<Vec<Obstacle>, PlacementError> {
    let (band_min, band_max) = params.band().ok_or(PlacementError::EmptyBand)?;
    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(params.count);

    while obstacles.len() < params.count {
        let id = obstacles.len() as u32 + 1;

        let strict = draw_candidate(rng, params.max_attempts, band_min, band_max, |pos| {
            clear_of_start(pos, player_start, params.safe_radius)
                && clear_of_field(pos, params.obstacle_size, &obstacles)
        });

        let pos = match strict {
            Some(pos) => pos,
            None => {
                log::warn!(
                    "Obstacle {id}: no overlap-free spot after {} draws, allowing overlap",
                    params.max_attempts
                );
                draw_candidate(rng, params.max_attempts, band_min, band_max, |pos| {
                    clear_of_start(pos, player_start, params.safe_radius)
                })
                .ok_or(PlacementError::Infeasible {
                    placed: obstacles.len(),
                    requested: params.count,
                    attempts: params.max_attempts.saturating_mul(2),
                })?
            }
        };

        obstacles.push(Obstacle {
            id,
            pos,
            size: params.obstacle_size,
        });
    }

    log::debug!("Placed {} obstacles around {:?}", obstacles.len(), player_start);
    Ok(obstacles)
}

fn draw_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    attempts: u32,
    band_min: Vec2,
    band_max: Vec2,
    accept: impl Fn(Vec2) -> bool,
) -> Option<Vec2> {
    (0..attempts)
        .map(|_| {
            Vec2::new(
                rng.random_range(band_min.x..=band_max.x),
                rng.random_range(band_min.y..=band_max.y),
            )
        })
        .find(|&pos| accept(pos))
}

#[inline]
fn clear_of_start(pos: Vec2, start: Vec2, safe_radius: f32) -> bool {
    distance(pos, start) >= safe_radius
}

fn clear_of_field(pos: Vec2, size: Vec2, placed: &[Obstacle]) -> bool {
    let candidate = Aabb::from_origin_size(pos, size);
    placed.iter().all(|ob| !ob.bounds().intersects(&candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn default_params() -> FieldParams {
        FieldParams::from_tuning(&Tuning::default())
    }

    fn assert_field_invariants(field: &[Obstacle], params: &FieldParams, start: Vec2) {
        assert_eq!(field.len(), params.count);
        for (i, ob) in field.iter().enumerate() {
            assert!(distance(ob.pos, start) >= params.safe_radius);
            assert!(ob.pos.y >= params.arena.min_y);
            assert!(ob.pos.x >= params.margin_x && ob.pos.x <= params.arena.width - params.margin_x);
            assert!(ob.pos.y <= params.arena.height);
            for other in &field[i + 1..] {
                assert!(
                    !ob.bounds().intersects(&other.bounds()),
                    "obstacles {} and {} overlap",
                    ob.id,
                    other.id
                );
            }
        }
    }

    #[test]
    fn test_thousand_fields_hold_invariants() {
        let params = default_params();
        let start = Vec2::new(512.0, 512.0);
        let mut rng = Pcg32::seed_from_u64(0xC0FFEE);

        for _ in 0..1000 {
            let field = generate_obstacles(&mut rng, &params, start).unwrap();
            assert_field_invariants(&field, &params, start);
        }
    }

    #[test]
    fn test_ids_follow_placement_order() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = generate_obstacles(&mut rng, &default_params(), Vec2::new(512.0, 512.0)).unwrap();
        let ids: Vec<u32> = field.iter().map(|ob| ob.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_consecutive_fields_differ() {
        let params = default_params();
        let start = Vec2::new(512.0, 512.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let first = generate_obstacles(&mut rng, &params, start).unwrap();
        let second = generate_obstacles(&mut rng, &params, start).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let params = FieldParams {
            count: 0,
            ..default_params()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate_obstacles(&mut rng, &params, Vec2::ZERO).unwrap().is_empty());
    }

    #[test]
    fn test_crowded_field_relaxes_overlap() {
        // 40 boxes of 40x40 cannot fit in a 60x60 band without touching
        let params = FieldParams {
            count: 40,
            arena: Arena {
                width: 160.0,
                height: 160.0,
                min_y: 100.0,
            },
            margin_x: 50.0,
            safe_radius: 0.0,
            obstacle_size: Vec2::splat(40.0),
            max_attempts: 50,
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let field = generate_obstacles(&mut rng, &params, Vec2::ZERO).unwrap();
        assert_eq!(field.len(), 40);
    }

    #[test]
    fn test_safe_radius_covering_band_is_infeasible() {
        let params = FieldParams {
            safe_radius: 5000.0,
            max_attempts: 100,
            ..default_params()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let err = generate_obstacles(&mut rng, &params, Vec2::new(512.0, 512.0)).unwrap_err();
        assert_eq!(
            err,
            PlacementError::Infeasible {
                placed: 0,
                requested: 8,
                attempts: 200,
            }
        );
        assert!(err.to_string().contains("0 of 8"));
    }

    #[test]
    fn test_empty_band() {
        let params = FieldParams {
            margin_x: 600.0,
            ..default_params()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(
            generate_obstacles(&mut rng, &params, Vec2::ZERO),
            Err(PlacementError::EmptyBand)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_fields_hold_invariants(
            seed in any::<u64>(),
            start_x in 0.0f32..1024.0,
            start_y in 300.0f32..1024.0,
        ) {
            let params = default_params();
            let start = Vec2::new(start_x, start_y);
            let mut rng = Pcg32::seed_from_u64(seed);
            let field = generate_obstacles(&mut rng, &params, start).unwrap();
            assert_field_invariants(&field, &params, start);
        }
    }
}
