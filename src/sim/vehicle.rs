//! Car kinematics: ever-growing acceleration, steering, and drift

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::heading_vector;
use crate::tuning::Tuning;

/// Steering state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteerInput {
    pub left: bool,
    pub right: bool,
    /// Drift modifier is held (not a toggle)
    pub drift: bool,
}

impl SteerInput {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        drift: false,
    };
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Centre of the car in world space
    pub pos: Vec2,
    /// Direction of travel (degrees)
    pub heading: f32,
    /// Extra yaw applied to the sprite only, decays toward zero
    pub drift_visual: f32,
    /// Drift rotation (degrees per tick)
    pub angular_vel: f32,
    /// Forward speed (units per tick), never decreases while alive
    pub speed: f32,
    /// Grows by `accel_growth` every tick
    pub accel: f32,
    /// Sprite footprint: x = length, y = width
    pub size: Vec2,
    /// Cleared on crash; a dead car keeps its crash pose
    pub alive: bool,
}

impl Vehicle {
    /// Fresh car at `pos` with the session-start kinematics
    pub fn spawn(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            heading: tuning.start_heading,
            drift_visual: 0.0,
            angular_vel: 0.0,
            speed: tuning.start_speed,
            accel: tuning.start_acceleration,
            size: tuning.vehicle_size,
            alive: true,
        }
    }

    /// Advance one tick
    pub fn step(&mut self, input: &SteerInput, tuning: &Tuning) {
        if !self.alive {
            return;
        }

        self.accel += tuning.accel_growth;
        self.speed += self.accel;

        if input.drift {
            // Steering kicks the rotation instead of setting the heading
            if input.left {
                self.angular_vel -= tuning.drift_accel;
            }
            if input.right {
                self.angular_vel += tuning.drift_accel;
            }
            self.drift_visual += self.angular_vel * tuning.drift_visual_gain;
            self.drift_visual *= tuning.drift_decay;

            self.heading += self.angular_vel;
            self.angular_vel *= tuning.drift_decay;
        } else {
            if input.left {
                self.heading -= tuning.turn_speed;
            }
            if input.right {
                self.heading += tuning.turn_speed;
            }
            self.angular_vel = 0.0;
            self.drift_visual *= tuning.visual_decay;
        }

        self.pos += self.velocity();
    }

    /// Displacement per tick along the true heading
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        heading_vector(self.heading) * self.speed
    }

    /// Angle the sprite is drawn at (degrees)
    #[inline]
    pub fn facing(&self) -> f32 {
        self.heading + self.drift_visual
    }

    /// Axis-aligned bounds of the drawn sprite
    pub fn bounds(&self) -> Aabb {
        Aabb::rotated_rect(self.pos, self.size, self.facing())
    }

    /// Stop all further motion, keeping the current pose
    pub fn freeze(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn car() -> (Vehicle, Tuning) {
        let tuning = Tuning::default();
        (Vehicle::spawn(Vec2::new(512.0, 512.0), &tuning), tuning)
    }

    #[test]
    fn test_spawn_state() {
        let (car, _) = car();
        assert_eq!(car.heading, -90.0);
        assert_eq!(car.speed, 0.5);
        assert_eq!(car.accel, 0.00005);
        assert_eq!(car.angular_vel, 0.0);
        assert_eq!(car.drift_visual, 0.0);
        assert!(car.alive);
    }

    #[test]
    fn test_straight_line_for_100_ticks() {
        let (mut car, tuning) = car();
        let start = car.pos;
        let dir = heading_vector(-90.0);

        let mut last_speed = car.speed;
        for _ in 0..100 {
            car.step(&SteerInput::NONE, &tuning);
            assert_eq!(car.heading, -90.0);
            assert!(car.speed > last_speed);
            last_speed = car.speed;

            // Stays on the line through the start point
            let offset = car.pos - start;
            assert!(offset.perp_dot(dir).abs() < 1e-3);
            assert!(offset.dot(dir) > 0.0);
        }
        // Moved up the screen
        assert!(car.pos.y < start.y);
    }

    #[test]
    fn test_acceleration_grows() {
        let (mut car, tuning) = car();
        car.step(&SteerInput::NONE, &tuning);
        assert!((car.accel - 0.0001).abs() < 1e-9);
        assert!((car.speed - 0.5001).abs() < 1e-6);
        car.step(&SteerInput::NONE, &tuning);
        assert!((car.accel - 0.00015).abs() < 1e-9);
        assert!((car.speed - 0.50025).abs() < 1e-6);
    }

    #[test]
    fn test_plain_steering() {
        let (mut car, tuning) = car();
        let left = SteerInput { left: true, ..SteerInput::NONE };
        let right = SteerInput { right: true, ..SteerInput::NONE };
        let both = SteerInput { left: true, right: true, ..SteerInput::NONE };

        car.step(&left, &tuning);
        assert_eq!(car.heading, -92.0);
        car.step(&right, &tuning);
        car.step(&right, &tuning);
        assert_eq!(car.heading, -88.0);
        car.step(&both, &tuning);
        assert_eq!(car.heading, -88.0);
        assert_eq!(car.angular_vel, 0.0);
    }

    #[test]
    fn test_drift_kicks_rotation() {
        let (mut car, tuning) = car();
        let drift_left = SteerInput { left: true, drift: true, ..SteerInput::NONE };

        car.step(&drift_left, &tuning);
        // angular_vel = -0.33, applied to heading, then decayed
        assert!((car.heading - (-90.33)).abs() < 1e-4);
        assert!((car.angular_vel - (-0.33 * 0.92)).abs() < 1e-6);
        assert!((car.drift_visual - (-0.33 * 0.6 * 0.92)).abs() < 1e-6);
        assert!(car.facing() < car.heading);
    }

    #[test]
    fn test_drift_rotation_persists_without_steering() {
        let (mut car, tuning) = car();
        let drift_left = SteerInput { left: true, drift: true, ..SteerInput::NONE };
        let drift_only = SteerInput { drift: true, ..SteerInput::NONE };

        for _ in 0..10 {
            car.step(&drift_left, &tuning);
        }
        let heading = car.heading;
        let mut last_vel = car.angular_vel;
        for _ in 0..20 {
            car.step(&drift_only, &tuning);
            // Keeps sliding left, more gently each tick
            assert!(car.angular_vel < 0.0);
            assert!(car.angular_vel.abs() <= last_vel.abs() * 0.92 + 1e-6);
            last_vel = car.angular_vel;
        }
        assert!(car.heading < heading);
    }

    #[test]
    fn test_release_decays_geometrically() {
        let (mut car, tuning) = car();
        let drift_left = SteerInput { left: true, drift: true, ..SteerInput::NONE };

        for _ in 0..50 {
            car.step(&drift_left, &tuning);
        }
        assert!(car.angular_vel < 0.0);
        assert!(car.drift_visual < 0.0);

        let released_at = car.drift_visual;
        let mut last_visual = released_at;
        for _ in 0..40 {
            car.step(&SteerInput::NONE, &tuning);
            assert_eq!(car.angular_vel, 0.0);
            assert!(car.drift_visual <= 0.0, "drift yaw flipped sign");
            assert!(car.drift_visual.abs() <= last_visual.abs() * 0.92);
            last_visual = car.drift_visual;
        }
        assert!(car.drift_visual.abs() < released_at.abs() * 0.02);
    }

    #[test]
    fn test_dead_car_is_frozen() {
        let (mut car, tuning) = car();
        car.step(&SteerInput::NONE, &tuning);
        car.freeze();
        let before = car.clone();

        let input = SteerInput { left: true, drift: true, ..SteerInput::NONE };
        for _ in 0..10 {
            car.step(&input, &tuning);
        }
        assert_eq!(car, before);
    }

    #[test]
    fn test_bounds_follow_facing() {
        let (car, _) = car();
        let bounds = car.bounds();
        // Facing up: narrow across x, long along y
        assert!((bounds.size().x - 24.0).abs() < 1e-3);
        assert!((bounds.size().y - 48.0).abs() < 1e-3);
        assert!(bounds.contains_point(car.pos));
    }

    fn arb_input() -> impl Strategy<Value = SteerInput> {
        (any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(left, right, drift)| SteerInput { left, right, drift })
    }

    proptest! {
        #[test]
        fn prop_speed_strictly_increases(inputs in prop::collection::vec(arb_input(), 1..300)) {
            let (mut car, tuning) = car();
            for input in &inputs {
                let before = car.speed;
                car.step(input, &tuning);
                prop_assert!(car.speed > before);
            }
        }

        #[test]
        fn prop_released_drift_never_reverses(
            held in prop::collection::vec(arb_input(), 1..80),
            release_ticks in 1usize..60,
        ) {
            let (mut car, tuning) = car();
            for input in &held {
                car.step(input, &tuning);
            }
            let sign = car.drift_visual.signum();
            let mut last = car.drift_visual.abs();
            for _ in 0..release_ticks {
                car.step(&SteerInput::NONE, &tuning);
                prop_assert_eq!(car.angular_vel, 0.0);
                prop_assert!(car.drift_visual == 0.0 || car.drift_visual.signum() == sign);
                prop_assert!(car.drift_visual.abs() <= last);
                last = car.drift_visual.abs();
            }
        }
    }
}
