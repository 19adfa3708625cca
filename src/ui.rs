//! Menu buttons and click hit-testing
//!
//! The renderer draws the buttons; the core only needs to know whether a
//! click landed on the control that is live in the current phase.

use glam::Vec2;

use crate::sim::{Aabb, GamePhase, TickInput};
use crate::tuning::Tuning;

/// Button size shared by START and RESTART
pub const BUTTON_SIZE: Vec2 = Vec2::new(400.0, 80.0);

/// A discrete UI activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Start,
    Restart,
}

impl Activation {
    /// Fold the activation into the next tick's input
    pub fn apply(self, input: &mut TickInput) {
        match self {
            Activation::Start => input.start = true,
            Activation::Restart => input.restart = true,
        }
    }
}

/// A clickable rectangle with a label
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub rect: Aabb,
}

impl Button {
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains_point(point)
    }
}

/// Where the menu buttons sit on screen
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub start: Button,
    pub restart: Button,
}

impl MenuLayout {
    /// Buttons centred horizontally; START straddles the middle, RESTART sits below it
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let center = Vec2::new(screen_width / 2.0, screen_height / 2.0);
        let left = center.x - BUTTON_SIZE.x / 2.0;
        Self {
            start: Button {
                label: "START",
                rect: Aabb::from_origin_size(Vec2::new(left, center.y - 40.0), BUTTON_SIZE),
            },
            restart: Button {
                label: "RESTART",
                rect: Aabb::from_origin_size(Vec2::new(left, center.y + 60.0), BUTTON_SIZE),
            },
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.arena_width, tuning.arena_height)
    }

    /// The button drawn in this phase, if any
    pub fn visible_button(&self, phase: GamePhase) -> Option<&Button> {
        match phase {
            GamePhase::Menu => Some(&self.start),
            GamePhase::Crashed => Some(&self.restart),
            GamePhase::Playing => None,
        }
    }

    /// Map a click to an activation, honouring only the live button
    pub fn activation_at(&self, phase: GamePhase, click: Vec2) -> Option<Activation> {
        let button = self.visible_button(phase)?;
        if !button.contains(click) {
            return None;
        }
        Some(match phase {
            GamePhase::Menu => Activation::Start,
            _ => Activation::Restart,
        })
    }
}
