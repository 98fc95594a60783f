//! Field geometry: the pitch rectangle and the two goal pockets
//!
//! The goal pockets hang off the short (left/right) edges of the pitch,
//! centered vertically. A body may pass through a goal mouth into its pocket
//! before the pocket's back wall stops it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict interior test (edges excluded)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Closed test (edges included)
    #[inline]
    pub fn contains_closed(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Which goal pocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalEnd {
    Left,
    Right,
}

/// Immutable pitch layout, built once at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub pitch: Rect,
    pub left_goal: Rect,
    pub right_goal: Rect,
}

impl Default for Field {
    fn default() -> Self {
        Self::standard()
    }
}

impl Field {
    /// The classic 600x400 pitch centered on an 800x600 screen
    pub fn standard() -> Self {
        let pitch = Rect::new(X_GAP, Y_GAP, FIELD_WIDTH, FIELD_HEIGHT);
        let goal_top = pitch.center().y - GOAL_HEIGHT / 2.0;
        Self {
            pitch,
            left_goal: Rect::new(pitch.min.x - GOAL_DEPTH, goal_top, GOAL_DEPTH, GOAL_HEIGHT),
            right_goal: Rect::new(pitch.max.x, goal_top, GOAL_DEPTH, GOAL_HEIGHT),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pitch.center()
    }

    /// Top edge of both goal mouths
    #[inline]
    pub fn goal_top(&self) -> f32 {
        self.left_goal.min.y
    }

    /// Bottom edge of both goal mouths
    #[inline]
    pub fn goal_bottom(&self) -> f32 {
        self.left_goal.max.y
    }

    #[inline]
    pub fn left_goal_back(&self) -> f32 {
        self.left_goal.min.x
    }

    #[inline]
    pub fn right_goal_back(&self) -> f32 {
        self.right_goal.max.x
    }

    /// Whether a point may host a powerup: pitch interior or either goal pocket
    pub fn contains_point(&self, p: Vec2) -> bool {
        if self.pitch.contains(p) {
            return true;
        }
        p.x > self.left_goal_back()
            && p.x < self.right_goal_back()
            && p.y > self.goal_top()
            && p.y < self.goal_bottom()
    }

    /// Closed containment in the union of pitch and goal pockets
    pub fn encloses(&self, p: Vec2) -> bool {
        self.pitch.contains_closed(p)
            || self.left_goal.contains_closed(p)
            || self.right_goal.contains_closed(p)
    }

    /// The goal a point has crossed into, judged by x alone
    pub fn crossed_goal_line(&self, p: Vec2) -> Option<GoalEnd> {
        if p.x < self.pitch.min.x {
            Some(GoalEnd::Left)
        } else if p.x > self.pitch.max.x {
            Some(GoalEnd::Right)
        } else {
            None
        }
    }

    /// Whether a vertical span [y - r, y + r] overlaps the goal mouth
    #[inline]
    pub fn span_overlaps_mouth(&self, y: f32, radius: f32) -> bool {
        y + radius > self.goal_top() && y - radius < self.goal_bottom()
    }
}
