//! Flick Soccer - turn-based circle physics soccer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, walls, powerups, turn state)
//! - `tuning`: Data-driven physics and rules constants
//! - `ui`: Pure hit-testing and pointer routing for the presentation layer

pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Playing field, centered on screen
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    pub const X_GAP: f32 = (SCREEN_WIDTH - FIELD_WIDTH) / 2.0;
    pub const Y_GAP: f32 = (SCREEN_HEIGHT - FIELD_HEIGHT) / 2.0;

    /// Goal pockets sit outside the short edges of the field
    pub const GOAL_DEPTH: f32 = 45.0;
    pub const GOAL_HEIGHT: f32 = 100.0;

    /// Kickoff formation for side A, relative to the field's top-left corner.
    /// Side B mirrors it across the halfway line.
    pub const SPAWNS: [(f32, f32); 3] = [
        (FIELD_WIDTH / 5.0, FIELD_HEIGHT / 3.0),
        (FIELD_WIDTH / 5.0, FIELD_HEIGHT * 2.0 / 3.0),
        (FIELD_WIDTH / 3.0, FIELD_HEIGHT / 2.0),
    ];

    /// Powerup button bar (below the field)
    pub const ICON_SIZE: f32 = 64.0;
    pub const BUTTON_GAP: f32 = Y_GAP / 2.0;
    pub const BUTTON_Y: f32 = SCREEN_HEIGHT - Y_GAP / 2.0 - ICON_SIZE / 2.0;
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Closed point-in-circle test
#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    distance(p, center) <= radius
}

/// Angle of the direction from `from` to `to` (radians, atan2 convention)
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_in_circle() {
        assert!(point_in_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 5.0));
        assert!(!point_in_circle(Vec2::new(3.0, 4.1), Vec2::ZERO, 5.0));
    }

    #[test]
    fn test_angle_between() {
        assert!((angle_between(Vec2::ZERO, Vec2::new(0.0, 2.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_between(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_polar_round_trip_direction() {
        let p = polar_to_cartesian(10.0, angle_between(Vec2::ZERO, Vec2::new(1.0, 1.0)));
        assert!((p.x - p.y).abs() < 1e-4);
        assert!((p.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_layout_constants() {
        use consts::*;
        assert_eq!(X_GAP, 100.0);
        assert_eq!(Y_GAP, 100.0);
        assert_eq!(BUTTON_Y, 518.0);
    }
}
