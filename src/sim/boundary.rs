//! Wall and goal-pocket reflection
//!
//! Each rule is an independent axis-aligned reflect-and-clamp. They run in a
//! fixed order and a body may trip several in one tick:
//! top, bottom, left/right (outside the goal mouth), goal backs, goal walls.

use glam::Vec2;

use super::body::Body;
use super::collision::reflect_velocity;
use super::field::Field;

/// Which walls a body hit this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub top: bool,
    pub bottom: bool,
    pub side: bool,
    pub goal_back: bool,
    pub goal_wall: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.side || self.goal_back || self.goal_wall
    }
}

/// Keep a body inside the pitch and goal pockets
pub fn resolve_boundary(body: &mut Body, field: &Field) -> WallHits {
    let mut hits = WallHits::default();
    let r = body.radius;
    let pitch = field.pitch;

    if body.pos.y - r < pitch.min.y {
        body.vel = reflect_velocity(body.vel, Vec2::Y);
        body.pos.y = pitch.min.y + r;
        hits.top = true;
    }
    if body.pos.y + r > pitch.max.y {
        body.vel = reflect_velocity(body.vel, Vec2::NEG_Y);
        body.pos.y = pitch.max.y - r;
        hits.bottom = true;
    }

    // Side walls only exist above and below the goal mouth
    if !field.span_overlaps_mouth(body.pos.y, r) {
        if body.pos.x - r < pitch.min.x {
            body.vel = reflect_velocity(body.vel, Vec2::X);
            body.pos.x = pitch.min.x + r;
            hits.side = true;
        }
        if body.pos.x + r > pitch.max.x {
            body.vel = reflect_velocity(body.vel, Vec2::NEG_X);
            body.pos.x = pitch.max.x - r;
            hits.side = true;
        }
    }

    if body.pos.x - r < field.left_goal_back() {
        body.vel = reflect_velocity(body.vel, Vec2::X);
        body.pos.x = field.left_goal_back() + r;
        hits.goal_back = true;
    }
    if body.pos.x + r > field.right_goal_back() {
        body.vel = reflect_velocity(body.vel, Vec2::NEG_X);
        body.pos.x = field.right_goal_back() - r;
        hits.goal_back = true;
    }

    // Inside a pocket the narrower goal walls take over from the field walls
    if field.crossed_goal_line(body.pos).is_some() {
        if body.pos.y - r < field.goal_top() {
            body.vel = reflect_velocity(body.vel, Vec2::Y);
            body.pos.y = field.goal_top() + r;
            hits.goal_wall = true;
        }
        if body.pos.y + r > field.goal_bottom() {
            body.vel = reflect_velocity(body.vel, Vec2::NEG_Y);
            body.pos.y = field.goal_bottom() - r;
            hits.goal_wall = true;
        }
    }

    hits
}
