//! Circular rigid bodies: players, the ball, grenade fragments

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::GluePatch;
use crate::point_in_circle;
use crate::tuning::{BodySpec, Tuning};

/// The two competing sides. A plays left-to-right, B right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Display name used in banners
    pub fn name(self) -> &'static str {
        match self {
            Side::A => "Blue",
            Side::B => "Red",
        }
    }
}

/// Stable handle to a body. Ids are never reused within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Body kind with kind-specific data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    Normal,
    /// Short-lived grenade shrapnel, stamped with its spawn time
    Fragment { spawned_ms: f64 },
}

/// A simulated circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub radius: f32,
    /// Owning side (players only)
    pub side: Option<Side>,
    pub kind: BodyKind,
    /// Speed above the rest threshold as of the last update
    pub moving: bool,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, spec: BodySpec, side: Option<Side>) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            mass: spec.mass,
            radius: spec.radius,
            side,
            kind: BodyKind::Normal,
            moving: false,
        }
    }

    pub fn fragment(id: BodyId, pos: Vec2, vel: Vec2, spec: BodySpec, spawned_ms: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            mass: spec.mass,
            radius: spec.radius,
            side: None,
            kind: BodyKind::Fragment { spawned_ms },
            moving: true,
        }
    }

    #[inline]
    pub fn is_fragment(&self) -> bool {
        matches!(self.kind, BodyKind::Fragment { .. })
    }

    /// Whether a point lies on this body (edge inclusive)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        point_in_circle(p, self.pos, self.radius)
    }

    /// Fragments older than `lifetime_ms` are expired; other bodies never are
    pub fn expired(&self, now_ms: f64, lifetime_ms: f32) -> bool {
        match self.kind {
            BodyKind::Fragment { spawned_ms } => now_ms - spawned_ms > lifetime_ms as f64,
            BodyKind::Normal => false,
        }
    }

    /// Friction multiplier for the current position: glue if the center is in
    /// reach of any patch, open-field friction otherwise
    pub fn friction_at(&self, glues: &[GluePatch], tuning: &Tuning) -> f32 {
        if glues.iter().any(|g| g.reaches(self.pos, self.radius)) {
            tuning.glue.friction
        } else {
            tuning.friction
        }
    }

    /// Integrate one tick: move, apply friction, cap speed, refresh `moving`
    pub fn advance(&mut self, glues: &[GluePatch], tuning: &Tuning) {
        self.pos += self.vel;
        self.vel *= self.friction_at(glues, tuning);
        self.vel = self.vel.clamp_length_max(tuning.max_vel);
        self.refresh_moving(tuning.rest_epsilon);
    }

    /// Set velocity directly (launches), respecting the speed cap
    pub fn launch(&mut self, vel: Vec2, tuning: &Tuning) {
        self.vel = vel.clamp_length_max(tuning.max_vel);
        self.refresh_moving(tuning.rest_epsilon);
    }

    #[inline]
    pub fn refresh_moving(&mut self, epsilon: f32) {
        self.moving = self.vel.length() > epsilon;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(pos: Vec2) -> Body {
        Body::new(BodyId(1), pos, Tuning::default().player, Some(Side::A))
    }

    #[test]
    fn test_advance_applies_base_friction() {
        let tuning = Tuning::default();
        let mut body = player(Vec2::new(300.0, 300.0));
        body.vel = Vec2::new(10.0, 0.0);
        body.advance(&[], &tuning);
        assert_eq!(body.pos, Vec2::new(310.0, 300.0));
        assert!((body.vel.x - 10.0 * tuning.friction).abs() < 1e-5);
        assert!(body.moving);
    }

    #[test]
    fn test_advance_in_glue_uses_glue_friction() {
        let tuning = Tuning::default();
        let glue = GluePatch::new(Vec2::new(300.0, 300.0), &tuning);
        let mut body = player(Vec2::new(300.0, 300.0));
        body.vel = Vec2::new(10.0, 0.0);
        body.advance(&[glue], &tuning);
        assert!((body.vel.x - 10.0 * tuning.glue.friction).abs() < 1e-5);
    }

    #[test]
    fn test_advance_caps_speed() {
        let tuning = Tuning::default();
        let mut body = player(Vec2::new(300.0, 300.0));
        body.vel = Vec2::new(40.0, 30.0);
        body.advance(&[], &tuning);
        assert!(body.vel.length() <= tuning.max_vel + 1e-4);
    }

    #[test]
    fn test_comes_to_rest() {
        let tuning = Tuning::default();
        let mut body = player(Vec2::new(300.0, 300.0));
        body.vel = Vec2::new(0.0005, 0.0);
        body.advance(&[], &tuning);
        assert!(!body.moving);
    }

    #[test]
    fn test_fragment_expiry() {
        let tuning = Tuning::default();
        let frag = Body::fragment(BodyId(9), Vec2::ZERO, Vec2::X, tuning.grenade.fragment, 1000.0);
        assert!(!frag.expired(1000.0, 120.0));
        assert!(!frag.expired(1120.0, 120.0));
        assert!(frag.expired(1120.5, 120.0));
        assert!(!player(Vec2::ZERO).expired(1e9, 120.0));
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::A.opponent(), Side::B);
        assert_eq!(Side::B.opponent().name(), "Blue");
    }
}
