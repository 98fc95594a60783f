//! Powerup field effects: grenade bursts and glue patches

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use crate::{point_in_circle, polar_to_cartesian};
use crate::tuning::Tuning;

/// Player-selectable powerups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Grenade,
    Glue,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Grenade, PowerupKind::Glue];

    pub fn name(self) -> &'static str {
        match self {
            PowerupKind::Grenade => "Grenade",
            PowerupKind::Glue => "Glue",
        }
    }
}

/// A sticky circle that raises friction for bodies inside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GluePatch {
    pub pos: Vec2,
    pub radius: f32,
    /// Completed turns left before the patch dries up
    pub turns_left: u32,
}

impl GluePatch {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.glue.radius,
            turns_left: tuning.glue.life_turns,
        }
    }

    /// Whether a body centered at `center` with `radius` is caught by this patch
    #[inline]
    pub fn reaches(&self, center: Vec2, radius: f32) -> bool {
        point_in_circle(center, self.pos, self.radius + radius)
    }
}

/// Count one completed turn against every patch, dropping the exhausted ones
pub fn age_glue(glues: &mut Vec<GluePatch>) {
    for glue in glues.iter_mut() {
        glue.turns_left = glue.turns_left.saturating_sub(1);
    }
    let before = glues.len();
    glues.retain(|g| g.turns_left > 0);
    if glues.len() < before {
        log::debug!("{} glue patch(es) dried up", before - glues.len());
    }
}

/// Build the fragments of a grenade burst at `center`.
///
/// Fragment `i` leaves at angle `pi * i / (count / 2)`, evenly covering the
/// full circle. `next_id` allocates body ids.
pub fn grenade_burst(
    center: Vec2,
    now_ms: f64,
    tuning: &Tuning,
    mut next_id: impl FnMut() -> BodyId,
) -> Vec<Body> {
    let grenade = &tuning.grenade;
    let half = grenade.fragment_count as f32 / 2.0;
    (0..grenade.fragment_count)
        .map(|i| {
            let theta = std::f32::consts::PI * i as f32 / half;
            let vel = polar_to_cartesian(grenade.fragment_speed, theta);
            Body::fragment(next_id(), center, vel, grenade.fragment, now_ms)
        })
        .collect()
}

/// Remove fragments past their lifetime. Returns the removed ids.
///
/// Candidates are collected before the live list is touched.
pub fn expire_fragments(bodies: &mut Vec<Body>, now_ms: f64, lifetime_ms: f32) -> Vec<BodyId> {
    let expired: Vec<BodyId> = bodies
        .iter()
        .filter(|b| b.expired(now_ms, lifetime_ms))
        .map(|b| b.id)
        .collect();
    if !expired.is_empty() {
        bodies.retain(|b| !expired.contains(&b.id));
        log::trace!("Expired {} fragment(s) at {:.0} ms", expired.len(), now_ms);
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids_from(mut next: u32) -> impl FnMut() -> BodyId {
        move || {
            next += 1;
            BodyId(next)
        }
    }

    fn ids() -> impl FnMut() -> BodyId {
        ids_from(100)
    }

    #[test]
    fn test_grenade_burst_is_radial() {
        let tuning = Tuning::default();
        let center = Vec2::new(400.0, 300.0);
        let frags = grenade_burst(center, 0.0, &tuning, ids());

        assert_eq!(frags.len(), 16);
        let total: Vec2 = frags.iter().map(|f| f.vel).sum();
        assert!(total.length() < 1e-3, "burst should be symmetric");
        for f in &frags {
            assert_eq!(f.pos, center);
            assert!((f.vel.length() - tuning.grenade.fragment_speed).abs() < 1e-4);
            assert!(f.is_fragment());
        }
        // First fragment heads along +x, fifth along +y
        assert!((frags[0].vel.x - 15.0).abs() < 1e-4);
        assert!((frags[4].vel.y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_grenade_ids_unique() {
        let frags = grenade_burst(Vec2::ZERO, 0.0, &Tuning::default(), ids());
        let mut seen: Vec<_> = frags.iter().map(|f| f.id).collect();
        seen.dedup();
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_glue_ages_and_dries_up() {
        let tuning = Tuning::default();
        let mut glues = vec![GluePatch::new(Vec2::ZERO, &tuning)];
        age_glue(&mut glues);
        assert_eq!(glues[0].turns_left, 2);
        age_glue(&mut glues);
        assert_eq!(glues[0].turns_left, 1);
        age_glue(&mut glues);
        assert!(glues.is_empty());
    }

    #[test]
    fn test_glue_reach_includes_body_radius() {
        let glue = GluePatch::new(Vec2::ZERO, &Tuning::default());
        assert!(glue.reaches(Vec2::new(70.0, 0.0), 20.0));
        assert!(!glue.reaches(Vec2::new(70.1, 0.0), 20.0));
    }

    #[test]
    fn test_expire_fragments_only_old_ones() {
        let tuning = Tuning::default();
        let mut bodies = grenade_burst(Vec2::ZERO, 0.0, &tuning, ids());
        bodies.extend(grenade_burst(Vec2::ZERO, 100.0, &tuning, ids_from(200)));
        bodies.push(Body::new(BodyId(1), Vec2::ZERO, tuning.ball, None));

        let removed = expire_fragments(&mut bodies, 150.0, 120.0);
        assert_eq!(removed.len(), 16);
        assert_eq!(bodies.len(), 17);

        // Nothing further to remove at the same time
        assert!(expire_fragments(&mut bodies, 150.0, 120.0).is_empty());
    }
}
