//! Collision detection and response between circles
//!
//! Impulse-based: positional correction, normal impulse with restitution,
//! tangential friction impulse, then a velocity cap. Contacts are relaxed in
//! several sequential passes per tick so that piles of bodies (grenade
//! fragments in particular) settle instead of jittering.

use glam::Vec2;

use super::body::Body;
use crate::tuning::Tuning;

/// Result of a circle-circle overlap test
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the second body toward the first
    pub normal: Vec2,
    /// Overlap depth (0 when exactly touching)
    pub penetration: f32,
}

/// Contact material for one resolution
#[derive(Debug, Clone, Copy)]
pub struct ContactParams {
    pub restitution: f32,
    pub friction: f32,
    pub max_vel: f32,
}

impl From<&Tuning> for ContactParams {
    fn from(tuning: &Tuning) -> Self {
        Self {
            restitution: tuning.restitution,
            friction: tuning.contact_friction,
            max_vel: tuning.max_vel,
        }
    }
}

/// Check overlap between two circles.
///
/// Returns `None` when apart, or when the centers coincide and no normal
/// can be formed.
pub fn circle_contact(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> Option<Contact> {
    let delta = a_pos - b_pos;
    let dist = delta.length();
    let penetration = a_radius + b_radius - dist;
    if penetration < 0.0 {
        return None;
    }
    if dist <= f32::EPSILON {
        return None;
    }
    Some(Contact {
        normal: delta / dist,
        penetration,
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Componentwise clamp to [-max, max], then a magnitude cap
#[inline]
pub fn clamp_velocity(vel: Vec2, max_vel: f32) -> Vec2 {
    vel.clamp(Vec2::splat(-max_vel), Vec2::splat(max_vel))
        .clamp_length_max(max_vel)
}

/// Resolve one contact between `a` and `b` in place.
///
/// Returns `false` if the pair turned out not to be resolvable (apart, or
/// coincident centers).
pub fn resolve_pair(a: &mut Body, b: &mut Body, params: ContactParams) -> bool {
    let Some(contact) = circle_contact(a.pos, a.radius, b.pos, b.radius) else {
        if a.pos == b.pos {
            log::debug!("Coincident bodies {:?} and {:?}, skipping contact", a.id, b.id);
        }
        return false;
    };
    let n = contact.normal;

    // Split the overlap evenly regardless of mass
    let separation = n * contact.penetration * 0.5;
    a.pos += separation;
    b.pos -= separation;

    let rel = a.vel - b.vel;
    let vel_along_normal = rel.dot(n);
    if vel_along_normal >= 0.0 {
        // Already separating
        return true;
    }

    let inv_mass_sum = 1.0 / a.mass + 1.0 / b.mass;
    let j = -(1.0 + params.restitution) * vel_along_normal / inv_mass_sum;
    let impulse = n * j;
    a.vel += impulse / a.mass;
    b.vel -= impulse / b.mass;

    // Friction acts on the pre-impulse tangential slip and only ever reduces it
    let tangent = n.perp();
    let slip = rel.dot(tangent);
    let jt = (-slip * params.friction / inv_mass_sum).clamp(
        -slip.abs() / inv_mass_sum,
        slip.abs() / inv_mass_sum,
    );
    let friction_impulse = tangent * jt;
    a.vel += friction_impulse / a.mass;
    b.vel -= friction_impulse / b.mass;

    a.vel = clamp_velocity(a.vel, params.max_vel);
    b.vel = clamp_velocity(b.vel, params.max_vel);
    true
}

/// Borrow two distinct bodies mutably
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Run `passes` sequential relaxation passes over every unordered pair.
///
/// Pairs are visited in slice order (bodies are kept sorted by id), so the
/// outcome is reproducible. Returns the number of contacts resolved.
pub fn resolve_contacts(bodies: &mut [Body], params: ContactParams, passes: u32) -> usize {
    let mut resolved = 0;
    for _ in 0..passes {
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (a, b) = pair_mut(bodies, i, j);
                if a.pos.distance(b.pos) <= a.radius + b.radius && resolve_pair(a, b, params) {
                    resolved += 1;
                }
            }
        }
    }
    resolved
}
