//! Data-driven game balance
//!
//! Every physics and rules number the simulation reads. Defaults reproduce the
//! classic feel; a JSON file can override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Mass and radius of one class of body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub mass: f32,
    pub radius: f32,
}

/// Grenade burst parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrenadeTuning {
    /// Number of fragments in one burst
    pub fragment_count: u32,
    pub fragment: BodySpec,
    /// Launch speed of each fragment (pixels/tick)
    pub fragment_speed: f32,
    /// Fragments are removed once older than this (milliseconds)
    pub fragment_lifetime_ms: f32,
}

impl Default for GrenadeTuning {
    fn default() -> Self {
        Self {
            fragment_count: 16,
            fragment: BodySpec {
                mass: 40.0,
                radius: 3.0,
            },
            fragment_speed: 15.0,
            fragment_lifetime_ms: 120.0,
        }
    }
}

/// Glue patch parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlueTuning {
    pub radius: f32,
    /// Per-tick velocity multiplier inside a patch
    pub friction: f32,
    /// Completed turns a patch survives
    pub life_turns: u32,
}

impl Default for GlueTuning {
    fn default() -> Self {
        Self {
            radius: 50.0,
            friction: 0.9,
            life_turns: 3,
        }
    }
}

/// Physics and rules constants
///
/// Velocities are in pixels per tick; the simulation integrates once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-tick velocity multiplier on open field
    pub friction: f32,
    /// Tangential friction coefficient for body-body contacts
    pub contact_friction: f32,
    /// Bounciness of body-body contacts
    pub restitution: f32,
    /// Speed cap for every body
    pub max_vel: f32,
    /// Drag length is divided by this to get launch velocity
    pub aim_sensitivity: f32,
    /// Speeds at or below this count as stopped
    pub rest_epsilon: f32,
    /// Collision relaxation passes per tick
    pub relaxation_passes: u32,
    /// Goals needed to win
    pub win_score: u32,
    /// How long score/win banners stay up (milliseconds)
    pub banner_ms: f32,
    pub ball: BodySpec,
    pub player: BodySpec,
    pub grenade: GrenadeTuning,
    pub glue: GlueTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.97,
            contact_friction: 0.15,
            restitution: 0.8,
            max_vel: 12.0,
            aim_sensitivity: 10.0,
            rest_epsilon: 0.001,
            relaxation_passes: 2,
            win_score: 3,
            banner_ms: 5000.0,
            ball: BodySpec {
                mass: 8.0,
                radius: 10.0,
            },
            player: BodySpec {
                mass: 30.0,
                radius: 20.0,
            },
            grenade: GrenadeTuning::default(),
            glue: GlueTuning::default(),
        }
    }
}

/// Reasons a tuning file can be rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read tuning file: {e}"),
            Self::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning file from disk
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                log::warn!("Using default tuning: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Reject values that would break the physics or leave bodies moving forever
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        for (field, spec) in [
            ("ball", self.ball),
            ("player", self.player),
            ("grenade.fragment", self.grenade.fragment),
        ] {
            if !(spec.mass > 0.0) {
                return invalid(field, "mass must be positive");
            }
            if !(spec.radius > 0.0) {
                return invalid(field, "radius must be positive");
            }
        }
        for (field, value) in [("friction", self.friction), ("glue.friction", self.glue.friction)] {
            if !(value > 0.0 && value <= 1.0) {
                return invalid(field, "must be in (0, 1]");
            }
        }
        if !(0.0..=1.0).contains(&self.contact_friction) {
            return invalid("contact_friction", "must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return invalid("restitution", "must be in [0, 1]");
        }
        for (field, value) in [
            ("rest_epsilon", self.rest_epsilon),
            ("banner_ms", self.banner_ms),
            ("glue.radius", self.glue.radius),
            ("grenade.fragment_speed", self.grenade.fragment_speed),
            ("grenade.fragment_lifetime_ms", self.grenade.fragment_lifetime_ms),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be finite and non-negative");
            }
        }
        if !(self.max_vel > 0.0) {
            return invalid("max_vel", "must be positive");
        }
        if !(self.aim_sensitivity > 0.0) {
            return invalid("aim_sensitivity", "must be positive");
        }
        if self.relaxation_passes == 0 {
            return invalid("relaxation_passes", "need at least one pass");
        }
        if self.win_score == 0 {
            return invalid("win_score", "must be at least 1");
        }
        if self.glue.life_turns == 0 {
            return invalid("glue.life_turns", "must be at least 1");
        }
        Ok(())
    }
}
