//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod boundary;
pub mod collision;
pub mod effects;
pub mod field;
pub mod frame;
pub mod state;
pub mod tick;

pub use body::{Body, BodyId, BodyKind, Side};
pub use boundary::{WallHits, resolve_boundary};
pub use collision::{Contact, ContactParams, circle_contact, resolve_contacts, resolve_pair};
pub use effects::{GluePatch, PowerupKind};
pub use field::{Field, GoalEnd, Rect};
pub use frame::{AimLine, BodyView, Frame, Tint};
pub use state::{Banner, BannerKind, GameEvent, GamePhase, GameState, Selection};
pub use tick::{TickInput, tick};
