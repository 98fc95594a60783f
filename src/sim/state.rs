//! Match state and core simulation types
//!
//! Everything the turn machine mutates lives in one `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, Side};
use super::effects::{GluePatch, PowerupKind, grenade_burst};
use super::field::Field;
use crate::consts::SPAWNS;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-match, waiting for a start request
    Menu,
    /// Waiting for every body to stop before the kickoff reset
    Settling,
    /// The side to move may pick and launch a player
    Aiming,
    /// A powerup is armed and waits for a target on the field
    PowerupTargeting,
    /// A side reached the win score; the banner runs out, then back to Menu
    Resolved(Side),
}

/// A player picked up for aiming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub body: BodyId,
    /// Pointer position when the drag began
    pub origin: Vec2,
}

/// Transient announcement text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerKind {
    Scored(Side),
    Won(Side),
}

impl BannerKind {
    pub fn text(self) -> String {
        match self {
            BannerKind::Scored(side) => format!("{} SCORE", side.name().to_uppercase()),
            BannerKind::Won(side) => format!("{} WINS", side.name().to_uppercase()),
        }
    }
}

/// A banner and when it went up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub shown_at_ms: f64,
}

impl Banner {
    /// Milliseconds left on screen (0 once expired)
    pub fn remaining_ms(&self, now_ms: f64, duration_ms: f32) -> f32 {
        (duration_ms as f64 - (now_ms - self.shown_at_ms)).max(0.0) as f32
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted,
    /// Kickoff layout restored after a settle
    RoundReset,
    Launched { body: BodyId, vel: Vec2 },
    /// A drag released on its own body
    AimCancelled,
    PowerupArmed(PowerupKind),
    PowerupDisarmed(PowerupKind),
    PowerupUsed { kind: PowerupKind, at: Vec2 },
    FragmentsExpired(Vec<BodyId>),
    Goal { scorer: Side },
    Won(Side),
    /// Win banner ran out; back in the menu
    MatchOver,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub field: Field,
    /// Simulation clock (milliseconds since the state was created)
    pub time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Side to move
    pub turn: Side,
    pub score_a: u32,
    pub score_b: u32,
    /// Active bodies, sorted by id
    pub bodies: Vec<Body>,
    /// The current ball, if a round is set up
    pub ball: Option<BodyId>,
    pub glues: Vec<GluePatch>,
    pub selected: Option<Selection>,
    pub selected_powerup: Option<PowerupKind>,
    /// Whether the side to move may still use a powerup this turn
    pub powerup_available: bool,
    pub banner: Option<Banner>,
    /// Every body reported at rest at the start of this tick
    pub nothing_moving: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state sitting in the menu
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            field: Field::standard(),
            time_ms: 0.0,
            time_ticks: 0,
            phase: GamePhase::Menu,
            turn: Side::A,
            score_a: 0,
            score_b: 0,
            bodies: Vec::new(),
            ball: None,
            glues: Vec::new(),
            selected: None,
            selected_powerup: None,
            powerup_available: true,
            banner: None,
            nothing_moving: true,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Begin a new match from the menu. Ignored in any other phase.
    pub fn start_match(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("Start request ignored in {:?}", self.phase);
            return false;
        }
        self.score_a = 0;
        self.score_b = 0;
        self.turn = Side::A;
        self.bodies.clear();
        self.ball = None;
        self.glues.clear();
        self.selected = None;
        self.selected_powerup = None;
        self.powerup_available = true;
        self.banner = None;
        self.phase = GamePhase::Settling;
        log::info!("Match started (first to {})", self.tuning.win_score);
        true
    }

    /// Replace all bodies with the kickoff layout: ball at center, mirrored
    /// player formations. Glue stays.
    pub fn reset_round(&mut self) {
        self.bodies.clear();
        let ball_id = self.next_entity_id();
        let ball = Body::new(ball_id, self.field.center(), self.tuning.ball, None);
        self.bodies.push(ball);
        self.ball = Some(ball_id);

        let pitch = self.field.pitch;
        for (sx, sy) in SPAWNS {
            let id = self.next_entity_id();
            let pos = Vec2::new(pitch.min.x + sx, pitch.min.y + sy);
            self.bodies.push(Body::new(id, pos, self.tuning.player, Some(Side::A)));

            let id = self.next_entity_id();
            let pos = Vec2::new(pitch.max.x - sx, pitch.min.y + sy);
            self.bodies.push(Body::new(id, pos, self.tuning.player, Some(Side::B)));
        }

        self.selected = None;
        self.powerup_available = true;
        self.phase = GamePhase::Aiming;
        log::info!(
            "Kickoff: {} {} - {} {}, {} to move",
            Side::A.name(),
            self.score_a,
            self.score_b,
            Side::B.name(),
            self.turn.name()
        );
    }

    /// Burst a grenade at `at`, adding its fragments to the field
    pub fn spawn_grenade(&mut self, at: Vec2) -> usize {
        let mut next = self.next_id;
        let fragments = grenade_burst(at, self.time_ms, &self.tuning, || {
            let id = BodyId(next);
            next += 1;
            id
        });
        self.next_id = next;
        let count = fragments.len();
        self.bodies.extend(fragments);
        count
    }

    /// Lay a glue patch at `at`
    pub fn place_glue(&mut self, at: Vec2) {
        self.glues.push(GluePatch::new(at, &self.tuning));
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn ball(&self) -> Option<&Body> {
        self.ball.and_then(|id| self.body(id))
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    /// A goal (or the match start) is pending its settle/reset
    pub fn scored(&self) -> bool {
        matches!(self.phase, GamePhase::Settling | GamePhase::Resolved(_))
    }

    /// Every body is at rest
    pub fn all_at_rest(&self) -> bool {
        self.bodies.iter().all(|b| !b.moving)
    }

    /// The side-to-move's player under `p`, if any
    pub fn own_player_at(&self, p: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .filter(|b| !b.is_fragment() && b.side == Some(self.turn))
            .find(|b| b.contains_point(p))
            .map(|b| b.id)
    }

    /// Ensure bodies are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bodies.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_in_menu() {
        let state = GameState::new(Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.bodies.is_empty());
        assert!(state.powerup_available);
    }

    #[test]
    fn test_start_only_from_menu() {
        let mut state = GameState::new(Tuning::default());
        assert!(state.start_match());
        assert_eq!(state.phase, GamePhase::Settling);
        assert!(!state.start_match());
    }

    #[test]
    fn test_reset_round_formation() {
        let mut state = GameState::new(Tuning::default());
        state.reset_round();

        assert_eq!(state.bodies.len(), 7);
        let ball = state.ball().unwrap();
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ball.radius, 10.0);

        let a: Vec<_> = state.bodies.iter().filter(|b| b.side == Some(Side::A)).collect();
        let b: Vec<_> = state.bodies.iter().filter(|b| b.side == Some(Side::B)).collect();
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
        // Mirrored across the halfway line
        for (pa, pb) in a.iter().zip(&b) {
            assert!((pa.pos.x + pb.pos.x - 800.0).abs() < 1e-4);
            assert_eq!(pa.pos.y, pb.pos.y);
        }
        assert!(a.iter().all(|p| p.pos.x < 400.0));
        assert!(state.all_at_rest());
        assert_eq!(state.phase, GamePhase::Aiming);
    }

    #[test]
    fn test_reset_round_keeps_glue() {
        let mut state = GameState::new(Tuning::default());
        state.glues.push(GluePatch::new(Vec2::new(300.0, 300.0), &state.tuning));
        state.reset_round();
        assert_eq!(state.glues.len(), 1);
    }

    #[test]
    fn test_own_player_at() {
        let mut state = GameState::new(Tuning::default());
        state.reset_round();
        // Side A player at (220, 233.3)
        let spot = Vec2::new(220.0, 100.0 + 400.0 / 3.0);
        assert!(state.own_player_at(spot).is_some());
        state.turn = Side::B;
        assert!(state.own_player_at(spot).is_none());
    }

    #[test]
    fn test_spawn_grenade_allocates_fresh_ids() {
        let mut state = GameState::new(Tuning::default());
        state.reset_round();
        let count = state.spawn_grenade(Vec2::new(400.0, 200.0));
        assert_eq!(count, 16);
        assert_eq!(state.bodies.len(), 23);

        let mut ids: Vec<_> = state.bodies.iter().map(|b| b.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 23);
        assert_eq!(state.next_entity_id(), BodyId(24));
    }

    #[test]
    fn test_banner_text_and_timer() {
        assert_eq!(BannerKind::Scored(Side::B).text(), "RED SCORE");
        assert_eq!(BannerKind::Won(Side::A).text(), "BLUE WINS");
        let banner = Banner {
            kind: BannerKind::Won(Side::A),
            shown_at_ms: 1000.0,
        };
        assert_eq!(banner.remaining_ms(2000.0, 5000.0), 4000.0);
        assert_eq!(banner.remaining_ms(7000.0, 5000.0), 0.0);
    }
}
