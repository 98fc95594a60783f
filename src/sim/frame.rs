//! Read-only render snapshot of a `GameState`
//!
//! The presentation layer draws exactly what is in a `Frame` and never
//! touches the simulation directly.

use glam::Vec2;
use serde::Serialize;

use super::body::{BodyId, Side};
use super::effects::PowerupKind;
use super::state::{GamePhase, GameState};
use crate::angle_between;

/// How a body should be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tint {
    Ball,
    Team(Side),
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub id: BodyId,
    pub pos: Vec2,
    pub radius: f32,
    pub tint: Tint,
    /// Currently picked up for aiming
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlueView {
    pub pos: Vec2,
    pub radius: f32,
    pub turns_left: u32,
}

/// Drag guide from the selected player to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AimLine {
    pub from: Vec2,
    pub to: Vec2,
    /// Direction of the drag in radians (the launch goes the other way)
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerView {
    pub text: String,
    pub remaining_ms: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub bodies: Vec<BodyView>,
    pub glues: Vec<GlueView>,
    pub phase: GamePhase,
    pub turn: Side,
    pub score_a: u32,
    pub score_b: u32,
    pub selected_powerup: Option<PowerupKind>,
    pub selected_powerup_name: Option<&'static str>,
    pub powerup_available: bool,
    pub banner: Option<BannerView>,
    pub aim: Option<AimLine>,
    /// Show the "X to move" prompt
    pub show_turn: bool,
}

impl Frame {
    /// Snapshot `state`. `pointer` is the current pointer position, used for the aim line.
    pub fn capture(state: &GameState, pointer: Option<Vec2>) -> Self {
        let selected = state.selected.map(|s| s.body);
        let bodies = state
            .bodies
            .iter()
            .map(|b| BodyView {
                id: b.id,
                pos: b.pos,
                radius: b.radius,
                tint: if b.is_fragment() {
                    Tint::Fragment
                } else if let Some(side) = b.side {
                    Tint::Team(side)
                } else {
                    Tint::Ball
                },
                selected: Some(b.id) == selected,
            })
            .collect();

        let glues = state
            .glues
            .iter()
            .map(|g| GlueView {
                pos: g.pos,
                radius: g.radius,
                turns_left: g.turns_left,
            })
            .collect();

        let aim = match (selected.and_then(|id| state.body(id)), pointer) {
            (Some(body), Some(to)) => Some(AimLine {
                from: body.pos,
                to,
                angle: angle_between(body.pos, to),
            }),
            _ => None,
        };

        let in_match = !matches!(state.phase, GamePhase::Menu);
        Self {
            bodies,
            glues,
            phase: state.phase,
            turn: state.turn,
            score_a: state.score_a,
            score_b: state.score_b,
            selected_powerup: state.selected_powerup,
            selected_powerup_name: state.selected_powerup.map(PowerupKind::name),
            powerup_available: state.powerup_available,
            banner: state.banner.map(|b| BannerView {
                text: b.kind.text(),
                remaining_ms: b.remaining_ms(state.time_ms, state.tuning.banner_ms),
            }),
            aim,
            show_turn: in_match && state.nothing_moving && !state.scored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Banner, BannerKind, Selection};
    use crate::tuning::Tuning;

    fn kickoff() -> GameState {
        let mut state = GameState::new(Tuning::default());
        state.start_match();
        state.reset_round();
        state
    }

    #[test]
    fn test_capture_tints_and_scores() {
        let mut state = kickoff();
        state.score_b = 2;
        state.spawn_grenade(Vec2::new(400.0, 200.0));
        let frame = Frame::capture(&state, None);

        assert_eq!(frame.bodies.len(), 23);
        assert_eq!(frame.bodies.iter().filter(|b| b.tint == Tint::Ball).count(), 1);
        assert_eq!(frame.bodies.iter().filter(|b| b.tint == Tint::Fragment).count(), 16);
        assert_eq!(frame.bodies.iter().filter(|b| b.tint == Tint::Team(Side::B)).count(), 3);
        assert_eq!((frame.score_a, frame.score_b), (0, 2));
        assert!(frame.aim.is_none());
        assert!(frame.show_turn);
    }

    #[test]
    fn test_aim_line_follows_pointer() {
        let mut state = kickoff();
        let body = state.own_player_at(Vec2::new(300.0, 300.0)).unwrap();
        state.selected = Some(Selection {
            body,
            origin: Vec2::new(300.0, 300.0),
        });
        let frame = Frame::capture(&state, Some(Vec2::new(250.0, 300.0)));

        let aim = frame.aim.unwrap();
        assert_eq!(aim.from, Vec2::new(300.0, 300.0));
        assert!((aim.angle - std::f32::consts::PI).abs() < 1e-5);
        assert_eq!(frame.bodies.iter().filter(|b| b.selected).count(), 1);
    }

    #[test]
    fn test_banner_hides_turn_prompt() {
        let mut state = kickoff();
        state.phase = GamePhase::Settling;
        state.time_ms = 1500.0;
        state.banner = Some(Banner {
            kind: BannerKind::Scored(Side::A),
            shown_at_ms: 1000.0,
        });
        let frame = Frame::capture(&state, None);
        let banner = frame.banner.unwrap();
        assert_eq!(banner.text, "BLUE SCORE");
        assert_eq!(banner.remaining_ms, 4500.0);
        assert!(!frame.show_turn);
    }

    #[test]
    fn test_powerup_name_and_json() {
        let mut state = kickoff();
        state.selected_powerup = Some(PowerupKind::Glue);
        let frame = Frame::capture(&state, None);
        assert_eq!(frame.selected_powerup_name, Some("Glue"));

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["selected_powerup"], "Glue");
        assert_eq!(json["bodies"].as_array().unwrap().len(), 7);
    }
}
