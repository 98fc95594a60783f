//! Fixed timestep simulation tick
//!
//! Per-tick order: clock, settle check, input, fragment expiry, motion and
//! friction, walls, contact relaxation, goal check, banner expiry.

use glam::Vec2;

use super::body::Side;
use super::boundary::resolve_boundary;
use super::collision::{ContactParams, resolve_contacts};
use super::effects::{PowerupKind, age_glue, expire_fragments};
use super::field::GoalEnd;
use super::state::{Banner, BannerKind, GameEvent, GamePhase, GameState, Selection};

/// Input polled from the presentation layer for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current pointer position (drives the aim line)
    pub pointer: Option<Vec2>,
    /// Pointer pressed this tick, at this position
    pub pointer_down: Option<Vec2>,
    /// Pointer released this tick, at this position
    pub pointer_up: Option<Vec2>,
    /// A powerup button was clicked
    pub toggle_powerup: Option<PowerupKind>,
    /// Start a match (menu only)
    pub start: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;

    if state.phase == GamePhase::Menu {
        if input.start && state.start_match() {
            events.push(GameEvent::MatchStarted);
        }
        return events;
    }

    // Settle check
    state.nothing_moving = state.all_at_rest();
    if state.phase == GamePhase::Settling && state.nothing_moving {
        state.reset_round();
        events.push(GameEvent::RoundReset);
        return events;
    }

    handle_input(state, input, &mut events);

    let expired = expire_fragments(
        &mut state.bodies,
        state.time_ms,
        state.tuning.grenade.fragment_lifetime_ms,
    );
    if !expired.is_empty() {
        events.push(GameEvent::FragmentsExpired(expired));
    }

    for body in state.bodies.iter_mut() {
        body.advance(&state.glues, &state.tuning);
        let hits = resolve_boundary(body, &state.field);
        if hits.goal_back || hits.goal_wall {
            log::trace!("{:?} rattled the goal at {:?}", body.id, body.pos);
        }
    }

    resolve_contacts(
        &mut state.bodies,
        ContactParams::from(&state.tuning),
        state.tuning.relaxation_passes,
    );
    let epsilon = state.tuning.rest_epsilon;
    for body in state.bodies.iter_mut() {
        body.refresh_moving(epsilon);
    }

    check_goal(state, &mut events);
    expire_banner(state, &mut events);

    // Ensure deterministic ordering
    state.normalize_order();
    events
}

/// Route one tick of pointer/button input through the turn machine
fn handle_input(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if !matches!(state.phase, GamePhase::Aiming | GamePhase::PowerupTargeting) {
        return;
    }
    if let Some(kind) = input.toggle_powerup {
        toggle_powerup(state, kind, events);
    }
    if let Some(p) = input.pointer_down {
        pointer_down(state, p);
    }
    if let Some(p) = input.pointer_up {
        pointer_up(state, p, events);
    }
}

fn toggle_powerup(state: &mut GameState, kind: PowerupKind, events: &mut Vec<GameEvent>) {
    if !state.powerup_available || !state.nothing_moving || state.selected.is_some() {
        return;
    }
    match state.selected_powerup {
        Some(armed) if armed == kind => {
            state.selected_powerup = None;
            state.phase = GamePhase::Aiming;
            events.push(GameEvent::PowerupDisarmed(kind));
        }
        Some(_) => {}
        None => {
            state.selected_powerup = Some(kind);
            state.phase = GamePhase::PowerupTargeting;
            events.push(GameEvent::PowerupArmed(kind));
        }
    }
}

fn pointer_down(state: &mut GameState, p: Vec2) {
    if state.phase != GamePhase::Aiming || !state.nothing_moving || state.selected.is_some() {
        return;
    }
    if let Some(body) = state.own_player_at(p) {
        state.selected = Some(Selection { body, origin: p });
    }
}

fn pointer_up(state: &mut GameState, p: Vec2, events: &mut Vec<GameEvent>) {
    if state.phase == GamePhase::PowerupTargeting {
        if let Some(kind) = state.selected_powerup {
            if state.field.contains_point(p) {
                activate_powerup(state, kind, p);
                events.push(GameEvent::PowerupUsed { kind, at: p });
            }
        }
        return;
    }

    let Some(selection) = state.selected.take() else {
        return;
    };
    let tuning = &state.tuning;
    let Some(body) = state.bodies.iter_mut().find(|b| b.id == selection.body) else {
        return;
    };
    if body.contains_point(p) {
        events.push(GameEvent::AimCancelled);
        return;
    }

    body.launch((selection.origin - p) / tuning.aim_sensitivity, tuning);
    let vel = body.vel;
    log::debug!("{} launched {:?} at {:?}", state.turn.name(), selection.body, vel);
    events.push(GameEvent::Launched {
        body: selection.body,
        vel,
    });

    state.turn = state.turn.opponent();
    state.powerup_available = true;
    age_glue(&mut state.glues);
}

fn activate_powerup(state: &mut GameState, kind: PowerupKind, at: Vec2) {
    match kind {
        PowerupKind::Grenade => {
            let count = state.spawn_grenade(at);
            log::debug!("Grenade at {:?}: {} fragments", at, count);
        }
        PowerupKind::Glue => {
            state.place_glue(at);
            log::debug!("Glue at {:?}", at);
        }
    }
    state.powerup_available = false;
    state.selected_powerup = None;
    state.phase = GamePhase::Aiming;
}

/// Score once when the ball's center crosses a goal line
fn check_goal(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.scored() {
        return;
    }
    let Some(end) = state.ball().and_then(|ball| state.field.crossed_goal_line(ball.pos)) else {
        return;
    };
    let scorer = match end {
        GoalEnd::Left => Side::B,
        GoalEnd::Right => Side::A,
    };
    let total = match scorer {
        Side::A => {
            state.score_a += 1;
            state.score_a
        }
        Side::B => {
            state.score_b += 1;
            state.score_b
        }
    };

    state.turn = scorer.opponent();
    state.powerup_available = false;
    state.selected = None;
    state.selected_powerup = None;
    events.push(GameEvent::Goal { scorer });

    let kind = if total >= state.tuning.win_score {
        state.phase = GamePhase::Resolved(scorer);
        events.push(GameEvent::Won(scorer));
        log::info!(
            "{} wins {}-{}",
            scorer.name(),
            state.score(scorer),
            state.score(scorer.opponent())
        );
        BannerKind::Won(scorer)
    } else {
        state.phase = GamePhase::Settling;
        log::info!("{} scores ({} - {})", scorer.name(), state.score_a, state.score_b);
        BannerKind::Scored(scorer)
    };
    state.banner = Some(Banner {
        kind,
        shown_at_ms: state.time_ms,
    });
}

/// Drop a banner that has been up long enough; a finished match returns to the menu
fn expire_banner(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(banner) = state.banner else {
        return;
    };
    if state.time_ms - banner.shown_at_ms <= state.tuning.banner_ms as f64 {
        return;
    }
    state.banner = None;
    if let GamePhase::Resolved(winner) = state.phase {
        state.phase = GamePhase::Menu;
        events.push(GameEvent::MatchOver);
        log::info!("Match over, {} won; back to menu", winner.name());
    }
}
