//! Flick Soccer headless exhibition
//!
//! Plays a seeded match between two random players through the same pointer
//! events a real frontend would send, then prints the final frame as JSON.
//!
//! Usage: `flick-soccer [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use flick_soccer::{
    Tuning,
    consts::SIM_DT,
    sim::{Frame, GameEvent, GamePhase, GameState, PowerupKind, Side, tick},
    ui::InputCollector,
};
#[cfg(not(target_arch = "wasm32"))]
use glam::Vec2;
#[cfg(not(target_arch = "wasm32"))]
use rand::{Rng, SeedableRng};
#[cfg(not(target_arch = "wasm32"))]
use rand_pcg::Pcg32;

/// Twenty minutes of play at 60 ticks per second
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 60 * 60 * 20;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 7;

/// Chance a side spends its powerup before shooting
#[cfg(not(target_arch = "wasm32"))]
const POWERUP_CHANCE: f64 = 0.2;

/// Random but ball-minded player for one side of the table
#[cfg(not(target_arch = "wasm32"))]
struct Bot {
    rng: Pcg32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Bot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Feed the collector whatever the side to move does this tick
    fn act(&mut self, state: &GameState, collector: &mut InputCollector) {
        match state.phase {
            GamePhase::Aiming if state.all_at_rest() && state.selected.is_none() => {
                if state.powerup_available && self.rng.random_bool(POWERUP_CHANCE) {
                    let kind = PowerupKind::ALL[self.rng.random_range(0..PowerupKind::ALL.len())];
                    if let Some(button) = collector.bar().center_of(kind) {
                        collector.pointer_pressed(button);
                        collector.pointer_released(button);
                    }
                } else {
                    self.shoot(state, collector);
                }
            }
            GamePhase::PowerupTargeting => {
                let pitch = state.field.pitch;
                let target = Vec2::new(
                    self.rng.random_range(pitch.min.x + 20.0..pitch.max.x - 20.0),
                    self.rng.random_range(pitch.min.y + 20.0..pitch.max.y - 20.0),
                );
                collector.pointer_released(target);
            }
            _ => {}
        }
    }

    /// Drag a random own player away from the ball (plus some wobble)
    fn shoot(&mut self, state: &GameState, collector: &mut InputCollector) {
        let players: Vec<Vec2> = state
            .bodies
            .iter()
            .filter(|b| !b.is_fragment() && b.side == Some(state.turn))
            .map(|b| b.pos)
            .collect();
        if players.is_empty() {
            return;
        }
        let from = players[self.rng.random_range(0..players.len())];
        let goal = state.ball().map_or(state.field.center(), |b| b.pos);
        let toward = (goal - from).normalize_or(Vec2::X);
        let wobble = Vec2::from_angle(self.rng.random_range(-0.3f32..0.3));
        let pull: f32 = self.rng.random_range(40.0..160.0);

        collector.pointer_pressed(from);
        collector.pointer_released(from - wobble.rotate(toward) * pull);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Flick Soccer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning_path = args.next().map(PathBuf::from);
    let seed = match args.next() {
        Some(raw) => raw.parse()?,
        None => DEFAULT_SEED,
    };
    let tuning = Tuning::load_or_default(tuning_path.as_deref());

    let mut state = GameState::new(tuning);
    let mut collector = InputCollector::default();
    let mut bot = Bot::new(seed);
    collector.request_start();

    let mut launches = 0u32;
    while state.time_ticks < MAX_TICKS {
        bot.act(&state, &mut collector);
        let input = collector.take();
        let events = tick(&mut state, &input, SIM_DT);

        let mut over = false;
        for event in &events {
            match event {
                GameEvent::Launched { .. } => launches += 1,
                GameEvent::PowerupUsed { kind, at } => {
                    log::info!("{} used {} at ({:.0}, {:.0})", state.turn.name(), kind.name(), at.x, at.y);
                }
                GameEvent::MatchOver => over = true,
                _ => {}
            }
        }
        if over {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks and {} launches: {} {} - {} {}",
        state.time_ticks,
        launches,
        Side::A.name(),
        state.score_a,
        state.score_b,
        Side::B.name(),
    );
    println!("{}", serde_json::to_string_pretty(&Frame::capture(&state, None))?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core library is driven by a browser frontend; there is no wasm entry point here
}
