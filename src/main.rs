//! Side Shooter headless runner
//!
//! Runs one game with a simple autopilot at a fixed timestep and prints the
//! final HUD snapshot as JSON.
//!
//! Usage: `side-shooter [settings.json]`

use side_shooter::Settings;
use side_shooter::sim::{GameEvent, GameState, TickInput, tick};

/// Dead zone (units) before the autopilot starts steering
const STEER_DEADBAND: f32 = 6.0;

fn load_settings() -> Settings {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("No settings file given, using defaults");
        return Settings::default();
    };
    match Settings::load_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{e}; falling back to default settings");
            Settings::default()
        }
    }
}

/// Line up with the closest enemy ahead and keep firing
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.pos.x > player.pos.x)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    if let Some(enemy) = target {
        let dy = enemy.pos.y - player.pos.y;
        input.up = dy < -STEER_DEADBAND;
        input.down = dy > STEER_DEADBAND;
    }
    input
}

fn main() {
    env_logger::init();
    log::info!("Side Shooter (headless) starting...");

    let settings = load_settings();
    let dt = settings.dt();
    let mut state = GameState::new(&settings);

    let mut ticks = 0u64;
    let mut explosions = 0u32;
    while !state.is_over() && ticks < settings.max_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input, dt);
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::Explosion { .. } => explosions += 1,
                GameEvent::GameOver { final_score } => {
                    log::info!("Final score {} after {} ticks", final_score, ticks);
                }
            }
        }
    }

    if !state.is_over() {
        log::info!("Stopped after {} ticks with the run still alive", ticks);
    }
    log::info!("{} explosions", explosions);

    match serde_json::to_string_pretty(&state.hud()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize HUD: {e}"),
    }
}
