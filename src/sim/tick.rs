//! Fixed timestep simulation tick
//!
//! Order within a tick: clock, due timers, fire trigger, movement, enemy
//! behavior, reaping, collisions (which also handles game over).

use glam::Vec2;

use super::combat::{CombatReport, resolve_collisions};
use super::scheduler::TimerAction;
use super::spawn::spawn_enemy;
use super::state::{EnemyKind, EntityId, GameState};
use crate::consts::*;
use crate::secs_to_ms;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Up held
    pub up: bool,
    /// Down held
    pub down: bool,
    /// Fire pressed this tick (one-shot)
    pub fire: bool,
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> CombatReport {
    if state.is_over() {
        return CombatReport::default();
    }

    state.time_ms += secs_to_ms(dt);
    run_timers(state);

    if input.fire {
        try_shoot(state);
    }

    update_movement(state, input, dt);
    update_enemy_behavior(state);
    reap_out_of_bounds(state);
    resolve_collisions(state)
}

/// Fire every timer due by the current clock, earliest first
pub fn run_timers(state: &mut GameState) {
    while let Some((id, action)) = state.scheduler.pop_due(state.time_ms) {
        log::trace!("Timer {:?} fired: {:?}", id, action);
        match action {
            TimerAction::SpawnEnemy => {
                spawn_enemy(state);
            }
            TimerAction::ShootReady => state.can_shoot = true,
            TimerAction::ExpireExplosion(explosion) => {
                state.remove_explosion(explosion);
            }
        }
    }
}

/// Fire a player shot if the cooldown allows. Triggers during the cooldown
/// are dropped, not queued.
pub fn try_shoot(state: &mut GameState) -> Option<EntityId> {
    if !state.can_shoot || state.is_over() {
        return None;
    }
    let id = state.add_player_projectile(state.player.muzzle());
    state.can_shoot = false;
    state.scheduler.schedule_once(
        state.time_ms + PLAYER_SHOT_COOLDOWN_MS,
        TimerAction::ShootReady,
    );
    log::debug!("Player fired {:?}", id);
    Some(id)
}

/// Integrate velocities for every entity
pub fn update_movement(state: &mut GameState, input: &TickInput, dt: f32) {
    // Up wins when both are held
    let vy = if input.up {
        -PLAYER_SPEED
    } else if input.down {
        PLAYER_SPEED
    } else {
        0.0
    };
    let player = &mut state.player;
    player.vel = Vec2::new(0.0, vy);
    player.pos += player.vel * dt;
    // Player stays inside the play area. max/min rather than clamp so an
    // area shorter than the player pins it instead of panicking.
    let half_h = PLAYER_HEIGHT / 2.0;
    player.pos.y = player.pos.y.max(half_h).min(state.height - half_h);

    for shot in state
        .player_projectiles
        .iter_mut()
        .chain(state.enemy_projectiles.iter_mut())
    {
        shot.pos += shot.vel * dt;
    }

    let now = state.time_ms;
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel * dt;
        if let EnemyKind::ZigZag {
            initial_y,
            amplitude,
            frequency,
        } = enemy.kind
        {
            enemy.pos.y = zigzag_y(initial_y, amplitude, frequency, now, enemy.pos.x);
        }
    }
}

/// ZigZag height, recomputed from the clock and current x every tick
pub fn zigzag_y(initial_y: f32, amplitude: f32, frequency: f32, time_ms: f64, x: f32) -> f32 {
    let phase = (time_ms + x as f64) * frequency as f64;
    initial_y + (phase.sin() as f32) * amplitude
}

/// Shooters fire when their interval has passed since the last shot
pub fn update_enemy_behavior(state: &mut GameState) {
    let now = state.time_ms;
    let mut muzzles = Vec::new();

    for enemy in &mut state.enemies {
        let muzzle = enemy.muzzle();
        if let EnemyKind::Shooter {
            last_shot_ms,
            can_shoot,
        } = &mut enemy.kind
        {
            if *can_shoot && now - *last_shot_ms > SHOOTER_INTERVAL_MS {
                *last_shot_ms = now;
                muzzles.push(muzzle);
            }
        }
    }

    for pos in muzzles {
        state.add_enemy_projectile(pos);
    }
}

/// Remove entities that have left the play area
pub fn reap_out_of_bounds(state: &mut GameState) {
    let width = state.width;
    state.player_projectiles.retain(|p| p.pos.x <= width);
    state.enemy_projectiles.retain(|p| p.pos.x >= 0.0);
    state.enemies.retain(|e| e.pos.x >= -ENEMY_WIDTH / 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::state::{EnemyVariant, GamePhase};

    fn state() -> GameState {
        GameState::new(&Settings::with_seed(12345))
    }

    #[test]
    fn test_player_vertical_movement() {
        let mut state = state();
        let y0 = state.player.pos.y;
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &up, 0.1);
        assert!((state.player.pos.y - (y0 - 25.0)).abs() < 1e-3);
        assert_eq!(state.player.pos.x, PLAYER_START_X);

        let both = TickInput {
            up: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &both, 0.1);
        assert!((state.player.pos.y - (y0 - 50.0)).abs() < 1e-3);

        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_player_clamped_to_bounds() {
        let mut state = state();
        let down = TickInput {
            down: true,
            ..Default::default()
        };
        for _ in 0..300 {
            update_movement(&mut state, &down, SIM_DT);
        }
        assert_eq!(state.player.pos.y, 768.0 - PLAYER_HEIGHT / 2.0);
    }

    #[test]
    fn test_short_play_area_does_not_panic() {
        let settings = Settings {
            height: 20.0,
            ..Settings::with_seed(5)
        };
        let mut state = GameState::new(&settings);
        let down = TickInput {
            down: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &down, SIM_DT);
        }
        assert_eq!(state.player.pos.y, 20.0 - PLAYER_HEIGHT / 2.0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut state = state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        tick(&mut state, &fire, 0.05);
        assert_eq!(state.player_projectiles.len(), 1);
        assert!(!state.can_shoot);

        // 100 ms later: still cooling down, trigger dropped
        tick(&mut state, &fire, 0.05);
        assert_eq!(state.player_projectiles.len(), 1);

        // 200 ms: cooldown (150 ms after the shot at 50 ms) has expired
        tick(&mut state, &fire, 0.1);
        assert_eq!(state.player_projectiles.len(), 2);
    }

    #[test]
    fn test_shot_starts_at_muzzle() {
        let mut state = state();
        let id = try_shoot(&mut state).unwrap();
        let shot = state.player_projectiles.iter().find(|p| p.id == id).unwrap();
        assert_eq!(shot.pos, Vec2::new(50.0 + PLAYER_WIDTH / 2.0, 384.0));
        assert_eq!(shot.vel, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_spawn_timer() {
        let mut state = state();
        for _ in 0..71 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.time_ms < 1200.0);
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_shooter_interval() {
        let mut state = state();
        state.scheduler = Default::default();
        let id = state.add_enemy(EnemyVariant::Shooter, Vec2::new(800.0, 300.0));

        state.time_ms = 2500.0;
        update_enemy_behavior(&mut state);
        assert!(state.enemy_projectiles.is_empty());

        state.time_ms = 2600.0;
        update_enemy_behavior(&mut state);
        assert_eq!(state.enemy_projectiles.len(), 1);
        let shot = &state.enemy_projectiles[0];
        assert_eq!(shot.pos, state.enemy(id).unwrap().muzzle());
        assert_eq!(shot.vel, Vec2::new(-200.0, 0.0));

        state.time_ms = 2700.0;
        update_enemy_behavior(&mut state);
        assert_eq!(state.enemy_projectiles.len(), 1);

        state.time_ms = 5101.0;
        update_enemy_behavior(&mut state);
        assert_eq!(state.enemy_projectiles.len(), 2);
    }

    #[test]
    fn test_basic_and_zigzag_never_shoot() {
        let mut state = state();
        state.add_enemy(EnemyVariant::Basic, Vec2::new(800.0, 300.0));
        state.add_enemy(EnemyVariant::ZigZag, Vec2::new(800.0, 400.0));
        state.time_ms = 100_000.0;
        update_enemy_behavior(&mut state);
        assert!(state.enemy_projectiles.is_empty());
    }

    #[test]
    fn test_zigzag_formula() {
        assert_eq!(zigzag_y(200.0, 30.0, 0.02, 0.0, 0.0), 200.0);
        let expected = 200.0 + ((1000.0f64 + 500.0) * 0.02f32 as f64).sin() as f32 * 30.0;
        assert!((zigzag_y(200.0, 30.0, 0.02, 1000.0, 500.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_zigzag_moves_on_sinusoid() {
        let mut state = state();
        let id = state.add_enemy(EnemyVariant::ZigZag, Vec2::new(1024.0, 200.0));
        state.time_ms = 40.0;
        update_movement(&mut state, &TickInput::default(), 0.1);
        let enemy = state.enemy(id).unwrap();
        assert!((enemy.pos.x - 1015.0).abs() < 1e-3);
        let expected = zigzag_y(200.0, 30.0, 0.02, 40.0, enemy.pos.x);
        assert_eq!(enemy.pos.y, expected);
    }

    #[test]
    fn test_reaping() {
        let mut state = state();
        state.add_player_projectile(Vec2::new(1024.0, 10.0));
        state.add_player_projectile(Vec2::new(1024.5, 10.0));
        state.add_enemy_projectile(Vec2::new(0.0, 10.0));
        state.add_enemy_projectile(Vec2::new(-0.5, 10.0));
        state.add_enemy(EnemyVariant::Basic, Vec2::new(-20.0, 10.0));
        state.add_enemy(EnemyVariant::Basic, Vec2::new(-20.5, 10.0));

        reap_out_of_bounds(&mut state);
        assert_eq!(state.player_projectiles.len(), 1);
        assert_eq!(state.enemy_projectiles.len(), 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_over_is_terminal() {
        let mut state = state();
        state.phase = GamePhase::Over;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 1.0);
        assert_eq!(state.time_ms, 0.0);
        assert!(state.player_projectiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(&Settings::with_seed(99999));
        let mut b = GameState::new(&Settings::with_seed(99999));
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.health, b.player.health);
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
