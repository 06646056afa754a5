//! Side Shooter - simulation core for a 2D side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, timers, movement, collisions, score/health)
//! - `settings`: Run configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 1024.0;
    pub const PLAY_HEIGHT: f32 = 768.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;

    /// Player shot: speed (units/s) and cooldown between shots (ms)
    pub const PLAYER_SHOT_SPEED: f32 = 300.0;
    pub const PLAYER_SHOT_COOLDOWN_MS: f64 = 150.0;
    /// Enemy shot speed (units/s, leftward)
    pub const ENEMY_SHOT_SPEED: f32 = -200.0;
    pub const PROJECTILE_WIDTH: f32 = 12.0;
    pub const PROJECTILE_HEIGHT: f32 = 6.0;

    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    /// Spawn y keeps this margin from the top and bottom edges
    pub const ENEMY_SPAWN_MARGIN: f32 = 25.0;
    pub const ENEMY_SPAWN_INTERVAL_MS: f64 = 1200.0;
    pub const SHOOTER_INTERVAL_MS: f64 = 2500.0;
    pub const ZIGZAG_AMPLITUDE: f32 = 30.0;
    pub const ZIGZAG_FREQUENCY: f32 = 0.02;

    /// Damage values
    pub const PLAYER_SHOT_DAMAGE: i32 = 25;
    pub const ENEMY_SHOT_DAMAGE: i32 = 10;
    pub const CONTACT_DAMAGE: i32 = 20;

    /// Explosion effects are disposed after this long (ms)
    pub const EXPLOSION_LIFETIME_MS: f64 = 500.0;
}

/// Convert a timestep in seconds to milliseconds of simulation time
#[inline]
pub fn secs_to_ms(dt: f32) -> f64 {
    dt as f64 * 1000.0
}

/// Half extents of a `width` x `height` sprite
#[inline]
pub fn half_size(width: f32, height: f32) -> Vec2 {
    Vec2::new(width * 0.5, height * 0.5)
}
