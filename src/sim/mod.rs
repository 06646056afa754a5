//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Fixed timestep driven from outside
//! - Seeded RNG only
//! - Timers serviced inside the tick, never from callbacks

pub mod collision;
pub mod combat;
pub mod scheduler;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlapping_pairs, overlapping_with};
pub use combat::{CombatReport, award_score, damage_player, game_over, resolve_collisions};
pub use scheduler::{Scheduler, TimerAction, TimerId};
pub use spawn::{choose_variant, spawn_enemy};
pub use state::{
    Enemy, EnemyKind, EnemyVariant, EntityId, Explosion, Faction, GameEvent, GamePhase,
    GameState, HudSnapshot, Player, Projectile, VariantStats,
};
pub use tick::{
    TickInput, reap_out_of_bounds, run_timers, tick, try_shoot, update_enemy_behavior,
    update_movement, zigzag_y,
};
