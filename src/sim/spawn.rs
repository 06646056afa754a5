//! Enemy spawning
//!
//! Runs from the repeating spawn timer. Each firing rolls a variant and a
//! height and appends one enemy at the right edge of the play area.

use glam::Vec2;
use rand::Rng;

use super::state::{EnemyVariant, EntityId, GameState};
use crate::consts::ENEMY_SPAWN_MARGIN;

/// Map a uniform roll in [0, 1) to a variant: 50% Basic, 25% Shooter, 25% ZigZag
pub fn choose_variant(roll: f64) -> EnemyVariant {
    if roll < 0.5 {
        EnemyVariant::Basic
    } else if roll < 0.75 {
        EnemyVariant::Shooter
    } else {
        EnemyVariant::ZigZag
    }
}

/// Spawn one random enemy. Does nothing once the run is over.
pub fn spawn_enemy(state: &mut GameState) -> Option<EntityId> {
    if state.is_over() {
        return None;
    }
    // Also false for a NaN height
    if !(state.height - ENEMY_SPAWN_MARGIN >= ENEMY_SPAWN_MARGIN) {
        log::warn!(
            "Play area height {} leaves no room to spawn enemies",
            state.height
        );
        return None;
    }

    let y = state
        .rng
        .random_range(ENEMY_SPAWN_MARGIN..=state.height - ENEMY_SPAWN_MARGIN);
    let variant = choose_variant(state.rng.random::<f64>());
    let pos = Vec2::new(state.width, y);
    let id = state.add_enemy(variant, pos);

    log::debug!("Spawned {:?} enemy {:?} at y={:.1}", variant, id, y);
    Some(id)
}
