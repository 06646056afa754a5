//! Collision resolution, health/score bookkeeping and game over
//!
//! Three checks run in a fixed order each tick:
//! 1. player shots vs enemies
//! 2. enemy shots vs player
//! 3. player vs enemies (contact)
//!
//! Each check takes the overlapping pairs for the lists as they stand when
//! the check starts, marks what gets consumed, and sweeps the lists before
//! the next check runs. Once the run ends, remaining pairs are ignored.

use super::collision::{Aabb, overlapping_pairs, overlapping_with};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// What one resolution pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub shot_hits: u32,
    pub enemies_killed: u32,
    pub player_hits: u32,
    pub contacts: u32,
    pub score_gained: u64,
    pub game_over: bool,
}

/// Run all three collision checks
pub fn resolve_collisions(state: &mut GameState) -> CombatReport {
    let mut report = CombatReport::default();
    if state.is_over() {
        return report;
    }

    resolve_shots_vs_enemies(state, &mut report);
    if !state.is_over() {
        resolve_shots_vs_player(state, &mut report);
    }
    if !state.is_over() {
        resolve_player_vs_enemies(state, &mut report);
    }
    report.game_over = state.is_over();
    report
}

/// Player shots hitting enemies. A shot is consumed by its first hit; an
/// enemy keeps taking hits from other shots until its health runs out.
pub fn resolve_shots_vs_enemies(state: &mut GameState, report: &mut CombatReport) {
    let shots: Vec<Aabb> = state.player_projectiles.iter().map(|p| p.aabb()).collect();
    let targets: Vec<Aabb> = state.enemies.iter().map(|e| e.aabb()).collect();
    let pairs = overlapping_pairs(&shots, &targets);
    if pairs.is_empty() {
        return;
    }

    let mut shot_used = vec![false; shots.len()];
    let mut enemy_dead = vec![false; targets.len()];

    for (si, ei) in pairs {
        if shot_used[si] || enemy_dead[ei] {
            continue;
        }
        shot_used[si] = true;
        report.shot_hits += 1;

        let enemy = &mut state.enemies[ei];
        enemy.health -= PLAYER_SHOT_DAMAGE;
        if enemy.health <= 0 {
            enemy_dead[ei] = true;
            let (pos, variant, id) = (enemy.pos, enemy.variant(), enemy.id);
            let value = variant.stats().score_value;
            award_score(state, value);
            report.score_gained += value;
            report.enemies_killed += 1;
            state.spawn_explosion(pos, variant.sprite_key());
            log::debug!("{:?} enemy {:?} destroyed (+{})", variant, id, value);
        }
    }

    sweep(&mut state.player_projectiles, &shot_used);
    sweep(&mut state.enemies, &enemy_dead);
}

/// Enemy shots hitting the player
pub fn resolve_shots_vs_player(state: &mut GameState, report: &mut CombatReport) {
    let shots: Vec<Aabb> = state.enemy_projectiles.iter().map(|p| p.aabb()).collect();
    let hits = overlapping_with(&state.player.aabb(), &shots);
    if hits.is_empty() {
        return;
    }

    let mut shot_used = vec![false; shots.len()];
    for si in hits {
        if state.is_over() {
            break;
        }
        shot_used[si] = true;
        report.player_hits += 1;
        damage_player(state, ENEMY_SHOT_DAMAGE);
    }

    sweep(&mut state.enemy_projectiles, &shot_used);
}

/// Enemies ramming the player. Contact destroys the enemy outright, whatever
/// its health, and awards no score.
pub fn resolve_player_vs_enemies(state: &mut GameState, report: &mut CombatReport) {
    let targets: Vec<Aabb> = state.enemies.iter().map(|e| e.aabb()).collect();
    let hits = overlapping_with(&state.player.aabb(), &targets);
    if hits.is_empty() {
        return;
    }

    let mut enemy_gone = vec![false; targets.len()];
    for ei in hits {
        if state.is_over() {
            break;
        }
        enemy_gone[ei] = true;
        report.contacts += 1;
        let (pos, variant) = (state.enemies[ei].pos, state.enemies[ei].variant());
        damage_player(state, CONTACT_DAMAGE);
        state.spawn_explosion(pos, variant.sprite_key());
    }

    sweep(&mut state.enemies, &enemy_gone);
}

/// Subtract health without clamping, then check for game over
pub fn damage_player(state: &mut GameState, amount: i32) {
    state.player.health -= amount;
    log::debug!("Player hit for {} (health {})", amount, state.player.health);
    if !state.player.is_alive() {
        game_over(state);
    }
}

/// Add to the score. Score never decreases.
pub fn award_score(state: &mut GameState, amount: u64) {
    state.score = state.score.saturating_add(amount);
}

/// End the run: stop spawning and hand the final score to the presentation
/// layer. Fires at most once per run.
pub fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::Over {
        return;
    }
    state.phase = GamePhase::Over;
    if let Some(timer) = state.spawn_timer.take() {
        state.scheduler.cancel(timer);
    }
    state.push_event(GameEvent::GameOver {
        final_score: state.score,
    });
    log::info!(
        "Game over at {:.0} ms: score={} health={}",
        state.time_ms,
        state.score,
        state.player.health
    );
}

/// Drop every item whose flag is set, in one pass
fn sweep<T>(list: &mut Vec<T>, remove: &[bool]) {
    let mut flags = remove.iter();
    list.retain(|_| !flags.next().copied().unwrap_or(false));
}
