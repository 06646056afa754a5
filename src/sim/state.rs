//! Game state and core simulation types
//!
//! The registry owns the player, both projectile lists, the enemy list and
//! live explosion effects. All mutation goes through one `&mut GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::scheduler::{Scheduler, TimerAction, TimerId};
use crate::Settings;
use crate::consts::*;

/// Stable identity of an entity within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Terminal; ticks are no-ops
    Over,
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// May go negative on the tick that ends the run
    pub health: i32,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            health: PLAYER_MAX_HEALTH,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Muzzle position at the ship's right edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + PLAYER_WIDTH / 2.0, self.pos.y)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health bar fill, unclamped (negative once dead)
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / PLAYER_MAX_HEALTH as f32
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// A shot travelling horizontally at constant speed
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    /// Only x is ever non-zero; the sign is the direction
    pub vel: Vec2,
    pub faction: Faction,
}

impl Projectile {
    pub fn player_shot(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(PLAYER_SHOT_SPEED, 0.0),
            faction: Faction::Player,
        }
    }

    pub fn enemy_shot(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(ENEMY_SHOT_SPEED, 0.0),
            faction: Faction::Enemy,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.pos, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }

    pub fn sprite_key(&self) -> &'static str {
        match self.faction {
            Faction::Player => "projectile",
            Faction::Enemy => "enemy_projectile",
        }
    }
}

/// Enemy variant tag used for the base stats lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    Basic,
    Shooter,
    ZigZag,
}

/// Base stats shared by every enemy of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStats {
    pub max_health: i32,
    /// Horizontal speed in units/s (negative = leftward)
    pub speed: i32,
    pub score_value: u64,
}

const VARIANT_STATS: [(EnemyVariant, VariantStats); 3] = [
    (
        EnemyVariant::Basic,
        VariantStats {
            max_health: 50,
            speed: -100,
            score_value: 10,
        },
    ),
    (
        EnemyVariant::Shooter,
        VariantStats {
            max_health: 75,
            speed: -75,
            score_value: 20,
        },
    ),
    (
        EnemyVariant::ZigZag,
        VariantStats {
            max_health: 100,
            speed: -90,
            score_value: 30,
        },
    ),
];

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [Self::Basic, Self::Shooter, Self::ZigZag];

    pub fn stats(self) -> VariantStats {
        VARIANT_STATS[self as usize].1
    }

    pub fn sprite_key(self) -> &'static str {
        match self {
            Self::Basic => "enemy_basic",
            Self::Shooter => "enemy_shooter",
            Self::ZigZag => "enemy_zigzag",
        }
    }
}

/// Per-variant state; each variant carries only the fields it uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyKind {
    Basic,
    Shooter {
        /// Simulation time (ms) of the last shot; 0 for a fresh shooter
        last_shot_ms: f64,
        can_shoot: bool,
    },
    ZigZag {
        initial_y: f32,
        amplitude: f32,
        frequency: f32,
    },
}

impl EnemyKind {
    /// Fresh variant state for an enemy spawned at height `y`
    pub fn new(variant: EnemyVariant, y: f32) -> Self {
        match variant {
            EnemyVariant::Basic => Self::Basic,
            EnemyVariant::Shooter => Self::Shooter {
                last_shot_ms: 0.0,
                can_shoot: true,
            },
            EnemyVariant::ZigZag => Self::ZigZag {
                initial_y: y,
                amplitude: ZIGZAG_AMPLITUDE,
                frequency: ZIGZAG_FREQUENCY,
            },
        }
    }

    pub fn variant(&self) -> EnemyVariant {
        match self {
            Self::Basic => EnemyVariant::Basic,
            Self::Shooter { .. } => EnemyVariant::Shooter,
            Self::ZigZag { .. } => EnemyVariant::ZigZag,
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: i32,
}

impl Enemy {
    /// New enemy with the variant's full health, moving at its speed
    pub fn new(id: EntityId, variant: EnemyVariant, pos: Vec2) -> Self {
        let stats = variant.stats();
        Self {
            id,
            kind: EnemyKind::new(variant, pos.y),
            pos,
            vel: Vec2::new(stats.speed as f32, 0.0),
            health: stats.max_health,
        }
    }

    pub fn variant(&self) -> EnemyVariant {
        self.kind.variant()
    }

    pub fn stats(&self) -> VariantStats {
        self.variant().stats()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.pos, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    /// Muzzle position at the ship's left edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x - ENEMY_WIDTH / 2.0, self.pos.y)
    }

    /// Health bar fill relative to the variant's max health
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.stats().max_health as f32
    }
}

/// A short-lived on-death explosion effect
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub id: EntityId,
    pub pos: Vec2,
    pub sprite_key: &'static str,
}

/// Events for the presentation layer, drained after each tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Explosion {
        pos: Vec2,
        sprite_key: &'static str,
    },
    GameOver { final_score: u64 },
}

/// Values for on-screen display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub score_text: String,
    pub health: i32,
    pub health_fraction: f32,
    pub phase: GamePhase,
    pub time_ms: f64,
    pub enemies: usize,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Play area size
    pub width: f32,
    pub height: f32,
    /// Simulation clock in milliseconds
    pub time_ms: f64,
    pub phase: GamePhase,
    /// Only ever increases
    pub score: u64,
    pub player: Player,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    /// Player shoot cooldown flag
    pub can_shoot: bool,
    pub scheduler: Scheduler,
    /// Repeating spawn timer, cleared when cancelled at game over
    pub spawn_timer: Option<TimerId>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Set up a run: player at the left edge, spawn timer armed
    pub fn new(settings: &Settings) -> Self {
        if let Err(e) = settings.validate() {
            log::warn!("Starting with unvalidated settings: {}", e);
        }
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width: settings.width,
            height: settings.height,
            time_ms: 0.0,
            phase: GamePhase::Running,
            score: 0,
            player: Player::new(EntityId(0), Vec2::new(PLAYER_START_X, settings.height / 2.0)),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            can_shoot: true,
            scheduler: Scheduler::new(),
            spawn_timer: None,
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_timer = Some(state.scheduler.schedule_repeating(
            0.0,
            ENEMY_SPAWN_INTERVAL_MS,
            TimerAction::SpawnEnemy,
        ));
        log::info!(
            "Run started: seed={} area={}x{}",
            seed,
            settings.width,
            settings.height
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Insert an enemy, returning its id
    pub fn add_enemy(&mut self, variant: EnemyVariant, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, variant, pos));
        id
    }

    pub fn add_player_projectile(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.player_projectiles.push(Projectile::player_shot(id, pos));
        id
    }

    pub fn add_enemy_projectile(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.enemy_projectiles.push(Projectile::enemy_shot(id, pos));
        id
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Remove an enemy by id; false if it was already gone
    pub fn remove_enemy(&mut self, id: EntityId) -> bool {
        remove_by_id(&mut self.enemies, id, |e| e.id)
    }

    pub fn remove_player_projectile(&mut self, id: EntityId) -> bool {
        remove_by_id(&mut self.player_projectiles, id, |p| p.id)
    }

    pub fn remove_enemy_projectile(&mut self, id: EntityId) -> bool {
        remove_by_id(&mut self.enemy_projectiles, id, |p| p.id)
    }

    /// Add an explosion effect and schedule its disposal
    pub fn spawn_explosion(&mut self, pos: Vec2, sprite_key: &'static str) -> EntityId {
        let id = self.next_entity_id();
        self.explosions.push(Explosion { id, pos, sprite_key });
        self.scheduler.schedule_once(
            self.time_ms + EXPLOSION_LIFETIME_MS,
            TimerAction::ExpireExplosion(id),
        );
        self.events.push(GameEvent::Explosion { pos, sprite_key });
        id
    }

    pub fn remove_explosion(&mut self, id: EntityId) -> bool {
        remove_by_id(&mut self.explosions, id, |x| x.id)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            score_text: self.score_text(),
            health: self.player.health,
            health_fraction: self.player.health_fraction(),
            phase: self.phase,
            time_ms: self.time_ms,
            enemies: self.enemies.len(),
        }
    }
}

fn remove_by_id<T>(list: &mut Vec<T>, id: EntityId, id_of: impl Fn(&T) -> EntityId) -> bool {
    let before = list.len();
    list.retain(|item| id_of(item) != id);
    list.len() != before
}
