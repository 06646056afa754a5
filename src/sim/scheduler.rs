//! Timer queue serviced once per tick
//!
//! Replaces engine callbacks (spawn interval, shoot cooldown, explosion
//! disposal) with plain data: entries sorted by (fire time, insertion order).
//! Actions are returned to the caller, which applies them to the game state.

use super::state::EntityId;

/// Handle returned when scheduling, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Spawn one enemy at the right edge
    SpawnEnemy,
    /// Player may shoot again
    ShootReady,
    /// Dispose an explosion effect
    ExpireExplosion(EntityId),
}

#[derive(Debug, Clone)]
struct TimerEntry {
    id: TimerId,
    fire_at_ms: f64,
    /// Set for repeating timers
    interval_ms: Option<f64>,
    action: TimerAction,
}

/// Pending timers ordered by fire time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Sorted ascending by fire time; ties keep insertion order
    entries: Vec<TimerEntry>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `action` once at `fire_at_ms`
    pub fn schedule_once(&mut self, fire_at_ms: f64, action: TimerAction) -> TimerId {
        self.insert(fire_at_ms, None, action)
    }

    /// Fire `action` every `interval_ms`, first at `start_ms + interval_ms`
    pub fn schedule_repeating(
        &mut self,
        start_ms: f64,
        interval_ms: f64,
        action: TimerAction,
    ) -> TimerId {
        self.insert(start_ms + interval_ms, Some(interval_ms), action)
    }

    /// Remove a pending timer. Returns false if it already fired (one-shot)
    /// or was cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire time of the earliest pending timer
    pub fn next_fire_ms(&self) -> Option<f64> {
        self.entries.first().map(|e| e.fire_at_ms)
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// Repeating timers are re-queued one interval after their scheduled
    /// time, so a long frame fires them once per elapsed interval.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TimerId, TimerAction)> {
        if self.entries.first()?.fire_at_ms > now_ms {
            return None;
        }
        let entry = self.entries.remove(0);
        if let Some(interval) = entry.interval_ms {
            let next_at = entry.fire_at_ms + interval;
            self.insert_entry(TimerEntry {
                fire_at_ms: next_at,
                ..entry.clone()
            });
        }
        Some((entry.id, entry.action))
    }

    fn insert(
        &mut self,
        fire_at_ms: f64,
        interval_ms: Option<f64>,
        action: TimerAction,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.insert_entry(TimerEntry {
            id,
            fire_at_ms,
            interval_ms,
            action,
        });
        id
    }

    fn insert_entry(&mut self, entry: TimerEntry) {
        // After any equal fire times so same-time timers run in insertion order
        let pos = self
            .entries
            .partition_point(|e| e.fire_at_ms <= entry.fire_at_ms);
        self.entries.insert(pos, entry);
    }
}
