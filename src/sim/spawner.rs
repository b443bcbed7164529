//! Enemy and bonus spawning
//!
//! Decides when something appears and what it is. All randomness comes from
//! the session RNG so a seed fully determines the spawn sequence.

use glam::Vec2;
use rand::Rng;

use super::entities::{Bonus, BonusKind, Enemy, EnemyKind};
use super::state::{GameEvent, GameSession};
use crate::consts::*;
use crate::tuning::Tuning;

/// Discrete distribution over a fixed set of outcomes
#[derive(Debug, Clone)]
pub struct WeightTable<T> {
    entries: Vec<(T, u32)>,
    /// Summed wide so any set of `u32` weights fits
    total: u64,
}

impl<T: Copy> WeightTable<T> {
    /// Pair each item with its weight; extra items or weights are ignored
    pub fn new(items: &[T], weights: &[u32]) -> Self {
        let entries: Vec<(T, u32)> = items.iter().copied().zip(weights.iter().copied()).collect();
        let total = entries.iter().map(|(_, w)| u64::from(*w)).sum();
        Self { entries, total }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Draw one item. `None` only when every weight is zero.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        if self.total == 0 {
            return None;
        }
        let mut roll = rng.random_range(0..self.total);
        for &(item, weight) in &self.entries {
            let weight = u64::from(weight);
            if roll < weight {
                return Some(item);
            }
            roll -= weight;
        }
        None
    }
}

/// Regular-enemy distribution for a wave
pub fn enemy_table(tuning: &Tuning, wave: u32) -> WeightTable<EnemyKind> {
    let weights = if wave < tuning.late_wave {
        &tuning.early_weights
    } else {
        &tuning.late_weights
    };
    WeightTable::new(&EnemyKind::REGULAR, weights)
}

/// Advance the spawn timer and create whatever is due
pub fn update_spawns(state: &mut GameSession, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer <= state.spawn_delay {
        return;
    }

    spawn_regular(state);
    state.spawn_timer = 0.0;

    try_spawn_boss(state);
}

/// Spawn one weighted-random regular enemy above the field
pub fn spawn_regular(state: &mut GameSession) -> u32 {
    let kind = enemy_table(&state.tuning, state.wave)
        .sample(&mut state.rng)
        .unwrap_or(EnemyKind::Normal);
    let x = state.rng.random_range(0..=ENEMY_SPAWN_MAX_X) as f32;

    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, kind, state.wave, Vec2::new(x, ENEMY_SPAWN_Y)));
    state.emit(GameEvent::EnemySpawned { id, kind });
    log::debug!("Spawned {:?} #{} at x={} (wave {})", kind, id, x, state.wave);
    id
}

/// Spawn the wave boss if this is a boss wave and none is alive
pub fn try_spawn_boss(state: &mut GameSession) -> Option<u32> {
    if !state.tuning.is_boss_wave(state.wave) || state.boss_alive() {
        return None;
    }

    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(
        id,
        EnemyKind::Boss,
        state.wave,
        Vec2::new(BOSS_SPAWN_X, BOSS_SPAWN_Y),
    ));
    state.emit(GameEvent::BossSpawned { id });
    log::info!("Boss #{} enters on wave {}", id, state.wave);
    Some(id)
}

/// Roll the drop chance for a kill at `pos`
pub fn roll_bonus_drop(state: &mut GameSession, pos: Vec2) -> Option<u32> {
    let chance = state.tuning.bonus_drop_chance.clamp(0.0, 1.0);
    if !state.rng.random_bool(chance) {
        return None;
    }

    let kind = BonusKind::ALL[state.rng.random_range(0..BonusKind::ALL.len())];
    let id = state.next_entity_id();
    state.bonuses.push(Bonus::new(id, kind, pos));
    state.emit(GameEvent::BonusDropped { id, kind });
    Some(id)
}
