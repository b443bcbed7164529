//! Session state and core simulation types
//!
//! One `GameSession` is one run from "start" to "game over". It owns every
//! entity collection; restarting throws the whole session away.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Bonus, BonusKind, Enemy, EnemyKind, FireMode, Player};
use crate::tuning::Tuning;

/// Something the front-end may want to react to (effects, logs, sounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An enemy blew up (shot down or rammed the ship); centre of the blast
    Explosion { pos: Vec2 },
    EnemySpawned { id: u32, kind: EnemyKind },
    BossSpawned { id: u32 },
    EnemyKilled { id: u32, kind: EnemyKind, points: u64 },
    EnemyEscaped { id: u32 },
    PlayerHit { health: u8 },
    ShieldAbsorbed,
    BonusDropped { id: u32, kind: BonusKind },
    BonusCollected { kind: BonusKind },
    FireModeChanged { mode: FireMode },
    WaveAdvanced { wave: u32 },
    PlayerDied,
}

/// RNG seed record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub rng_state: RngState,
    /// Gameplay RNG; visual effects never draw from it
    pub rng: Pcg32,
    /// Balance constants for this run
    pub tuning: Tuning,
    pub player: Player,
    /// Active enemies, in spawn order
    pub enemies: Vec<Enemy>,
    /// Falling bonuses, in drop order
    pub bonuses: Vec<Bonus>,
    pub score: u64,
    /// Best score on record when the session began
    pub high_score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    pub combo: u32,
    /// Seconds left before the combo lapses
    pub combo_timer: f32,
    pub kills_in_wave: u32,
    pub total_kills: u32,
    /// Seconds since the last regular spawn
    pub spawn_timer: f32,
    /// Seconds between regular spawns
    pub spawn_delay: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once the player's health reaches zero
    pub game_over: bool,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameSession {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            rng_state,
            rng: rng_state.to_rng(),
            player: Player::new(&tuning),
            enemies: Vec::new(),
            bonuses: Vec::new(),
            score: 0,
            high_score: 0,
            wave: 1,
            combo: 0,
            combo_timer: 0.0,
            kills_in_wave: 0,
            total_kills: 0,
            spawn_timer: 0.0,
            spawn_delay: tuning.spawn_delay_initial,
            time_ticks: 0,
            game_over: false,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn boss_alive(&self) -> bool {
        self.enemies.iter().any(Enemy::is_boss)
    }

    /// Subtract points, never going below zero
    pub fn penalize(&mut self, points: u64) {
        self.score = self.score.saturating_sub(points);
    }

    /// Best score seen, including the one in progress
    pub fn best_score(&self) -> u64 {
        self.high_score.max(self.score)
    }

    /// Difficulty tier shown on the HUD
    pub fn tier(&self) -> u32 {
        match self.wave {
            w if w >= 10 => 3,
            w if w >= 5 => 2,
            _ => 1,
        }
    }
}
