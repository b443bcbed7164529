//! Neon Defender - A vertical arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, combat, waves)
//! - `game`: Menu / Playing / Paused / GameOver state machine
//! - `renderer`: Renderer boundary (snapshot, particles, text HUD)
//! - `platform`: Input adapters and fixed-step clock
//! - `persistence`: JSON save/load with atomic replace
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Command, Game, GamePhase};
pub use highscores::HighScoreStore;
pub use settings::{InputScheme, QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (logical units, y grows downward)
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 800.0;
    /// Band at the top of the field reserved for the HUD
    pub const HUD_BAND_HEIGHT: f32 = 50.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 300.0;
    pub const PLAYER_START_Y: f32 = 700.0;
    /// Highest point the ship can reach (top edge)
    pub const PLAYER_MIN_Y: f32 = 550.0;
    /// Pointer distance under which the ship does not move on that axis
    pub const PLAYER_DEAD_ZONE: f32 = 5.0;
    pub const PLAYER_START_HEALTH: u8 = 3;
    pub const PLAYER_MAX_HEALTH: u8 = 5;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    pub const LASER_WIDTH: f32 = 12.0;
    pub const PROJECTILE_SPEED: f32 = 600.0;
    pub const LASER_SPEED: f32 = 800.0;

    /// Enemies
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    pub const ENEMY_SPAWN_MAX_X: i32 = 570;
    pub const BOSS_SPAWN_X: f32 = 260.0;
    pub const BOSS_SPAWN_Y: f32 = 100.0;

    /// Bonuses
    pub const BONUS_SIZE: f32 = 20.0;
    pub const BONUS_FALL_SPEED: f32 = 150.0;
}
