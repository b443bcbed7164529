//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod combat;
pub mod entities;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::Rect;
pub use entities::{
    Bonus, BonusKind, Enemy, EnemyKind, EnemyStats, FireMode, HitOutcome, Player, Projectile,
};
pub use spawner::WeightTable;
pub use state::{GameEvent, GameSession, RngState};
pub use tick::{Steer, TickInput, tick};
