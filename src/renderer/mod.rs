//! Renderer boundary
//!
//! The simulation never draws. Each frame a front-end receives a read-only
//! `Snapshot` of the game plus the visual-only particles and turns them into
//! pixels (or, for the headless runner, text).

pub mod hud;
pub mod particles;

pub use hud::HudRenderer;
pub use particles::{Particle, ParticleSystem};

use serde::Serialize;

use crate::game::{Game, GamePhase};
use crate::sim::{Bonus, Enemy, FireMode, Player, Projectile};

/// Anything that can present a frame
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>, particles: &[Particle]);
}

/// Read-only view of one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    /// `None` on the menu
    pub player: Option<&'a Player>,
    pub enemies: &'a [Enemy],
    pub bonuses: &'a [Bonus],
    pub projectiles: &'a [Projectile],
    pub score: u64,
    pub high_score: u64,
    pub wave: u32,
    pub tier: u32,
    pub health: u8,
    pub max_health: u8,
    pub combo: u32,
    pub fire_mode: FireMode,
    pub shielded: bool,
}

impl<'a> Snapshot<'a> {
    pub fn capture(game: &'a Game) -> Self {
        let phase = game.phase();
        match game.session() {
            Some(session) => Snapshot {
                phase,
                player: Some(&session.player),
                enemies: &session.enemies,
                bonuses: &session.bonuses,
                projectiles: &session.player.projectiles,
                score: session.score,
                high_score: session.best_score().max(game.high_score()),
                wave: session.wave,
                tier: session.tier(),
                health: session.player.health,
                max_health: session.player.max_health,
                combo: session.combo,
                fire_mode: session.player.fire_mode,
                shielded: session.player.has_shield,
            },
            None => Snapshot {
                phase,
                player: None,
                enemies: &[],
                bonuses: &[],
                projectiles: &[],
                score: 0,
                high_score: game.high_score(),
                wave: 0,
                tier: 0,
                health: 0,
                max_health: 0,
                combo: 0,
                fire_mode: FireMode::Normal,
                shielded: false,
            },
        }
    }
}
