//! Text HUD renderer
//!
//! Stands in for a graphical front-end: writes one status line per phase
//! change and every `every` frames while playing.

use std::io::Write;

use super::{Particle, Renderer, Snapshot};
use crate::game::GamePhase;

/// Status line for a snapshot
pub fn hud_line(snapshot: &Snapshot<'_>) -> String {
    match snapshot.phase {
        GamePhase::Menu => format!("NEON DEFENDER  High: {}  [fire] to start", snapshot.high_score),
        GamePhase::Playing => play_line(snapshot),
        GamePhase::Paused => format!("PAUSED  {}", play_line(snapshot)),
        GamePhase::GameOver => format!(
            "GAME OVER  Score: {}  High: {}  Wave: {}",
            snapshot.score, snapshot.high_score, snapshot.wave
        ),
    }
}

fn play_line(snapshot: &Snapshot<'_>) -> String {
    format!(
        "Score: {}  High: {}  Wave: {} (L{})  Combo: {}x  HP: {}/{}  Mode: {}{}  Enemies: {}",
        snapshot.score,
        snapshot.high_score,
        snapshot.wave,
        snapshot.tier,
        snapshot.combo,
        snapshot.health,
        snapshot.max_health,
        snapshot.fire_mode.as_str(),
        if snapshot.shielded { " +SHIELD" } else { "" },
        snapshot.enemies.len(),
    )
}

pub struct HudRenderer<W: Write> {
    out: W,
    /// Frames between status lines while playing (0 = phase changes only)
    every: u64,
    frame: u64,
    last_phase: Option<GamePhase>,
}

impl<W: Write> HudRenderer<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every,
            frame: 0,
            last_phase: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for HudRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot<'_>, particles: &[Particle]) {
        self.frame += 1;
        let phase_changed = self.last_phase != Some(snapshot.phase);
        self.last_phase = Some(snapshot.phase);

        let periodic = snapshot.phase == GamePhase::Playing
            && self.every > 0
            && self.frame % self.every == 0;
        if !phase_changed && !periodic {
            return;
        }

        let mut line = hud_line(snapshot);
        if !particles.is_empty() {
            line.push_str(&format!("  FX: {}", particles.len()));
        }
        if let Err(err) = writeln!(self.out, "{}", line) {
            log::warn!("HUD write failed: {}", err);
        }
    }
}
