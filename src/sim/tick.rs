//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use glam::Vec2;

use super::combat;
use super::progression;
use super::spawner;
use super::state::{GameEvent, GameSession};

/// How the ship should move this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Steer {
    #[default]
    Hold,
    /// Step toward a field position (touch/mouse)
    Toward(Vec2),
    /// Step sideways: negative left, positive right (keyboard)
    Axis(f32),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub steer: Steer,
    /// Fire if the weapon is ready
    pub fire: bool,
    /// Switch to the next fire mode
    pub cycle_fire_mode: bool,
}

/// Advance the session by one fixed timestep.
///
/// Order: input, player timers and shots, spawns, entity movement, boundary
/// culling, combat passes, combo decay, wave check. A finished session is left
/// untouched.
pub fn tick(state: &mut GameSession, input: &TickInput, dt: f32) {
    if state.game_over {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;

    match input.steer {
        Steer::Hold => {}
        Steer::Toward(target) => state.player.move_toward(target),
        Steer::Axis(direction) => state.player.nudge(direction),
    }
    state.player.advance(dt);

    if input.cycle_fire_mode {
        state.player.cycle_fire_mode();
        let mode = state.player.fire_mode;
        state.emit(GameEvent::FireModeChanged { mode });
    }
    if input.fire {
        state.player.shoot();
    }

    spawner::update_spawns(state, dt);

    for enemy in &mut state.enemies {
        enemy.advance(dt);
    }
    for bonus in &mut state.bonuses {
        bonus.advance(dt);
    }

    combat::cull_escaped(state);
    combat::resolve(state);

    progression::decay_combo(state, dt);
    progression::check_wave_advance(state);
}
