//! Idle/demo mode - an AI that plays the game
//!
//! Pure function of the session, so a seeded run driven by the autopilot is
//! as reproducible as one driven by recorded input.

use glam::Vec2;

use super::state::GameSession;
use super::tick::{Steer, TickInput};
use crate::consts::*;

/// Horizontal margin around the ship treated as the danger lane
const DANGER_MARGIN: f32 = 24.0;
/// Enemies closer than this (vertically) to the ship are dodged
const DANGER_RANGE: f32 = 180.0;
/// Only chase bonuses that have fallen this far
const BONUS_CHASE_Y: f32 = 450.0;

/// Decide this tick's input from the current session
pub fn autopilot_input(state: &GameSession) -> TickInput {
    let ship = state.player.rect();
    let ship_center = ship.center();
    let cruise_y = FIELD_HEIGHT - PLAYER_SIZE;

    // Dodge the nearest enemy bearing down on the ship
    let threat = state
        .enemies
        .iter()
        .filter(|e| {
            let r = e.rect();
            r.right() + DANGER_MARGIN > ship.left()
                && r.left() - DANGER_MARGIN < ship.right()
                && r.bottom() < ship.bottom()
                && ship.top() - r.bottom() < DANGER_RANGE
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target = if let Some(enemy) = threat {
        let enemy_x = enemy.rect().center().x;
        let away = if enemy_x >= ship_center.x { -1.0 } else { 1.0 };
        // Pinned against a wall: go the other way
        let away = if (away < 0.0 && ship.left() <= 0.0)
            || (away > 0.0 && ship.right() >= FIELD_WIDTH)
        {
            -away
        } else {
            away
        };
        Vec2::new(ship_center.x + away * FIELD_WIDTH, cruise_y)
    } else if let Some(bonus) = state
        .bonuses
        .iter()
        .filter(|b| b.pos.y > BONUS_CHASE_Y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        bonus.rect().center()
    } else if let Some(enemy) = state
        .enemies
        .iter()
        .filter(|e| e.rect().bottom() < ship.top())
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        // Lead the target a little, with a slow sway to avoid perfect loops
        let time_factor = state.time_ticks as f32 * 0.05;
        let sway = time_factor.sin() * 12.0;
        Vec2::new(enemy.rect().center().x + sway, cruise_y)
    } else {
        Vec2::new(FIELD_WIDTH / 2.0, cruise_y)
    };

    TickInput {
        steer: Steer::Toward(target),
        fire: !state.enemies.is_empty(),
        cycle_fire_mode: false,
    }
}
