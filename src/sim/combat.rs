//! Collision and combat resolution
//!
//! Runs after everything has moved. The pass order is fixed and part of the
//! game's determinism:
//! 1. enemies ramming the player
//! 2. projectiles hitting the surviving enemies
//! 3. the player collecting bonuses
//!
//! Removals are marked during a pass and compacted afterward, so indices stay
//! stable while a pass walks its collection.

use rand::Rng;

use super::entities::{BonusKind, FireMode, HitOutcome};
use super::spawner::roll_bonus_drop;
use super::state::{GameEvent, GameSession};

/// Health restored by a health bonus
const HEAL_AMOUNT: u8 = 1;

/// Drop enemies and bonuses that fell past the bottom edge.
///
/// Each escaped enemy costs the miss penalty and breaks the combo.
pub fn cull_escaped(state: &mut GameSession) {
    let escaped: Vec<u32> = state
        .enemies
        .iter()
        .filter(|e| e.is_below_field())
        .map(|e| e.id)
        .collect();

    if !escaped.is_empty() {
        state.enemies.retain(|e| !e.is_below_field());
        for id in escaped {
            state.penalize(state.tuning.miss_penalty);
            state.combo = 0;
            state.emit(GameEvent::EnemyEscaped { id });
        }
    }

    state.bonuses.retain(|b| !b.is_below_field());
}

/// Pass 1: enemies that touch the ship explode and hurt it
pub fn resolve_player_collisions(state: &mut GameSession) {
    let player_box = state.player.rect();
    let mut rammed = vec![false; state.enemies.len()];

    for i in 0..state.enemies.len() {
        let enemy_box = state.enemies[i].rect();
        if !enemy_box.overlaps(&player_box) {
            continue;
        }
        rammed[i] = true;
        state.emit(GameEvent::Explosion {
            pos: enemy_box.center(),
        });

        match state.player.take_damage() {
            HitOutcome::Shielded => state.emit(GameEvent::ShieldAbsorbed),
            HitOutcome::Damaged => {
                let health = state.player.health;
                state.emit(GameEvent::PlayerHit { health });
            }
            HitOutcome::Invincible => {}
        }

        if !state.player.is_alive() && !state.game_over {
            state.game_over = true;
            state.emit(GameEvent::PlayerDied);
            log::info!("Player destroyed on wave {} with {} points", state.wave, state.score);
        }
    }

    let mut flags = rammed.into_iter();
    state.enemies.retain(|_| !flags.next().unwrap_or(false));
}

/// Pass 2: each enemy takes at most one projectile per tick
pub fn resolve_projectile_hits(state: &mut GameSession) {
    let mut spent = vec![false; state.player.projectiles.len()];
    let mut killed = vec![false; state.enemies.len()];

    for i in 0..state.enemies.len() {
        let enemy_box = state.enemies[i].rect();
        let hit = state
            .player
            .projectiles
            .iter()
            .enumerate()
            .find(|(j, shot)| !spent[*j] && shot.rect().overlaps(&enemy_box))
            .map(|(j, _)| j);

        let Some(j) = hit else {
            continue;
        };
        spent[j] = true;

        if state.enemies[i].take_damage() {
            killed[i] = true;
            award_kill(state, i);
        }
    }

    let mut shots = spent.into_iter();
    state
        .player
        .projectiles
        .retain(|_| !shots.next().unwrap_or(false));
    let mut dead = killed.into_iter();
    state.enemies.retain(|_| !dead.next().unwrap_or(false));
}

/// Score, combo, effects and bonus roll for the enemy at `index`
fn award_kill(state: &mut GameSession, index: usize) {
    let enemy = &state.enemies[index];
    let (id, kind, drop_pos) = (enemy.id, enemy.kind, enemy.pos);
    let center = enemy.rect().center();
    let points = enemy.score_value + state.combo as u64 * state.tuning.combo_multiplier;

    state.score += points;
    state.kills_in_wave += 1;
    state.total_kills += 1;
    state.combo += 1;
    state.combo_timer = state.tuning.combo_window;

    state.emit(GameEvent::EnemyKilled { id, kind, points });
    state.emit(GameEvent::Explosion { pos: center });
    log::debug!("Killed {:?} #{} for {} (combo {})", kind, id, points, state.combo);

    roll_bonus_drop(state, drop_pos);
}

/// Pass 3: the ship picks up any bonus it touches
pub fn resolve_bonus_pickups(state: &mut GameSession) {
    let player_box = state.player.rect();
    let mut taken = vec![false; state.bonuses.len()];

    for i in 0..state.bonuses.len() {
        if !state.bonuses[i].rect().overlaps(&player_box) {
            continue;
        }
        taken[i] = true;
        let kind = state.bonuses[i].kind;
        apply_bonus(state, kind);
        state.emit(GameEvent::BonusCollected { kind });
    }

    let mut flags = taken.into_iter();
    state.bonuses.retain(|_| !flags.next().unwrap_or(false));
}

/// Apply a bonus effect to the player
pub fn apply_bonus(state: &mut GameSession, kind: BonusKind) {
    match kind {
        BonusKind::Health => state.player.heal(HEAL_AMOUNT),
        BonusKind::Shield => {
            let duration = state.tuning.shield_duration;
            state.player.raise_shield(duration);
        }
        BonusKind::FireModeChange => {
            let mode = FireMode::ALL[state.rng.random_range(0..FireMode::ALL.len())];
            state.player.fire_mode = mode;
            state.emit(GameEvent::FireModeChanged { mode });
        }
    }
}

/// All three passes in order
pub fn resolve(state: &mut GameSession) {
    resolve_player_collisions(state);
    resolve_projectile_hits(state);
    resolve_bonus_pickups(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Bonus, Enemy, EnemyKind, Projectile};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_session() -> GameSession {
        GameSession::with_tuning(
            42,
            Tuning {
                bonus_drop_chance: 0.0,
                ..Default::default()
            },
        )
    }

    fn add_enemy(state: &mut GameSession, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, kind, state.wave, pos));
        id
    }

    /// A shot placed inside the enemy's box
    fn shot_at(pos: Vec2) -> Projectile {
        Projectile::new(pos.x + 2.0, pos.y + 2.0, 0.0, -600.0)
    }

    #[test]
    fn test_escaped_enemy_penalty() {
        let mut state = quiet_session();
        state.score = 12;
        state.combo = 4;
        add_enemy(&mut state, EnemyKind::Normal, Vec2::new(100.0, 801.0));
        add_enemy(&mut state, EnemyKind::Normal, Vec2::new(100.0, 400.0));

        cull_escaped(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, 7);
        assert_eq!(state.combo, 0);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::EnemyEscaped { .. })));
    }

    #[test]
    fn test_escape_penalty_floors_at_zero() {
        let mut state = quiet_session();
        state.score = 3;
        add_enemy(&mut state, EnemyKind::Fast, Vec2::new(0.0, 900.0));
        cull_escaped(&mut state);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_missed_bonus_costs_nothing() {
        let mut state = quiet_session();
        state.score = 40;
        state.combo = 3;
        state.combo_timer = 1.5;
        let id = state.next_entity_id();
        state
            .bonuses
            .push(Bonus::new(id, BonusKind::Shield, Vec2::new(100.0, 801.0)));
        let id = state.next_entity_id();
        state
            .bonuses
            .push(Bonus::new(id, BonusKind::Health, Vec2::new(100.0, 700.0)));

        cull_escaped(&mut state);
        assert_eq!(state.bonuses.len(), 1);
        assert_eq!(state.bonuses[0].id, id);
        assert_eq!(state.score, 40);
        assert_eq!(state.combo, 3);
        assert_eq!(state.combo_timer, 1.5);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_ram_hurts_and_removes() {
        let mut state = quiet_session();
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Normal, pos);

        resolve_player_collisions(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, 2);
        assert_eq!(state.score, 0);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::Explosion { .. })));
        assert!(!state.game_over);
    }

    #[test]
    fn test_ram_with_shield() {
        let mut state = quiet_session();
        state.player.raise_shield(5.0);
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Tank, pos);

        resolve_player_collisions(&mut state);
        assert_eq!(state.player.health, 3);
        assert!(!state.player.has_shield);
        assert!(state.events.contains(&GameEvent::ShieldAbsorbed));
    }

    #[test]
    fn test_last_hit_ends_game_once() {
        let mut state = quiet_session();
        state.player.health = 1;
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Normal, pos);
        add_enemy(&mut state, EnemyKind::Mini, pos);

        resolve_player_collisions(&mut state);
        assert!(state.game_over);
        assert_eq!(state.player.health, 0);
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::PlayerDied).count(),
            1
        );
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_kill_scores_with_combo() {
        let mut state = quiet_session();
        state.combo = 3;
        let pos = Vec2::new(100.0, 100.0);
        add_enemy(&mut state, EnemyKind::Normal, pos);
        state.player.projectiles.push(shot_at(pos));

        resolve_projectile_hits(&mut state);
        // 13 + 3 * 2
        assert_eq!(state.score, 19);
        assert_eq!(state.combo, 4);
        assert_eq!(state.kills_in_wave, 1);
        assert_eq!(state.total_kills, 1);
        assert_eq!(state.combo_timer, 2.0);
        assert!(state.enemies.is_empty());
        assert!(state.player.projectiles.is_empty());
    }

    #[test]
    fn test_one_projectile_per_enemy_per_tick() {
        let mut state = quiet_session();
        let pos = Vec2::new(200.0, 200.0);
        add_enemy(&mut state, EnemyKind::Tank, pos);
        for _ in 0..3 {
            state.player.projectiles.push(shot_at(pos));
        }

        resolve_projectile_hits(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.player.projectiles.len(), 2);
        assert_eq!(state.score, 0);

        resolve_projectile_hits(&mut state);
        resolve_projectile_hits(&mut state);
        assert!(state.enemies.is_empty());
        assert!(state.player.projectiles.is_empty());
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_spent_shot_cannot_hit_second_enemy() {
        let mut state = quiet_session();
        let pos = Vec2::new(300.0, 300.0);
        add_enemy(&mut state, EnemyKind::Normal, pos);
        add_enemy(&mut state, EnemyKind::Normal, pos);
        state.player.projectiles.push(shot_at(pos));

        resolve_projectile_hits(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.total_kills, 1);
    }

    #[test]
    fn test_rammed_enemy_not_shot() {
        let mut state = quiet_session();
        let pos = state.player.pos;
        add_enemy(&mut state, EnemyKind::Normal, pos);
        state.player.projectiles.push(shot_at(pos));

        resolve(&mut state);
        assert_eq!(state.total_kills, 0);
        assert_eq!(state.player.projectiles.len(), 1);
    }

    #[test]
    fn test_kill_drops_bonus_at_enemy() {
        let mut state = GameSession::with_tuning(
            9,
            Tuning {
                bonus_drop_chance: 1.0,
                ..Default::default()
            },
        );
        let pos = Vec2::new(120.0, 40.0);
        add_enemy(&mut state, EnemyKind::Mini, pos);
        state.player.projectiles.push(shot_at(pos));

        resolve_projectile_hits(&mut state);
        assert_eq!(state.bonuses.len(), 1);
        assert_eq!(state.bonuses[0].pos, pos);
    }

    #[test]
    fn test_bonus_effects() {
        let mut state = quiet_session();
        let pos = state.player.pos;

        state.player.health = 2;
        let id = state.next_entity_id();
        state.bonuses.push(Bonus::new(id, BonusKind::Health, pos));
        let id = state.next_entity_id();
        state.bonuses.push(Bonus::new(id, BonusKind::Shield, pos));
        let id = state.next_entity_id();
        state
            .bonuses
            .push(Bonus::new(id, BonusKind::Health, Vec2::new(0.0, 0.0)));

        resolve_bonus_pickups(&mut state);
        assert_eq!(state.player.health, 3);
        assert!(state.player.has_shield);
        assert_eq!(state.player.shield_time, 5.0);
        assert_eq!(state.bonuses.len(), 1);
    }

    #[test]
    fn test_health_bonus_caps() {
        let mut state = quiet_session();
        state.player.health = state.player.max_health;
        apply_bonus(&mut state, BonusKind::Health);
        assert_eq!(state.player.health, state.player.max_health);
    }

    #[test]
    fn test_fire_mode_bonus_emits() {
        let mut state = quiet_session();
        apply_bonus(&mut state, BonusKind::FireModeChange);
        let mode = state.player.fire_mode;
        assert!(state.events.contains(&GameEvent::FireModeChanged { mode }));
    }
}
