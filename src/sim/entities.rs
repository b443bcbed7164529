//! Entity models: player ship, projectiles, enemies, bonuses
//!
//! Each entity owns its per-tick update (`advance`). Nothing here reaches
//! outside the entity it belongs to; cross-entity rules live in `combat`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Projectile spawn offsets from the ship's left edge
const SHOT_OFFSET: f32 = 18.0;
const LASER_OFFSET: f32 = 15.0;
const DOUBLE_OFFSETS: [f32; 2] = [8.0, 28.0];
/// Horizontal velocities of the spread fan
pub const SPREAD_VX: [f32; 5] = [-100.0, -50.0, 0.0, 50.0, 100.0];

/// Weapon pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FireMode {
    #[default]
    Normal,
    Spread,
    Laser,
    Double,
}

impl FireMode {
    pub const ALL: [FireMode; 4] = [
        FireMode::Normal,
        FireMode::Spread,
        FireMode::Laser,
        FireMode::Double,
    ];

    /// Next mode in cycle order
    pub fn next(self) -> Self {
        match self {
            FireMode::Normal => FireMode::Spread,
            FireMode::Spread => FireMode::Laser,
            FireMode::Laser => FireMode::Double,
            FireMode::Double => FireMode::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FireMode::Normal => "NORMAL",
            FireMode::Spread => "SPREAD",
            FireMode::Laser => "LASER",
            FireMode::Double => "DOUBLE",
        }
    }
}

/// A player shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            width: PROJECTILE_WIDTH,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, PROJECTILE_HEIGHT)
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Fully past the top edge or either side
    pub fn is_off_field(&self) -> bool {
        let r = self.rect();
        r.bottom() < 0.0 || r.right() < 0.0 || r.left() > FIELD_WIDTH
    }
}

/// What happened when the player was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Shield took the hit and is gone
    Shielded,
    /// Still blinking from the previous hit
    Invincible,
    /// One health lost
    Damaged,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement per tick
    pub step: f32,
    pub health: u8,
    pub max_health: u8,
    /// Seconds of invulnerability left
    pub invincible_time: f32,
    pub invincibility_duration: f32,
    /// Minimum seconds between volleys
    pub fire_rate: f32,
    /// Seconds until the next volley is allowed
    pub fire_cooldown: f32,
    pub fire_mode: FireMode,
    pub has_shield: bool,
    pub shield_time: f32,
    /// Shots in flight
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            step: tuning.player_step,
            health: PLAYER_START_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            invincible_time: 0.0,
            invincibility_duration: tuning.invincibility_duration,
            fire_rate: tuning.fire_rate,
            fire_cooldown: 0.0,
            fire_mode: FireMode::Normal,
            has_shield: false,
            shield_time: 0.0,
            projectiles: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Step toward a pointer position, one fixed increment per axis
    pub fn move_toward(&mut self, target: Vec2) {
        let center = self.rect().center();

        if target.x < center.x - PLAYER_DEAD_ZONE {
            self.pos.x -= self.step;
        } else if target.x > center.x + PLAYER_DEAD_ZONE {
            self.pos.x += self.step;
        }

        if target.y < center.y - PLAYER_DEAD_ZONE {
            self.pos.y -= self.step;
        } else if target.y > center.y + PLAYER_DEAD_ZONE {
            self.pos.y += self.step;
        }

        self.clamp_to_field();
    }

    /// Step sideways; negative is left, positive is right, zero stays
    pub fn nudge(&mut self, direction: f32) {
        if direction != 0.0 {
            self.pos.x += self.step * direction.signum();
            self.clamp_to_field();
        }
    }

    fn clamp_to_field(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, FIELD_WIDTH - self.size.x);
        self.pos.y = self.pos.y.clamp(PLAYER_MIN_Y, FIELD_HEIGHT - self.size.y);
    }

    /// Fire a volley in the current mode. Returns false while on cooldown.
    pub fn shoot(&mut self) -> bool {
        if self.fire_cooldown > 0.0 {
            return false;
        }

        let Vec2 { x, y } = self.pos;
        match self.fire_mode {
            FireMode::Normal => {
                self.projectiles
                    .push(Projectile::new(x + SHOT_OFFSET, y, 0.0, -PROJECTILE_SPEED));
            }
            FireMode::Spread => {
                for vx in SPREAD_VX {
                    self.projectiles
                        .push(Projectile::new(x + SHOT_OFFSET, y, vx, -PROJECTILE_SPEED));
                }
            }
            FireMode::Laser => {
                self.projectiles.push(
                    Projectile::new(x + LASER_OFFSET, y, 0.0, -LASER_SPEED).with_width(LASER_WIDTH),
                );
            }
            FireMode::Double => {
                for dx in DOUBLE_OFFSETS {
                    self.projectiles
                        .push(Projectile::new(x + dx, y, 0.0, -PROJECTILE_SPEED));
                }
            }
        }

        self.fire_cooldown = self.fire_rate;
        true
    }

    /// Apply one hit
    pub fn take_damage(&mut self) -> HitOutcome {
        if self.has_shield {
            self.has_shield = false;
            self.shield_time = 0.0;
            return HitOutcome::Shielded;
        }
        if self.invincible_time > 0.0 {
            return HitOutcome::Invincible;
        }
        self.health = self.health.saturating_sub(1);
        self.invincible_time = self.invincibility_duration;
        HitOutcome::Damaged
    }

    pub fn heal(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn raise_shield(&mut self, duration: f32) {
        self.has_shield = true;
        self.shield_time = duration;
    }

    pub fn cycle_fire_mode(&mut self) {
        self.fire_mode = self.fire_mode.next();
    }

    /// Tick timers and move shots, dropping those that left the field
    pub fn advance(&mut self, dt: f32) {
        self.invincible_time = (self.invincible_time - dt).max(0.0);
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.shield_time = (self.shield_time - dt).max(0.0);
        if self.shield_time <= 0.0 {
            self.has_shield = false;
        }

        for projectile in &mut self.projectiles {
            projectile.advance(dt);
        }
        self.projectiles.retain(|p| !p.is_off_field());
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
    Mini,
    Boss,
}

impl EnemyKind {
    /// Kinds produced by the regular spawn timer, in weight-table order
    pub const REGULAR: [EnemyKind; 4] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Mini,
    ];
}

/// Stats derived from (kind, wave)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: Vec2,
    pub speed: f32,
    pub health: u32,
    pub score: u64,
}

impl EnemyStats {
    pub fn for_kind(kind: EnemyKind, wave: u32) -> Self {
        let w = wave as f32;
        let (width, height, speed, health, score) = match kind {
            EnemyKind::Normal => (35.0, 30.0, 100.0 + w * 30.0, 1, 10 + wave as u64 * 3),
            EnemyKind::Fast => (28.0, 25.0, 200.0 + w * 50.0, 1, 15 + wave as u64 * 5),
            EnemyKind::Tank => (55.0, 45.0, 50.0 + w * 10.0, 3 + wave / 2, 30 + wave as u64 * 10),
            EnemyKind::Mini => (18.0, 18.0, 150.0 + w * 40.0, 1, 5 + wave as u64 * 2),
            EnemyKind::Boss => (90.0, 70.0, 30.0, 10 + wave * 5, 500 + wave as u64 * 100),
        };
        Self {
            size: Vec2::new(width, height),
            speed,
            health,
            score,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed (units/s)
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub score_value: u64,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, wave: u32, pos: Vec2) -> Self {
        let stats = EnemyStats::for_kind(kind, wave);
        Self {
            id,
            kind,
            pos,
            size: stats.size,
            speed: stats.speed,
            health: stats.health,
            max_health: stats.health,
            score_value: stats.score,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    /// Remove one health. Returns true when this hit destroyed the enemy.
    pub fn take_damage(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    /// Slipped past the bottom edge
    pub fn is_below_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT
    }
}

/// Bonus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    Health,
    Shield,
    FireModeChange,
}

impl BonusKind {
    pub const ALL: [BonusKind; 3] = [BonusKind::Health, BonusKind::Shield, BonusKind::FireModeChange];
}

/// A falling collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub id: u32,
    pub kind: BonusKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bonus {
    pub fn new(id: u32, kind: BonusKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: Vec2::splat(BONUS_SIZE),
            speed: BONUS_FALL_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    pub fn is_below_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&Tuning::default())
    }

    #[test]
    fn test_normal_enemy_wave_one() {
        let stats = EnemyStats::for_kind(EnemyKind::Normal, 1);
        assert_eq!(stats.speed, 130.0);
        assert_eq!(stats.health, 1);
        assert_eq!(stats.score, 13);
    }

    #[test]
    fn test_enemy_table_scales_with_wave() {
        let tank = EnemyStats::for_kind(EnemyKind::Tank, 5);
        assert_eq!(tank.health, 5);
        assert_eq!(tank.speed, 100.0);
        assert_eq!(tank.score, 80);

        let boss = EnemyStats::for_kind(EnemyKind::Boss, 10);
        assert_eq!(boss.health, 60);
        assert_eq!(boss.speed, 30.0);
        assert_eq!(boss.score, 1500);
        assert_eq!(boss.size, Vec2::new(90.0, 70.0));

        let fast = EnemyStats::for_kind(EnemyKind::Fast, 2);
        assert_eq!((fast.speed, fast.score), (300.0, 25));
        let mini = EnemyStats::for_kind(EnemyKind::Mini, 3);
        assert_eq!((mini.speed, mini.score), (270.0, 11));
    }

    #[test]
    fn test_enemy_take_damage() {
        let mut tank = Enemy::new(1, EnemyKind::Tank, 1, Vec2::ZERO);
        assert_eq!(tank.health, 3);
        assert!(!tank.take_damage());
        assert!(!tank.take_damage());
        assert!(tank.take_damage());
        assert_eq!(tank.health, 0);
        assert!(tank.take_damage());
        assert_eq!(tank.health, 0);
    }

    #[test]
    fn test_shield_absorbs_one_hit() {
        let mut p = player();
        p.raise_shield(5.0);
        assert_eq!(p.take_damage(), HitOutcome::Shielded);
        assert_eq!(p.health, PLAYER_START_HEALTH);
        assert!(!p.has_shield);

        assert_eq!(p.take_damage(), HitOutcome::Damaged);
        assert_eq!(p.health, PLAYER_START_HEALTH - 1);
    }

    #[test]
    fn test_invincibility_window() {
        let mut p = player();
        assert_eq!(p.take_damage(), HitOutcome::Damaged);
        assert_eq!(p.take_damage(), HitOutcome::Invincible);
        assert_eq!(p.health, PLAYER_START_HEALTH - 1);

        p.advance(2.1);
        assert_eq!(p.take_damage(), HitOutcome::Damaged);
        assert_eq!(p.health, PLAYER_START_HEALTH - 2);
    }

    #[test]
    fn test_health_never_underflows() {
        let mut p = player();
        for _ in 0..10 {
            p.take_damage();
            p.advance(3.0);
        }
        assert_eq!(p.health, 0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = player();
        p.heal(1);
        p.heal(1);
        p.heal(1);
        assert_eq!(p.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_shield_expires() {
        let mut p = player();
        p.raise_shield(5.0);
        p.advance(4.9);
        assert!(p.has_shield);
        p.advance(0.2);
        assert!(!p.has_shield);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut p = player();
        assert!(p.shoot());
        assert!(!p.shoot());
        assert_eq!(p.projectiles.len(), 1);

        p.advance(0.16);
        assert!(p.shoot());
        assert_eq!(p.projectiles.len(), 2);
    }

    #[test]
    fn test_spread_fan() {
        let mut p = player();
        p.fire_mode = FireMode::Spread;
        assert!(p.shoot());
        assert_eq!(p.projectiles.len(), 5);

        let vxs: Vec<f32> = p.projectiles.iter().map(|s| s.vel.x).collect();
        assert_eq!(vxs, vec![-100.0, -50.0, 0.0, 50.0, 100.0]);
        assert!(p.projectiles.iter().all(|s| s.pos.x == p.pos.x + 18.0));
    }

    #[test]
    fn test_laser_and_double() {
        let mut p = player();
        p.fire_mode = FireMode::Laser;
        p.shoot();
        assert_eq!(p.projectiles[0].width, LASER_WIDTH);
        assert_eq!(p.projectiles[0].vel.y, -LASER_SPEED);

        let mut p = player();
        p.fire_mode = FireMode::Double;
        p.shoot();
        let xs: Vec<f32> = p.projectiles.iter().map(|s| s.pos.x - p.pos.x).collect();
        assert_eq!(xs, vec![8.0, 28.0]);
    }

    #[test]
    fn test_projectiles_leave_top() {
        let mut p = player();
        p.shoot();
        // 700 units at 600/s plus the shot height
        for _ in 0..80 {
            p.advance(1.0 / 60.0);
        }
        assert!(p.projectiles.is_empty());
    }

    #[test]
    fn test_move_toward_steps_and_clamps() {
        let mut p = player();
        let start = p.pos;
        p.move_toward(Vec2::new(0.0, 0.0));
        assert_eq!(p.pos.x, start.x - 8.0);
        assert_eq!(p.pos.y, start.y - 8.0);

        for _ in 0..200 {
            p.move_toward(Vec2::new(0.0, 0.0));
        }
        assert_eq!(p.pos, Vec2::new(0.0, PLAYER_MIN_Y));

        for _ in 0..200 {
            p.move_toward(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        }
        assert_eq!(p.pos, Vec2::new(FIELD_WIDTH - 40.0, FIELD_HEIGHT - 40.0));
    }

    #[test]
    fn test_move_toward_dead_zone() {
        let mut p = player();
        let center = p.rect().center();
        p.move_toward(center + Vec2::new(4.0, -4.0));
        assert_eq!(p.rect().center(), center);
    }

    #[test]
    fn test_nudge() {
        let mut p = player();
        let x = p.pos.x;
        p.nudge(-1.0);
        assert_eq!(p.pos.x, x - 8.0);
        p.nudge(0.0);
        assert_eq!(p.pos.x, x - 8.0);
        p.nudge(3.0);
        assert_eq!(p.pos.x, x);
    }

    #[test]
    fn test_fire_mode_cycle() {
        let mut mode = FireMode::Normal;
        for expected in [FireMode::Spread, FireMode::Laser, FireMode::Double, FireMode::Normal] {
            mode = mode.next();
            assert_eq!(mode, expected);
        }
    }

    #[test]
    fn test_bonus_falls_out() {
        let mut bonus = Bonus::new(1, BonusKind::Health, Vec2::new(10.0, 790.0));
        assert!(!bonus.is_below_field());
        bonus.advance(0.1);
        assert!(bonus.is_below_field());
    }
}
