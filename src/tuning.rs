//! Data-driven game balance
//!
//! Every knob that shapes difficulty lives here so a run can be rebalanced
//! from a JSON file without touching the simulation. Missing fields fall back
//! to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Balance constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds between regular spawns at wave 1
    pub spawn_delay_initial: f32,
    /// Spawn delay reduction applied on every wave advance
    pub spawn_delay_step: f32,
    /// Spawn delay never drops below this
    pub spawn_delay_floor: f32,
    /// Chance that a killed enemy drops a bonus
    pub bonus_drop_chance: f64,
    /// Seconds a combo survives without a new kill
    pub combo_window: f32,
    /// Score bonus per combo step added to each kill
    pub combo_multiplier: u64,
    /// Shield lifetime after pickup (seconds)
    pub shield_duration: f32,
    /// Invulnerability after losing health (seconds)
    pub invincibility_duration: f32,
    /// Minimum seconds between volleys
    pub fire_rate: f32,
    /// Score lost when an enemy slips past the bottom edge
    pub miss_penalty: u64,
    /// Kills needed to clear a wave: base + per_wave * wave
    pub kill_quota_base: u32,
    pub kill_quota_per_wave: u32,
    /// A boss appears on waves that are multiples of this
    pub boss_wave_interval: u32,
    /// Ship movement per tick (units)
    pub player_step: f32,
    /// Regular enemy weights (Normal, Fast, Tank, Mini) before `late_wave`
    pub early_weights: [u32; 4],
    /// Regular enemy weights from `late_wave` onward
    pub late_weights: [u32; 4],
    /// First wave that uses `late_weights`
    pub late_wave: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_delay_initial: 0.8,
            spawn_delay_step: 0.05,
            spawn_delay_floor: 0.2,
            bonus_drop_chance: 0.2,
            combo_window: 2.0,
            combo_multiplier: 2,
            shield_duration: 5.0,
            invincibility_duration: 2.0,
            fire_rate: 0.15,
            miss_penalty: 5,
            kill_quota_base: 5,
            kill_quota_per_wave: 2,
            boss_wave_interval: 10,
            player_step: 8.0,
            early_weights: [50, 20, 15, 12],
            late_weights: [30, 30, 20, 20],
            late_wave: 5,
        }
    }
}

impl Tuning {
    /// Kills required to leave `wave`
    pub fn kill_quota(&self, wave: u32) -> u32 {
        self.kill_quota_per_wave
            .saturating_mul(wave)
            .saturating_add(self.kill_quota_base)
    }

    /// Spawn delay after one more wave advance. Never longer than `current`,
    /// whatever the loaded step and floor say.
    pub fn next_spawn_delay(&self, current: f32) -> f32 {
        (current - self.spawn_delay_step.max(0.0))
            .max(self.spawn_delay_floor)
            .min(current)
    }

    /// Whether `wave` calls for a boss
    pub fn is_boss_wave(&self, wave: u32) -> bool {
        self.boss_wave_interval > 0 && wave % self.boss_wave_interval == 0
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<Tuning>(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_quota() {
        let tuning = Tuning::default();
        assert_eq!(tuning.kill_quota(1), 7);
        assert_eq!(tuning.kill_quota(4), 13);
    }

    #[test]
    fn test_spawn_delay_floor() {
        let tuning = Tuning::default();
        assert!((tuning.next_spawn_delay(0.8) - 0.75).abs() < 1e-6);
        assert!((tuning.next_spawn_delay(0.22) - 0.2).abs() < 1e-6);
        assert!((tuning.next_spawn_delay(0.2) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_delay_never_grows() {
        // Starting under the floor holds the delay rather than raising it
        let tuning: Tuning = serde_json::from_str(r#"{"spawn_delay_initial": 0.1}"#).unwrap();
        assert_eq!(tuning.next_spawn_delay(tuning.spawn_delay_initial), 0.1);

        let backwards = Tuning {
            spawn_delay_step: -0.5,
            ..Default::default()
        };
        assert_eq!(backwards.next_spawn_delay(0.8), 0.8);
        assert_eq!(backwards.next_spawn_delay(0.2), 0.2);
    }

    #[test]
    fn test_boss_waves() {
        let tuning = Tuning::default();
        assert!(!tuning.is_boss_wave(9));
        assert!(tuning.is_boss_wave(10));
        assert!(tuning.is_boss_wave(20));

        let no_boss = Tuning {
            boss_wave_interval: 0,
            ..Default::default()
        };
        assert!(!no_boss.is_boss_wave(10));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"miss_penalty": 9}"#).unwrap();
        assert_eq!(tuning.miss_penalty, 9);
        assert_eq!(tuning.kill_quota_base, 5);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let tuning = Tuning::load(&dir.path().join("nope.json"));
        assert_eq!(tuning, Tuning::default());
    }
}
