//! Wave progression and combo decay
//!
//! Difficulty only ramps up within a session: waves never go back and the
//! spawn delay never grows.

use super::state::{GameEvent, GameSession};

/// Advance the wave when the kill quota is met. Returns true on advance.
pub fn check_wave_advance(state: &mut GameSession) -> bool {
    if state.kills_in_wave < state.tuning.kill_quota(state.wave) {
        return false;
    }

    state.wave += 1;
    state.kills_in_wave = 0;
    state.spawn_delay = state.tuning.next_spawn_delay(state.spawn_delay);
    state.emit(GameEvent::WaveAdvanced { wave: state.wave });
    log::info!(
        "Wave {} (spawn delay {:.2}s, score {})",
        state.wave,
        state.spawn_delay,
        state.score
    );
    true
}

/// Count down the combo window; the combo drops to zero once it lapses
pub fn decay_combo(state: &mut GameSession, dt: f32) {
    if state.combo_timer > 0.0 {
        state.combo_timer -= dt;
    } else {
        state.combo = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_one_quota() {
        let mut state = GameSession::new(1);
        state.kills_in_wave = 6;
        assert!(!check_wave_advance(&mut state));
        assert_eq!(state.wave, 1);

        state.kills_in_wave = 7;
        assert!(check_wave_advance(&mut state));
        assert_eq!(state.wave, 2);
        assert_eq!(state.kills_in_wave, 0);
        assert!((state.spawn_delay - 0.75).abs() < 1e-6);
        assert!(state.events.contains(&GameEvent::WaveAdvanced { wave: 2 }));
    }

    #[test]
    fn test_spawn_delay_never_below_floor() {
        let mut state = GameSession::new(1);
        for _ in 0..40 {
            state.kills_in_wave = state.tuning.kill_quota(state.wave);
            check_wave_advance(&mut state);
        }
        assert_eq!(state.wave, 41);
        assert!((state.spawn_delay - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_delay_monotonic() {
        let mut state = GameSession::new(1);
        let mut last = state.spawn_delay;
        for _ in 0..20 {
            state.kills_in_wave = 1000;
            check_wave_advance(&mut state);
            assert!(state.spawn_delay <= last);
            last = state.spawn_delay;
        }
    }

    #[test]
    fn test_spawn_delay_holds_when_tuned_under_floor() {
        let tuning: crate::tuning::Tuning =
            serde_json::from_str(r#"{"spawn_delay_initial": 0.1, "spawn_delay_step": -0.3}"#)
                .unwrap();
        let mut state = GameSession::with_tuning(1, tuning);
        for _ in 0..5 {
            state.kills_in_wave = 100;
            assert!(check_wave_advance(&mut state));
            assert!(state.spawn_delay <= 0.1, "delay grew to {}", state.spawn_delay);
        }
        assert_eq!(state.wave, 6);
    }

    #[test]
    fn test_combo_lapses() {
        let mut state = GameSession::new(1);
        state.combo = 5;
        state.combo_timer = 2.0;

        for _ in 0..60 {
            decay_combo(&mut state, 1.0 / 60.0);
        }
        assert_eq!(state.combo, 5);

        for _ in 0..65 {
            decay_combo(&mut state, 1.0 / 60.0);
        }
        assert_eq!(state.combo, 0);
    }
}
