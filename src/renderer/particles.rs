//! Explosion particles
//!
//! Purely cosmetic. The system keeps its own RNG so effects never perturb the
//! gameplay random sequence.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::sim::GameEvent;

/// Particles per explosion
const BURST_COUNT: usize = 8;
/// Seconds a particle lives
const PARTICLE_LIFE: f32 = 0.5;
/// Orange to yellow
const EXPLOSION_COLORS: [[f32; 3]; 4] = [
    [1.0, 0.4, 0.0],
    [1.0, 0.6, 0.0],
    [1.0, 0.8, 0.0],
    [1.0, 1.0, 0.0],
];

/// A particle for visual effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 3],
    /// Seconds remaining
    pub life: f32,
    pub size: f32,
}

impl Particle {
    /// Remaining life as 0..1, for fading
    pub fn alpha(&self) -> f32 {
        (self.life / PARTICLE_LIFE).clamp(0.0, 1.0)
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    cap: usize,
}

impl ParticleSystem {
    pub fn new(seed: u64, cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap.min(512)),
            rng: Pcg32::seed_from_u64(seed),
            cap,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn effects for the events of one tick
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Explosion { pos } = event {
                self.spawn_explosion(*pos);
            }
        }
    }

    /// Radial burst; stops adding once the cap is reached
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        for _ in 0..BURST_COUNT {
            if self.particles.len() >= self.cap {
                return;
            }
            let angle = self.rng.random::<f32>() * TAU;
            let speed: f32 = self.rng.random_range(200.0..400.0);
            let color = EXPLOSION_COLORS[self.rng.random_range(0..EXPLOSION_COLORS.len())];
            let size = f32::from(self.rng.random_range(2u8..=6));
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life: PARTICLE_LIFE,
                size,
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
