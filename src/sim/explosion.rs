//! Radial burst of fragments

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::particle::{Particle, Viewport};
use super::random::RandomSource;
use crate::consts::{EXPLOSION_LIFESPAN, EXPLOSION_LIFESPAN_SPREAD, EXPLOSION_PARTICLES, GRAVITY};
use crate::renderer::{Color, Surface};

/// Explosion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Fragments per burst
    pub particles: usize,
    /// Explosion lifespan range (inclusive), the base for fragment lifespans
    pub lifespan: (i32, i32),
    /// Extra ticks a fragment may live beyond the explosion lifespan
    pub lifespan_spread: i32,
    /// Downward acceleration on every fragment
    pub gravity: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            particles: EXPLOSION_PARTICLES,
            lifespan: EXPLOSION_LIFESPAN,
            lifespan_spread: EXPLOSION_LIFESPAN_SPREAD,
            gravity: GRAVITY,
        }
    }
}

/// A set of fragments flung out evenly from one point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec2,
    pub color: Color,
    /// Sampled once at creation; never decremented
    pub lifespan: i32,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new<R: RandomSource + ?Sized>(
        origin: Vec2,
        color: Color,
        config: &ExplosionConfig,
        rng: &mut R,
    ) -> Self {
        let lifespan = rng.int_in(config.lifespan.0, config.lifespan.1);
        let count = config.particles;
        let accel = Vec2::new(0.0, config.gravity);

        let mut particles = Vec::with_capacity(count);
        for i in (0..count).rev() {
            let angle = i as f32 * TAU / count as f32;
            let vel = Vec2::new(angle.sin(), angle.cos());
            // Multiples of 3 (including 0) get a random accent
            let color = if i % 3 != 0 { color } else { rng.color() };
            let ttl = rng.int_in(lifespan, lifespan.saturating_add(config.lifespan_spread));
            particles.push(Particle::new(origin, vel, accel, ttl, color));
        }

        Self {
            origin,
            color,
            lifespan,
            particles,
        }
    }

    /// Advance every fragment and drop the dead ones
    pub fn update(&mut self, viewport: &Viewport) {
        for particle in &mut self.particles {
            particle.update(viewport);
        }
        self.particles.retain(|p| !p.is_dead());
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    /// An explosion is finished once every fragment has died
    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }
}
