//! Scene registry
//!
//! Owns every live rise particle and explosion. Each tick it may launch a new
//! rise particle, turns expired rise particles into explosions, and prunes
//! dead entities before returning.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::explosion::{Explosion, ExplosionConfig};
use super::particle::{Particle, Viewport};
use super::random::{RandomSource, SeededRandom};
use crate::consts::{
    RISE_JITTER, RISE_LIFESPAN, RISE_SPEED, SCREEN_BUFFER, SPAWN_PROBABILITY, TRAIL_ALPHA,
};
use crate::frame_loop::Animate;
use crate::renderer::{Color, Surface};

/// Scene tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Chance per tick of launching a rise particle
    pub spawn_probability: f64,
    /// Initial vertical velocity of rise particles
    pub rise_speed: f32,
    /// Horizontal velocity is drawn from [-rise_jitter, rise_jitter]
    pub rise_jitter: f32,
    /// Rise particle lifespan range (inclusive)
    pub rise_lifespan: (i32, i32),
    /// Off-screen margin before particles are culled
    pub screen_buffer: f32,
    /// Translucent wash painted over the whole viewport every frame
    pub trail_color: Color,
    pub explosion: ExplosionConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spawn_probability: SPAWN_PROBABILITY,
            rise_speed: RISE_SPEED,
            rise_jitter: RISE_JITTER,
            rise_lifespan: RISE_LIFESPAN,
            screen_buffer: SCREEN_BUFFER,
            trail_color: Color::BLACK.with_alpha(TRAIL_ALPHA),
            explosion: ExplosionConfig::default(),
        }
    }
}

/// Entity counts for HUD/logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub ticks: u64,
    pub rising: usize,
    pub explosions: usize,
    pub fragments: usize,
    /// Rise particles launched since creation
    pub launched: u64,
    /// Explosions created since creation
    pub exploded: u64,
}

/// All live particles and explosions
#[derive(Debug, Clone)]
pub struct Scene<R: RandomSource = SeededRandom> {
    config: SceneConfig,
    viewport: Viewport,
    rng: R,
    particles: Vec<Particle>,
    explosions: Vec<Explosion>,
    ticks: u64,
    launched: u64,
    exploded: u64,
}

impl<R: RandomSource> Scene<R> {
    pub fn new(config: SceneConfig, width: f32, height: f32, rng: R) -> Self {
        let viewport = Viewport {
            width,
            height,
            buffer: config.screen_buffer,
        };
        Self {
            config,
            viewport,
            rng,
            particles: Vec::new(),
            explosions: Vec::new(),
            ticks: 0,
            launched: 0,
            exploded: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Follow a viewport size change; live entities keep their positions
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Add a rise particle directly
    pub fn launch(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.launched += 1;
    }

    /// Launch a rise particle from just below a random point on the bottom edge
    pub fn spawn_rise(&mut self) {
        let x = self.rng.float_in(0.0, self.viewport.width);
        let pos = Vec2::new(x, self.viewport.height + 1.0);
        let jitter = self.config.rise_jitter;
        let vel = Vec2::new(self.rng.float_in(-jitter, jitter), self.config.rise_speed);
        let (min, max) = self.config.rise_lifespan;
        let lifespan = self.rng.int_in(min, max);
        let color = self.rng.color();
        self.launch(Particle::new(pos, vel, Vec2::ZERO, lifespan, color));
    }

    /// Start an explosion at `origin`
    pub fn explode(&mut self, origin: Vec2, color: Color) {
        log::debug!("Explosion at ({:.1}, {:.1})", origin.x, origin.y);
        let explosion = Explosion::new(origin, color, &self.config.explosion, &mut self.rng);
        self.explosions.push(explosion);
        self.exploded += 1;
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self) {
        self.ticks += 1;

        if self.rng.chance(self.config.spawn_probability) {
            self.spawn_rise();
        }

        for particle in &mut self.particles {
            particle.update(&self.viewport);
        }
        let (expired, alive): (Vec<Particle>, Vec<Particle>) =
            self.particles.drain(..).partition(Particle::is_dead);
        self.particles = alive;
        for particle in expired {
            self.explode(particle.pos, particle.color);
        }

        for explosion in &mut self.explosions {
            explosion.update(&self.viewport);
        }
        self.explosions.retain(|e| !e.is_finished());
    }

    /// Fade the previous frame, then paint rise particles and explosions
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_fill(self.config.trail_color);
        surface.fill_rect(0.0, 0.0, self.viewport.width, self.viewport.height);

        for particle in &self.particles {
            particle.draw(surface);
        }
        for explosion in &self.explosions {
            explosion.draw(surface);
        }
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            ticks: self.ticks,
            rising: self.particles.len(),
            explosions: self.explosions.len(),
            fragments: self.explosions.iter().map(|e| e.particles.len()).sum(),
            launched: self.launched,
            exploded: self.exploded,
        }
    }
}

impl<R: RandomSource, S: Surface + ?Sized> Animate<S> for Scene<R> {
    fn update(&mut self) {
        Scene::update(self);
    }

    fn draw(&self, surface: &mut S) {
        Scene::draw(self, surface);
    }
}
