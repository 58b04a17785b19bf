//! Single point particle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_SIZE, SCREEN_BUFFER};
use crate::renderer::{Color, Surface};

/// Visible area plus the off-screen margin particles may drift into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub buffer: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            buffer: SCREEN_BUFFER,
        }
    }

    /// True if `pos` is inside the viewport expanded by `buffer` on every side
    /// (edges inclusive)
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= -self.buffer
            && pos.x <= self.width + self.buffer
            && pos.y >= -self.buffer
            && pos.y <= self.height + self.buffer
    }
}

/// A 3x3 point with Euler-integrated motion and a tick lifespan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Remaining ticks
    pub lifespan: i32,
    pub color: Color,
    dead: bool,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, accel: Vec2, lifespan: i32, color: Color) -> Self {
        Self {
            pos,
            vel,
            accel,
            lifespan,
            color,
            dead: false,
        }
    }

    /// Advance one tick, then re-evaluate whether the particle is dead
    pub fn update(&mut self, viewport: &Viewport) {
        self.vel += self.accel;
        self.pos += self.vel;
        self.lifespan -= 1;

        if self.lifespan <= 0 || !viewport.contains(self.pos) {
            self.dead = true;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_fill(self.color);
        surface.fill_rect(self.pos.x, self.pos.y, PARTICLE_SIZE, PARTICLE_SIZE);
    }
}
