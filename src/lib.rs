//! Fireworks - a canvas particle effect
//!
//! Core modules:
//! - `sim`: Simulation (rise particles, explosions, the scene registry)
//! - `renderer`: Drawing surface abstraction (2D canvas on web)
//! - `frame_loop`: Fixed-step driver that paces the scene
//! - `platform`: Frame scheduling (animation frame / timer fallback)
//! - `settings`: Data-driven tuning

pub mod error;
pub mod frame_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SetupError;
pub use frame_loop::{Animate, FixedStepLoop, LoopState, Runner};
pub use settings::Settings;

/// Default tuning constants
pub mod consts {
    /// Accumulated milliseconds that must be exceeded before a tick runs
    pub const TIME_STEP_MS: f64 = 8.0;

    /// Particle square size (width and height)
    pub const PARTICLE_SIZE: f32 = 3.0;
    /// Margin outside the viewport where particles still count as on screen
    pub const SCREEN_BUFFER: f32 = 10.0;

    /// Chance per tick that a new rise particle is launched
    pub const SPAWN_PROBABILITY: f64 = 0.025;
    /// Initial vertical velocity of a rise particle (negative is up)
    pub const RISE_SPEED: f32 = -3.0;
    /// Horizontal velocity of a rise particle is drawn from [-RISE_JITTER, RISE_JITTER]
    pub const RISE_JITTER: f32 = 0.5;
    /// Rise particle lifespan range in ticks (inclusive)
    pub const RISE_LIFESPAN: (i32, i32) = (40, 70);

    /// Fragments per explosion
    pub const EXPLOSION_PARTICLES: usize = 20;
    /// Explosion lifespan range in ticks (inclusive)
    pub const EXPLOSION_LIFESPAN: (i32, i32) = (30, 80);
    /// Fragment lifespan is drawn from [explosion_lifespan, explosion_lifespan + spread]
    pub const EXPLOSION_LIFESPAN_SPREAD: i32 = 30;
    /// Downward acceleration applied to fragments (units/tick²)
    pub const GRAVITY: f32 = 0.05;

    /// Alpha of the black wash painted each frame (lower = longer trails)
    pub const TRAIL_ALPHA: f32 = 0.1;

    /// Fallback timer interval when no display refresh signal is used (~30 Hz)
    pub const TIMER_INTERVAL_MS: u32 = 33;
}
