//! Deterministic simulation module
//!
//! All particle logic lives here. Given a seeded [`RandomSource`] the
//! simulation is fully reproducible:
//! - One `update()` per tick, no wall-clock input
//! - Seeded RNG only
//! - Dead entities pruned in the tick they die
//! - No platform dependencies; drawing goes through `renderer::Surface`

pub mod explosion;
pub mod particle;
pub mod random;
pub mod scene;

pub use explosion::{Explosion, ExplosionConfig};
pub use particle::{Particle, Viewport};
pub use random::{RandomSource, SeededRandom};
pub use scene::{Scene, SceneConfig, SceneStats};
