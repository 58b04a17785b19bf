//! Effect settings
//!
//! Every tunable in one serde struct. Read from LocalStorage on the web and
//! from a JSON file by the native runner; the effect never writes them.

use serde::{Deserialize, Serialize};

use crate::consts::TIME_STEP_MS;
use crate::error::SetupError;
use crate::platform::SchedulerKind;
use crate::sim::SceneConfig;

/// Effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Accumulated ms that must be exceeded before a tick runs
    pub time_step_ms: f64,
    /// Frame scheduling strategy
    pub scheduler: SchedulerKind,
    /// RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Element id of the target canvas
    pub canvas_id: String,
    pub scene: SceneConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_step_ms: TIME_STEP_MS,
            scheduler: SchedulerKind::default(),
            seed: None,
            canvas_id: "canvas".to_string(),
            scene: SceneConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SetupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        self.time_step_ms = self.time_step_ms.max(0.0);

        let scene = &mut self.scene;
        if !scene.spawn_probability.is_finite() {
            scene.spawn_probability = 0.0;
        }
        scene.spawn_probability = scene.spawn_probability.clamp(0.0, 1.0);
        scene.rise_jitter = scene.rise_jitter.abs();
        scene.screen_buffer = scene.screen_buffer.max(0.0);
        scene.rise_lifespan = ordered(scene.rise_lifespan);

        let explosion = &mut scene.explosion;
        explosion.lifespan_spread = explosion.lifespan_spread.max(0);
        // Fragment lifespans reach lifespan.1 + spread
        let ceiling = i32::MAX - explosion.lifespan_spread;
        let (lo, hi) = ordered(explosion.lifespan);
        explosion.lifespan = (lo.min(ceiling), hi.min(ceiling));

        self
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "fireworks_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Read settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, SetupError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn ordered((a, b): (i32, i32)) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}
