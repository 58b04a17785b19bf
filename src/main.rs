//! Fireworks entry point
//!
//! Handles platform-specific initialization and starts the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use fireworks::platform::web::select_scheduler;
    use fireworks::renderer::{CanvasSurface, Surface};
    use fireworks::sim::{Scene, SeededRandom};
    use fireworks::{FixedStepLoop, Runner, SetupError, Settings};

    type App = Runner<Scene, CanvasSurface, dyn fireworks::platform::Scheduler>;

    pub fn run() -> Result<(), SetupError> {
        console_error_panic_hook::set_once();
        // A second init only happens on hot reload; keep the first logger
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Fireworks starting...");

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let settings = Settings::load();
        let surface = CanvasSurface::from_document(&document, &settings.canvas_id)?;
        let (width, height) = surface.fit_to_client();

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Seed: {}, viewport {}x{}", seed, width, height);

        let scene = Scene::new(settings.scene.clone(), width, height, SeededRandom::new(seed));
        let scheduler = select_scheduler(settings.scheduler, &window);
        let app: Rc<App> = Rc::new(Runner::new(
            FixedStepLoop::new(scene, surface, settings.time_step_ms),
            scheduler,
        ));

        setup_resize(&window, app.clone());

        app.start();
        log::info!("Fireworks running!");
        Ok(())
    }

    fn setup_resize(window: &web_sys::Window, app: Rc<App>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.with_loop(|frame_loop| {
                let (width, height) = frame_loop.surface().fit_to_client();
                frame_loop.target_mut().resize(width, height);
                log::debug!(
                    "Resized to {}x{}",
                    frame_loop.surface().width(),
                    frame_loop.surface().height()
                );
            });
        });
        let _ = window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Fireworks failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: synthetic 60 Hz frames into a recording surface
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use fireworks::platform::ManualScheduler;
    use fireworks::renderer::RecordingSurface;
    use fireworks::sim::{Scene, SeededRandom};
    use fireworks::{FixedStepLoop, Runner, SetupError, Settings};

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_FRAMES: u32 = 600;

    pub fn run() -> Result<(), SetupError> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_file(Path::new(&path))?,
            None => Settings::default(),
        };
        let frames = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);

        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Seed: {}, {} frames at 60 Hz", seed, frames);

        let scene = Scene::new(settings.scene.clone(), WIDTH, HEIGHT, SeededRandom::new(seed));
        let surface = RecordingSurface::new(WIDTH, HEIGHT);
        let scheduler = Rc::new(ManualScheduler::new());
        let runner = Runner::new(
            FixedStepLoop::new(scene, surface, settings.time_step_ms),
            scheduler.clone(),
        );
        runner.start();

        for frame in 1..=frames {
            scheduler.fire(frame as f64 * FRAME_MS);

            runner.with_loop(|frame_loop| {
                if frame % 60 == 0 {
                    let stats = frame_loop.target().stats();
                    log::info!(
                        "t={:.1}s ticks={} rising={} explosions={} fragments={} rects={}",
                        frame as f64 * FRAME_MS / 1000.0,
                        stats.ticks,
                        stats.rising,
                        stats.explosions,
                        stats.fragments,
                        frame_loop.surface().rect_count(),
                    );
                }
                frame_loop.surface_mut().clear();
            });
        }

        runner.stop();
        let stats = runner.with_loop(|frame_loop| frame_loop.target().stats());
        log::info!(
            "Done: {} ticks, {} launched, {} explosions",
            stats.ticks,
            stats.launched,
            stats.exploded
        );
        Ok(())
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fireworks (native, headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("Fireworks failed to start: {}", e);
        std::process::exit(1);
    }
}
