//! Fixed timestep driver
//!
//! Frame callbacks arrive at whatever rate the host delivers them. Elapsed
//! time is accumulated and the driven target advances one tick only when the
//! accumulator exceeds the time step.

use std::cell::RefCell;
use std::rc::Rc;

use crate::platform::Scheduler;

/// Something the loop can advance and paint
pub trait Animate<S: ?Sized> {
    fn update(&mut self);
    fn draw(&self, surface: &mut S);
}

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, `start()` not yet called
    Idle,
    /// Frames are being scheduled
    Running,
    /// `stop()` was called; frames are ignored and nothing is rescheduled
    Stopped,
}

/// Accumulator state machine driving one target onto one surface
pub struct FixedStepLoop<A, S> {
    target: A,
    surface: S,
    time_step_ms: f64,
    accumulator: f64,
    last_timestamp: f64,
    state: LoopState,
    steps: u64,
}

impl<A: Animate<S>, S> FixedStepLoop<A, S> {
    pub fn new(target: A, surface: S, time_step_ms: f64) -> Self {
        Self {
            target,
            surface,
            time_step_ms,
            accumulator: 0.0,
            last_timestamp: 0.0,
            state: LoopState::Idle,
            steps: 0,
        }
    }

    /// Idle -> Running. Returns false if the loop was already started.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Handle one frame callback. Returns true if a tick was run.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        let delta = timestamp_ms - self.last_timestamp;
        self.last_timestamp = timestamp_ms;
        self.accumulator += delta;

        if self.accumulator > self.time_step_ms {
            self.accumulator = 0.0;
            self.target.update();
            self.target.draw(&mut self.surface);
            self.steps += 1;
            true
        } else {
            false
        }
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Ticks run so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn target(&self) -> &A {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut A {
        &mut self.target
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// Binds a loop to a scheduler and keeps requesting frames while it runs
pub struct Runner<A, S, D: ?Sized> {
    shared: Rc<RefCell<FixedStepLoop<A, S>>>,
    scheduler: Rc<D>,
}

impl<A, S, D> Runner<A, S, D>
where
    A: Animate<S> + 'static,
    S: 'static,
    D: Scheduler + ?Sized + 'static,
{
    pub fn new(frame_loop: FixedStepLoop<A, S>, scheduler: Rc<D>) -> Self {
        Self {
            shared: Rc::new(RefCell::new(frame_loop)),
            scheduler,
        }
    }

    /// Schedule the first frame. Only the first call has any effect.
    pub fn start(&self) {
        if self.shared.borrow_mut().start() {
            log::info!("Frame loop started");
            schedule_frame(self.shared.clone(), self.scheduler.clone());
        }
    }

    /// Stop ticking; an already-requested frame becomes a no-op
    pub fn stop(&self) {
        self.shared.borrow_mut().stop();
        log::info!("Frame loop stopped");
    }

    /// Borrow the loop (between frames)
    pub fn with_loop<T>(&self, f: impl FnOnce(&mut FixedStepLoop<A, S>) -> T) -> T {
        f(&mut self.shared.borrow_mut())
    }
}

fn schedule_frame<A, S, D>(shared: Rc<RefCell<FixedStepLoop<A, S>>>, scheduler: Rc<D>)
where
    A: Animate<S> + 'static,
    S: 'static,
    D: Scheduler + ?Sized + 'static,
{
    let next = scheduler.clone();
    scheduler.schedule(Box::new(move |timestamp_ms| {
        let running = {
            let mut frame_loop = shared.borrow_mut();
            frame_loop.frame(timestamp_ms);
            frame_loop.is_running()
        };
        if running {
            schedule_frame(shared, next);
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualScheduler;
    use crate::renderer::{RecordingSurface, Surface};
    use crate::sim::{Scene, SceneConfig, SeededRandom};

    /// Counts calls and paints one rect per draw
    #[derive(Default)]
    struct Counter {
        updates: u32,
        draws: std::cell::Cell<u32>,
    }

    impl Animate<RecordingSurface> for Counter {
        fn update(&mut self) {
            self.updates += 1;
        }

        fn draw(&self, surface: &mut RecordingSurface) {
            self.draws.set(self.draws.get() + 1);
            surface.fill_rect(0.0, 0.0, 1.0, 1.0);
        }
    }

    fn counter_loop() -> FixedStepLoop<Counter, RecordingSurface> {
        FixedStepLoop::new(Counter::default(), RecordingSurface::new(10.0, 10.0), 8.0)
    }

    #[test]
    fn test_idle_loop_ignores_frames() {
        let mut lp = counter_loop();
        assert_eq!(lp.state(), LoopState::Idle);
        assert!(!lp.frame(100.0));
        assert_eq!(lp.target().updates, 0);
    }

    #[test]
    fn test_start_only_once() {
        let mut lp = counter_loop();
        assert!(lp.start());
        assert!(!lp.start());
        assert!(lp.is_running());
    }

    #[test]
    fn test_accumulates_until_threshold_exceeded() {
        let mut lp = counter_loop();
        lp.start();

        // Deltas 0, 3, 3, 3: the sum only passes 8 on the last callback
        let fired: Vec<bool> = [0.0, 3.0, 6.0, 9.0].iter().map(|&t| lp.frame(t)).collect();
        assert_eq!(fired, vec![false, false, false, true]);
        assert_eq!(lp.target().updates, 1);
        assert_eq!(lp.target().draws.get(), 1);
        assert_eq!(lp.accumulator(), 0.0);
        assert_eq!(lp.surface().rect_count(), 1);
    }

    #[test]
    fn test_repeated_timestamps_add_no_time() {
        let mut lp = counter_loop();
        lp.start();

        // Timestamps 0, 3, 3, 3: only the first 3ms counts
        for t in [0.0, 3.0, 3.0, 3.0] {
            assert!(!lp.frame(t));
        }
        assert_eq!(lp.target().updates, 0);
        assert_eq!(lp.accumulator(), 3.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut lp = counter_loop();
        lp.start();
        assert!(!lp.frame(8.0));
        assert!(lp.frame(8.5));
    }

    #[test]
    fn test_slow_callbacks_tick_once_each() {
        let mut lp = counter_loop();
        lp.start();
        // 30 Hz callbacks: every callback exceeds 8ms but only one tick runs
        for i in 1..=10 {
            assert!(lp.frame(i as f64 * 33.0));
        }
        assert_eq!(lp.steps(), 10);
    }

    #[test]
    fn test_stopped_loop_ignores_frames() {
        let mut lp = counter_loop();
        lp.start();
        lp.stop();
        assert!(!lp.frame(100.0));
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(!lp.start());
    }

    #[test]
    fn test_runner_reschedules_every_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let runner = Runner::new(counter_loop(), scheduler.clone());
        assert_eq!(scheduler.pending(), 0);

        runner.start();
        assert_eq!(scheduler.pending(), 1);
        runner.start();
        assert_eq!(scheduler.pending(), 1);

        for t in [0.0, 3.0, 6.0, 9.0, 12.0] {
            assert!(scheduler.fire(t));
            assert_eq!(scheduler.pending(), 1);
        }
        assert_eq!(runner.with_loop(|lp| lp.target().updates), 1);
    }

    #[test]
    fn test_runner_stop_ends_scheduling() {
        let scheduler = Rc::new(ManualScheduler::new());
        let runner = Runner::new(counter_loop(), scheduler.clone());
        runner.start();
        scheduler.fire(20.0);
        assert_eq!(runner.with_loop(|lp| lp.steps()), 1);

        runner.stop();
        assert!(scheduler.fire(40.0));
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(runner.with_loop(|lp| lp.steps()), 1);
    }

    #[test]
    fn test_runner_drives_scene() {
        let config = SceneConfig {
            spawn_probability: 1.0,
            ..Default::default()
        };
        let scene = Scene::new(config, 320.0, 240.0, SeededRandom::new(8));
        let surface = RecordingSurface::new(320.0, 240.0);
        let scheduler = Rc::new(ManualScheduler::new());
        let runner = Runner::new(FixedStepLoop::new(scene, surface, 8.0), scheduler.clone());
        runner.start();

        for frame in 1..=60 {
            scheduler.fire(frame as f64 * 16.7);
        }

        runner.with_loop(|lp| {
            assert_eq!(lp.steps(), 60);
            assert_eq!(lp.target().stats().ticks, 60);
            assert!(lp.target().stats().launched > 0);
            assert_eq!(lp.surface().width(), 320.0);
        });
    }
}
