//! Browser schedulers (WASM only)

use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{FrameCallback, Scheduler, SchedulerKind};

/// `requestAnimationFrame`
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for AnimationFrameScheduler {
    fn schedule(&self, callback: FrameCallback) {
        let closure = Closure::once(move |time: f64| callback(time));
        if let Err(e) = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }
}

/// `setTimeout` at a fixed interval, stamped with `performance.now()`
pub struct TimerScheduler {
    window: Window,
    interval_ms: i32,
}

impl TimerScheduler {
    pub fn new(window: Window, interval_ms: u32) -> Self {
        Self {
            window,
            interval_ms: interval_ms.min(i32::MAX as u32) as i32,
        }
    }

    fn now(window: &Window) -> f64 {
        window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

impl Scheduler for TimerScheduler {
    fn schedule(&self, callback: FrameCallback) {
        let window = self.window.clone();
        let closure = Closure::once(move || callback(Self::now(&window)));
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                self.interval_ms,
            )
        {
            log::error!("setTimeout failed: {:?}", e);
        }
        closure.forget();
    }
}

/// Build the configured scheduler, falling back to the timer when the
/// browser has no `requestAnimationFrame`
pub fn select_scheduler(kind: SchedulerKind, window: &Window) -> Rc<dyn Scheduler> {
    let kind = match kind {
        SchedulerKind::AnimationFrame if !has_animation_frame(window) => {
            log::warn!("requestAnimationFrame unavailable, using timer fallback");
            SchedulerKind::fallback()
        }
        other => other,
    };

    match kind {
        SchedulerKind::AnimationFrame => {
            log::info!("Scheduling with requestAnimationFrame");
            Rc::new(AnimationFrameScheduler::new(window.clone()))
        }
        SchedulerKind::Timer { interval_ms } => {
            log::info!("Scheduling with {}ms timer", interval_ms);
            Rc::new(TimerScheduler::new(window.clone(), interval_ms))
        }
    }
}

fn has_animation_frame(window: &Window) -> bool {
    js_sys::Reflect::get(window, &JsValue::from_str("requestAnimationFrame"))
        .map(|f| f.is_function())
        .unwrap_or(false)
}
