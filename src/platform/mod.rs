//! Platform abstraction layer
//!
//! Handles browser/native differences for frame scheduling: the loop only
//! needs "call me back near the next display refresh with a millisecond
//! timestamp".

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::consts::TIMER_INTERVAL_MS;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// One-shot frame callback receiving a high-resolution timestamp (ms)
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Arranges for a callback to run once, asynchronously
pub trait Scheduler {
    fn schedule(&self, callback: FrameCallback);
}

/// Which scheduling strategy the host should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    /// Native display refresh callbacks, falling back to the timer if absent
    #[default]
    AnimationFrame,
    /// Fixed interval timer
    Timer { interval_ms: u32 },
}

impl SchedulerKind {
    /// The strategy to use when display refresh callbacks are unavailable
    pub fn fallback() -> Self {
        SchedulerKind::Timer {
            interval_ms: TIMER_INTERVAL_MS,
        }
    }
}

/// Queue of callbacks fired explicitly by the owner
///
/// Drives the loop in the headless runner and in tests.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks waiting to be fired
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the oldest pending callback. Returns false if none was queued.
    pub fn fire(&self, timestamp_ms: f64) -> bool {
        // Release the borrow first: the callback usually schedules again
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(callback) => {
                callback(timestamp_ms);
                true
            }
            None => false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push_back(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_manual_scheduler_fifo() {
        let scheduler = ManualScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let seen = seen.clone();
            scheduler.schedule(Box::new(move |t| seen.borrow_mut().push((id, t))));
        }
        assert_eq!(scheduler.pending(), 3);

        assert!(scheduler.fire(1.0));
        assert!(scheduler.fire(2.0));
        assert!(scheduler.fire(3.0));
        assert!(!scheduler.fire(4.0));
        assert_eq!(*seen.borrow(), vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
    }

    #[test]
    fn test_callback_may_reschedule() {
        let scheduler = Rc::new(ManualScheduler::new());
        let hits = Rc::new(Cell::new(0));

        let inner = scheduler.clone();
        let counter = hits.clone();
        scheduler.schedule(Box::new(move |_| {
            counter.set(counter.get() + 1);
            inner.schedule(Box::new(|_| {}));
        }));

        scheduler.fire(0.0);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_scheduler_kind_json() {
        let kind: SchedulerKind = serde_json::from_str(r#"{"timer":{"interval_ms":33}}"#).unwrap();
        assert_eq!(kind, SchedulerKind::fallback());
        let kind: SchedulerKind = serde_json::from_str(r#""animation_frame""#).unwrap();
        assert_eq!(kind, SchedulerKind::AnimationFrame);
    }
}
