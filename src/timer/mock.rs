use super::{Scheduler, TimerHandle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct ManualTimer {
    period: Duration,
    on_tick: Box<dyn Fn() + Send>,
    active: bool,
}

#[derive(Default)]
struct Timers {
    timers: Vec<ManualTimer>,
    cancelled: usize,
}

/// Scheduler whose timers only fire when told to. Clones share the same timers.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<Timers>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers ever scheduled
    pub fn started(&self) -> usize {
        self.inner.lock().unwrap().timers.len()
    }

    /// Number of timers cancelled so far
    pub fn cancelled(&self) -> usize {
        self.inner.lock().unwrap().cancelled
    }

    pub fn active_timers(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .timers
            .iter()
            .filter(|t| t.active)
            .count()
    }

    /// Periods of every timer in scheduling order
    pub fn periods(&self) -> Vec<Duration> {
        self.inner
            .lock()
            .unwrap()
            .timers
            .iter()
            .map(|t| t.period)
            .collect()
    }

    /// Fires every active timer once.
    pub fn fire(&self) {
        let inner = self.inner.lock().unwrap();
        for timer in inner.timers.iter().filter(|t| t.active) {
            (timer.on_tick)();
        }
    }

    /// Fires the timer with this index even if it was cancelled, to mimic a late tick.
    pub fn fire_stale(&self, index: usize) {
        let inner = self.inner.lock().unwrap();
        if let Some(timer) = inner.timers.get(index) {
            (timer.on_tick)();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating<F>(&self, period: Duration, on_tick: F) -> TimerHandle
    where
        F: Fn() + Send + 'static,
    {
        let index = {
            let mut inner = self.inner.lock().unwrap();
            inner.timers.push(ManualTimer {
                period,
                on_tick: Box::new(on_tick),
                active: true,
            });
            inner.timers.len() - 1
        };

        let inner = self.inner.clone();
        TimerHandle::new(move || {
            let mut inner = inner.lock().unwrap();
            if let Some(timer) = inner.timers.get_mut(index) {
                timer.active = false;
            }
            inner.cancelled += 1;
        })
    }
}
