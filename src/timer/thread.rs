use super::{Scheduler, TimerHandle};
use crossbeam::channel::{bounded, tick};
use crossbeam::select;
use log::{debug, trace, warn};
use std::thread;
use std::time::Duration;

/// Runs every timer on a dedicated thread driven by a crossbeam ticker.
#[derive(Debug, Clone, Copy)]
pub struct ThreadScheduler;

impl ThreadScheduler {
    pub fn new() -> Self {
        ThreadScheduler
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule_repeating<F>(&self, period: Duration, on_tick: F) -> TimerHandle
    where
        F: Fn() + Send + 'static,
    {
        // Dropping the sender disconnects the stop channel and ends the loop.
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let ticker = tick(period);

        debug!("Starting timer thread with period {:?}", period);
        let worker = thread::spawn(move || {
            loop {
                select! {
                    recv(ticker) -> _ => {
                        trace!("Timer tick");
                        on_tick();
                    }
                    recv(stop_rx) -> _ => break,
                }
            }
            debug!("Timer thread finished");
        });

        TimerHandle::new(move || {
            drop(stop_tx);
            if worker.join().is_err() {
                warn!("Timer thread panicked");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_thread_scheduler_ticks() {
        let scheduler = ThreadScheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();

        let handle = scheduler.schedule_repeating(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // Give the timer a moment to run
        thread::sleep(Duration::from_millis(100));
        handle.cancel();
        assert!(ticks.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn test_no_ticks_after_cancel() {
        let scheduler = ThreadScheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();

        let handle = scheduler.schedule_repeating(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        thread::sleep(Duration::from_millis(30));
        handle.cancel();

        let after_cancel = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(ticks.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn test_first_tick_waits_one_period() {
        let scheduler = ThreadScheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();

        let _handle = scheduler.schedule_repeating(Duration::from_secs(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
