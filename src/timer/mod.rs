//! Repeating timers
//!
//! - [`Scheduler`] starts a repeating callback and returns a [`TimerHandle`]
//! - [`ThreadScheduler`] runs each timer on its own thread
//! - [`ManualScheduler`] fires ticks on demand and counts timers, for tests
//!
//! A handle cancels its timer when cancelled explicitly or when dropped, so an
//! owner that goes away cannot leave a callback running.

mod mock;
mod thread;

use std::fmt;
use std::time::Duration;

pub use self::mock::ManualScheduler;
pub use self::thread::ThreadScheduler;

pub trait Scheduler {
    /// Calls `tick` every `period` until the returned handle is cancelled or dropped.
    /// The first call happens one period after scheduling.
    fn schedule_repeating<F>(&self, period: Duration, tick: F) -> TimerHandle
    where
        F: Fn() + Send + 'static;
}

/// Ownership of one running timer.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new<C>(cancel: C) -> Self
    where
        C: FnOnce() + Send + 'static,
    {
        TimerHandle {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stops the timer. No tick is delivered after this returns.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_handle_cancels_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handle = TimerHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_cancels() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        {
            let _handle = TimerHandle::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
