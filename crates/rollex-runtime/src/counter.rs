#![forbid(unsafe_code)]

//! Counter lifecycle: a [`Countdown`] driven by a [`Scheduler`].
//!
//! A [`Counter`] owns its countdown behind a mutex and, while running, one
//! scheduler subscription. Ticks from the scheduler and calls from the host
//! are serialised by that mutex.
//!
//! # Example
//!
//! ```rust
//! use rollex_core::{CounterProps, Period};
//! use rollex_runtime::{Counter, ManualClock, Scheduler};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let scheduler = Scheduler::manual();
//! let clock = Arc::new(ManualClock::new(0));
//! let counter = Counter::with_clock(&CounterProps::new().seconds(3), &scheduler, clock).unwrap();
//!
//! assert!(counter.mount());
//! scheduler.fire(Duration::from_secs(1));
//! assert_eq!(counter.state().digits[Period::Seconds], vec!['0', '2']);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use rollex_core::{ConfigError, Countdown, CounterProps, Segment, Snapshot, Tick};

use crate::clock::{Clock, SystemClock};
use crate::scheduler::{Scheduler, Subscription};

struct CounterState {
    countdown: Countdown,
    subscription: Option<Subscription>,
    /// Bumped on every start; a scheduled tick only applies to its own run.
    run: u64,
    frozen: bool,
}

struct Inner {
    state: Mutex<CounterState>,
    clock: Arc<dyn Clock>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, CounterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One tick. A subscription released by reaching the end is dropped
    /// after the state lock is released.
    fn tick(&self) -> Tick {
        self.tick_if(|_| true)
    }

    /// Tick from the scheduler for run `run`. A callback already collected by
    /// the scheduler when the counter stopped lands here and is ignored.
    fn scheduled_tick(&self, run: u64) -> Tick {
        self.tick_if(|state| state.subscription.is_some() && state.run == run)
    }

    fn tick_if(&self, live: impl FnOnce(&CounterState) -> bool) -> Tick {
        let now = self.clock.now_ms();
        let (tick, released) = {
            let mut state = self.lock();
            if !live(&*state) {
                tracing::trace!(run = state.run, "stale scheduled tick ignored");
                return Tick::Idle;
            }
            let tick = state.countdown.tick(now);
            let released = match tick {
                Tick::Finished => state.subscription.take(),
                Tick::Advanced | Tick::Idle => None,
            };
            (tick, released)
        };
        if released.is_some() {
            tracing::debug!("counter finished, leaving scheduler");
        }
        drop(released);
        tick
    }
}

/// A live counter.
///
/// Dropping the handle stops it.
pub struct Counter {
    inner: Arc<Inner>,
    scheduler: Scheduler,
}

impl Counter {
    /// Builds a counter on the system clock. Does not start it.
    pub fn create(props: &CounterProps, scheduler: &Scheduler) -> Result<Self, ConfigError> {
        Self::with_clock(props, scheduler, Arc::new(SystemClock))
    }

    /// Builds a counter reading time from `clock`. Does not start it.
    pub fn with_clock(
        props: &CounterProps,
        scheduler: &Scheduler,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let countdown = Countdown::new(props, clock.now_ms())?;
        tracing::debug!(
            initial_ms = countdown.initial_ms(),
            interval_ms = countdown.settings().interval_ms,
            frozen = countdown.settings().frozen,
            "counter created"
        );
        let frozen = countdown.settings().frozen;
        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(CounterState {
                    countdown,
                    subscription: None,
                    run: 0,
                    frozen,
                }),
                clock,
            }),
            scheduler: scheduler.clone(),
        })
    }

    /// Advances once using the clock.
    pub fn tick(&self) -> Tick {
        self.inner.tick()
    }

    /// Subscribes to the scheduler.
    ///
    /// Returns `false` when already running or finished.
    pub fn start(&self) -> bool {
        let mut state = self.inner.lock();
        if state.subscription.is_some() || state.countdown.finished() {
            tracing::trace!(
                running = state.subscription.is_some(),
                finished = state.countdown.finished(),
                "counter start rejected"
            );
            return false;
        }
        let interval = Duration::from_millis(state.countdown.settings().interval_ms);
        state.run += 1;
        let run = state.run;
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let subscription = self.scheduler.subscribe(interval, move || {
            if let Some(inner) = weak.upgrade() {
                inner.scheduled_tick(run);
            }
        });
        tracing::debug!(sub_id = subscription.id(), "counter started");
        state.subscription = Some(subscription);
        true
    }

    /// Leaves the scheduler. Returns `false` when not running.
    pub fn stop(&self) -> bool {
        let released = self.inner.lock().subscription.take();
        match released {
            Some(subscription) => {
                tracing::debug!(sub_id = subscription.id(), "counter stopped");
                drop(subscription);
                true
            }
            None => false,
        }
    }

    /// Starts unless frozen.
    pub fn mount(&self) -> bool {
        if self.frozen() {
            return false;
        }
        self.start()
    }

    /// Freezing stops the counter; thawing starts it again.
    pub fn set_frozen(&self, frozen: bool) {
        self.inner.lock().frozen = frozen;
        if frozen {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn frozen(&self) -> bool {
        self.inner.lock().frozen
    }

    pub fn state(&self) -> Snapshot {
        self.inner.lock().countdown.snapshot()
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.inner.lock().countdown.segments()
    }

    /// Style classes for the current display mode and freeze state.
    pub fn class_names(&self) -> String {
        let state = self.inner.lock();
        state.countdown.settings().display.class_names(state.frozen)
    }

    pub fn running(&self) -> bool {
        self.inner.lock().subscription.is_some()
    }

    pub fn finished(&self) -> bool {
        self.inner.lock().countdown.finished()
    }
}

impl Drop for Counter {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("Counter")
            .field("remaining_ms", &state.countdown.remaining_ms())
            .field("running", &state.subscription.is_some())
            .field("frozen", &state.frozen)
            .finish()
    }
}
