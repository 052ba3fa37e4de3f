#![forbid(unsafe_code)]

//! Interval scheduler shared by counters.
//!
//! Callbacks subscribe to an interval. Every subscriber of the same interval
//! shares one timer, so a page of counters ticking once a second runs one
//! timer, not one per counter. The timer is torn down when its last
//! subscriber leaves.
//!
//! Two drivers exist:
//!
//! - [`Scheduler::threaded`]: one background thread per live interval,
//!   sleeping on a condition variable so it can be stopped promptly.
//! - [`Scheduler::manual`]: no threads; the host calls [`Scheduler::fire`]
//!   from its own loop.
//!
//! # Example
//!
//! ```rust
//! use rollex_runtime::Scheduler;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::Duration;
//!
//! let scheduler = Scheduler::manual();
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = hits.clone();
//! let sub = scheduler.subscribe(Duration::from_secs(1), move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! scheduler.fire(Duration::from_secs(1));
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//!
//! drop(sub);
//! assert_eq!(scheduler.timer_count(), 0);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};
use std::thread;
use std::time::{Duration, Instant};

/// Identifies one subscription within a scheduler.
pub type SubId = u64;

type Callback = Arc<dyn Fn() + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sleeping side of a timer's stop flag.
#[derive(Clone)]
struct TimerSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl TimerSignal {
    fn new() -> (Self, TimerTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        (signal, TimerTrigger { inner })
    }

    /// Sleeps for `duration` unless stopped first. Returns `true` if stopped.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (flag, cvar) = &*self.inner;
        let mut stopped = lock(flag);
        let start = Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            stopped = cvar
                .wait_timeout(stopped, duration - elapsed)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|poisoned| poisoned.into_inner().0);
        }
    }
}

/// Waking side of a timer's stop flag.
struct TimerTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl TimerTrigger {
    fn stop(&self) {
        let (flag, cvar) = &*self.inner;
        *lock(flag) = true;
        cvar.notify_all();
    }
}

/// A background timer thread.
struct RunningTimer {
    trigger: TimerTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningTimer {
    /// Signals the thread and hands back its handle for joining later.
    fn stop(mut self) -> Option<thread::JoinHandle<()>> {
        self.trigger.stop();
        self.thread.take()
    }
}

impl Drop for RunningTimer {
    fn drop(&mut self) {
        self.trigger.stop();
    }
}

/// Subscribers of one interval plus the timer driving them.
struct Entry {
    generation: u64,
    callbacks: Vec<(SubId, Callback)>,
    timer: Option<RunningTimer>,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<Duration, Entry>,
    next_id: SubId,
    next_generation: u64,
    /// Stopped timer threads not yet joined.
    retired: Vec<thread::JoinHandle<()>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Driver {
    Threaded,
    Manual,
}

struct Shared {
    driver: Driver,
    registry: Mutex<Registry>,
}

impl Shared {
    /// Runs the callbacks of `interval`, outside the registry lock.
    ///
    /// With `generation` set, only a matching entry fires; a timer that was
    /// torn down must not drive its successor. Returns how many callbacks ran,
    /// or `None` when the entry is gone or belongs to a newer timer.
    fn dispatch(&self, interval: Duration, generation: Option<u64>) -> Option<usize> {
        let callbacks: Vec<Callback> = {
            let registry = lock(&self.registry);
            let entry = registry.entries.get(&interval)?;
            if generation.is_some_and(|g| g != entry.generation) {
                return None;
            }
            entry.callbacks.iter().map(|(_, cb)| cb.clone()).collect()
        };
        for callback in &callbacks {
            callback();
        }
        Some(callbacks.len())
    }

    fn unsubscribe(&self, interval: Duration, id: SubId) {
        let mut registry = lock(&self.registry);
        let Some(entry) = registry.entries.get_mut(&interval) else {
            return;
        };
        entry.callbacks.retain(|(sub, _)| *sub != id);
        tracing::trace!(
            sub_id = id,
            interval_ms = interval.as_millis() as u64,
            remaining = entry.callbacks.len(),
            "unsubscribed"
        );
        if !entry.callbacks.is_empty() {
            return;
        }
        if let Some(entry) = registry.entries.remove(&interval) {
            tracing::debug!(
                interval_ms = interval.as_millis() as u64,
                generation = entry.generation,
                "stopping interval timer"
            );
            registry.retired.retain(|handle| !handle.is_finished());
            // Joining here could wait on the calling thread itself.
            if let Some(handle) = entry.timer.and_then(RunningTimer::stop) {
                registry.retired.push(handle);
            }
        }
    }
}

fn spawn_timer(shared: Weak<Shared>, interval: Duration, generation: u64) -> Option<RunningTimer> {
    let (signal, trigger) = TimerSignal::new();
    let spawned = thread::Builder::new()
        .name(format!("rollex-timer-{}ms", interval.as_millis()))
        .spawn(move || {
            let mut fired: u64 = 0;
            loop {
                if signal.wait_timeout(interval) {
                    break;
                }
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                if shared.dispatch(interval, Some(generation)).is_none() {
                    break;
                }
                fired += 1;
            }
            tracing::trace!(
                interval_ms = interval.as_millis() as u64,
                generation,
                fired,
                "interval timer exited"
            );
        });
    match spawned {
        Ok(handle) => Some(RunningTimer {
            trigger,
            thread: Some(handle),
        }),
        Err(err) => {
            tracing::warn!(
                interval_ms = interval.as_millis() as u64,
                error = %err,
                "failed to spawn interval timer"
            );
            None
        }
    }
}

/// Coalescing interval scheduler.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
}

impl Scheduler {
    fn with_driver(driver: Driver) -> Self {
        Self {
            shared: Arc::new(Shared {
                driver,
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    /// Scheduler that runs a background thread per live interval.
    pub fn threaded() -> Self {
        Self::with_driver(Driver::Threaded)
    }

    /// Scheduler without threads, driven by [`Scheduler::fire`].
    pub fn manual() -> Self {
        Self::with_driver(Driver::Manual)
    }

    /// Whether timers run on their own threads.
    pub fn is_threaded(&self) -> bool {
        self.shared.driver == Driver::Threaded
    }

    /// Registers `callback` to run every `interval`.
    ///
    /// The first subscriber of an interval starts its timer. The callback
    /// runs until the returned [`Subscription`] is cancelled or dropped.
    pub fn subscribe(
        &self,
        interval: Duration,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        let mut registry = lock(&self.shared.registry);
        let id = registry.next_id;
        registry.next_id += 1;

        if !registry.entries.contains_key(&interval) {
            let generation = registry.next_generation;
            registry.next_generation += 1;
            let timer = match self.shared.driver {
                Driver::Threaded => {
                    spawn_timer(Arc::downgrade(&self.shared), interval, generation)
                }
                Driver::Manual => None,
            };
            tracing::debug!(
                interval_ms = interval.as_millis() as u64,
                generation,
                threaded = timer.is_some(),
                "starting interval timer"
            );
            registry.entries.insert(
                interval,
                Entry {
                    generation,
                    callbacks: Vec::new(),
                    timer,
                },
            );
        }
        let callback: Callback = Arc::new(callback);
        if let Some(entry) = registry.entries.get_mut(&interval) {
            entry.callbacks.push((id, callback));
            tracing::trace!(
                sub_id = id,
                interval_ms = interval.as_millis() as u64,
                subscribers = entry.callbacks.len(),
                "subscribed"
            );
        }

        Subscription {
            shared: Arc::downgrade(&self.shared),
            interval,
            id,
            active: true,
        }
    }

    /// Runs every callback subscribed to `interval` once, on this thread.
    ///
    /// Returns how many callbacks ran. Works with either driver.
    pub fn fire(&self, interval: Duration) -> usize {
        self.shared.dispatch(interval, None).unwrap_or(0)
    }

    /// Number of live intervals, each backed by one timer.
    pub fn timer_count(&self) -> usize {
        lock(&self.shared.registry).entries.len()
    }

    /// Number of callbacks subscribed to `interval`.
    pub fn subscriber_count(&self, interval: Duration) -> usize {
        lock(&self.shared.registry)
            .entries
            .get(&interval)
            .map_or(0, |entry| entry.callbacks.len())
    }

    /// Live intervals, shortest first.
    pub fn intervals(&self) -> Vec<Duration> {
        let mut intervals: Vec<Duration> =
            lock(&self.shared.registry).entries.keys().copied().collect();
        intervals.sort();
        intervals
    }

    /// Stops every timer, drops every subscriber and joins timer threads.
    ///
    /// Outstanding [`Subscription`]s become inert. Called from inside a
    /// callback, the calling timer thread is signalled but not joined.
    pub fn shutdown(&self) {
        let handles: Vec<thread::JoinHandle<()>> = {
            let mut registry = lock(&self.shared.registry);
            let mut handles: Vec<_> = registry.retired.drain(..).collect();
            let entries: Vec<Entry> = registry.entries.drain().map(|(_, e)| e).collect();
            for entry in entries {
                handles.extend(entry.timer.and_then(RunningTimer::stop));
            }
            handles
        };
        let current = thread::current().id();
        let count = handles.len();
        for handle in handles {
            if handle.thread().id() != current {
                let _ = handle.join();
            }
        }
        tracing::debug!(joined = count, "scheduler shut down");
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::threaded()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("driver", &self.shared.driver)
            .field("timers", &self.timer_count())
            .finish()
    }
}

/// Handle to one subscribed callback.
///
/// Cancelling is idempotent and also happens on drop.
pub struct Subscription {
    shared: Weak<Shared>,
    interval: Duration,
    id: SubId,
    active: bool,
}

impl Subscription {
    pub fn id(&self) -> SubId {
        self.id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Removes the callback. Returns `false` if it was already removed.
    pub fn cancel(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        if let Some(shared) = self.shared.upgrade() {
            shared.unsubscribe(self.interval, self.id);
        }
        true
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("interval", &self.interval)
            .field("active", &self.active)
            .finish()
    }
}
