#![forbid(unsafe_code)]

//! Lifecycle logging tests.
//!
//! A capturing layer records every event emitted while counters start, tick
//! and stop on a manual scheduler. Everything runs on the test thread, so a
//! thread-local default subscriber sees all of it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rollex_core::CounterProps;
use rollex_runtime::{Counter, ManualClock, Scheduler};
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    message: String,
    fields: HashMap<String, String>,
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(HashMap::new());
        event.record(&mut visitor);
        let message = visitor.0.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            message,
            fields: visitor.0,
        });
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}

fn messages(events: &[CapturedEvent]) -> Vec<&str> {
    events.iter().map(|e| e.message.as_str()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn timer_lifecycle_is_logged() {
    let (_, events) = capture(|| {
        let scheduler = Scheduler::manual();
        let sub = scheduler.subscribe(Duration::from_millis(500), || {});
        drop(sub);
    });
    let msgs = messages(&events);
    assert!(msgs.contains(&"starting interval timer"), "{msgs:?}");
    assert!(msgs.contains(&"stopping interval timer"), "{msgs:?}");

    let start = events
        .iter()
        .find(|e| e.message == "starting interval timer")
        .expect("start event");
    assert_eq!(start.fields.get("interval_ms").map(String::as_str), Some("500"));
    assert_eq!(start.fields.get("threaded").map(String::as_str), Some("false"));
}

#[test]
fn counter_lifecycle_is_logged() {
    let (_, events) = capture(|| {
        let scheduler = Scheduler::manual();
        let clock = Arc::new(ManualClock::new(0));
        let counter = Counter::with_clock(&CounterProps::new().seconds(1), &scheduler, clock)
            .expect("valid props");
        counter.start();
        scheduler.fire(Duration::from_secs(1));
    });
    let msgs = messages(&events);
    let order: Vec<usize> = [
        "counter created",
        "counter started",
        "counter finished, leaving scheduler",
        "stopping interval timer",
    ]
    .iter()
    .map(|m| msgs.iter().position(|x| x == m).unwrap_or(usize::MAX))
    .collect();
    assert!(order.iter().all(|&i| i != usize::MAX), "{msgs:?}");
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{msgs:?}");
}

#[test]
fn rejected_start_is_traced() {
    let (_, events) = capture(|| {
        let scheduler = Scheduler::manual();
        let counter = Counter::create(&CounterProps::new().seconds(0), &scheduler)
            .expect("valid props");
        assert!(!counter.start());
    });
    let rejected = events
        .iter()
        .find(|e| e.message == "counter start rejected")
        .expect("rejection event");
    assert_eq!(rejected.fields.get("finished").map(String::as_str), Some("true"));
}
