//! Benchmarks for the countdown calculator.
//!
//! Run with: cargo bench -p rollex-core

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rollex_core::calculator::period_numbers;
use rollex_core::digits::{DigitBounds, format_digits};
use rollex_core::{Countdown, CounterProps, Period, render_line};
use std::hint::black_box;

// =============================================================================
// Breakdown
// =============================================================================

fn bench_period_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculator/period_numbers");
    for max in Period::ALL {
        let span = Period::span(max, Period::Seconds);
        group.bench_with_input(BenchmarkId::from_parameter(max), &span, |b, span| {
            b.iter(|| period_numbers(black_box(span), black_box(17_432_987_000)))
        });
    }
    group.finish();
}

// =============================================================================
// Digit formatting
// =============================================================================

fn bench_format_digits(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculator/format_digits");
    for radix in [2u32, 10, 16, 36] {
        group.bench_with_input(BenchmarkId::from_parameter(radix), &radix, |b, &radix| {
            b.iter(|| format_digits(black_box(987_654_321), DigitBounds::exact(12), radix))
        });
    }
    group.bench_function("saturated", |b| {
        b.iter(|| format_digits(black_box(987_654_321), DigitBounds::exact(3), 10))
    });
    group.finish();
}

// =============================================================================
// Full tick
// =============================================================================

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("countdown/tick");
    for ticks in [60u64, 3_600] {
        group.throughput(Throughput::Elements(ticks));
        group.bench_with_input(BenchmarkId::from_parameter(ticks), &ticks, |b, &ticks| {
            b.iter(|| {
                let props = CounterProps::new().seconds(ticks as i64);
                let Ok(mut countdown) = Countdown::new(&props, 0) else {
                    return;
                };
                for i in 1..=ticks {
                    countdown.tick(black_box(i as i64 * 1_000));
                }
                black_box(countdown.snapshot());
            })
        });
    }
    group.finish();
}

fn bench_render_line(c: &mut Criterion) {
    let props = CounterProps::new()
        .seconds(1_234_567)
        .separator(":")
        .map_digit("0", "o");
    let Ok(countdown) = Countdown::new(&props, 0) else {
        return;
    };
    c.bench_function("segment/render_line", |b| {
        b.iter(|| render_line(black_box(&countdown.segments())))
    });
}

criterion_group!(
    benches,
    bench_period_numbers,
    bench_format_digits,
    bench_tick,
    bench_render_line
);
criterion_main!(benches);
