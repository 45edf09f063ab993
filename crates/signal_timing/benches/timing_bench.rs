//! Criterion benchmarks for the timing core.
//!
//! Benchmarks:
//!   - TimingCalculator::calculate over a rush-hour count stream
//!   - TimingCalculator::statistics over a full history window
//!   - MultiSignalOrchestrator update + count broadcast for 64 signals
//!
//! Run with: cargo bench -p signal_timing --bench timing_bench

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use signal_timing::count_feed::{CountPattern, VehicleCountFeed};
use signal_timing::phase_machine::TickClock;
use signal_timing::{MultiSignalOrchestrator, TimingCalculator, TimingParams};

// ---------------------------------------------------------------------------
// Benchmark: calculator
// ---------------------------------------------------------------------------

fn bench_calculator(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing_calculator");
    group.sample_size(1000);

    let counts: Vec<i64> = VehicleCountFeed::default()
        .take(900)
        .into_iter()
        .map(i64::from)
        .collect();

    group.bench_function("calculate_rush_hour_900", |b| {
        let mut calc = TimingCalculator::default();
        b.iter(|| {
            for &count in &counts {
                black_box(calc.calculate(black_box(count)));
            }
        });
    });

    let mut calc = TimingCalculator::default();
    for &count in counts.iter().take(20) {
        calc.calculate(count);
    }
    group.bench_function("statistics_full_window", |b| {
        b.iter(|| black_box(calc.statistics()));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: orchestrator broadcast
// ---------------------------------------------------------------------------

fn bench_orchestrator(c: &mut Criterion) {
    let mut group = c.benchmark_group("orchestrator");
    group.sample_size(100);

    let clock = TickClock::new();
    let mut orchestrator = MultiSignalOrchestrator::new(Arc::new(clock.clone()));
    let ids: Vec<String> = (0..64).map(|i| format!("signal_{i:02}")).collect();
    for id in &ids {
        orchestrator.register(id, "approach", TimingParams::default());
    }
    orchestrator.start_all();

    let mut feed = VehicleCountFeed::from_seed_u64(42, CountPattern::Uniform { max: 40 });

    group.bench_function("tick_and_count_64_signals", |b| {
        b.iter(|| {
            clock.advance_secs(1);
            for id in &ids {
                black_box(orchestrator.update_vehicle_count(id, i64::from(feed.next_count())));
            }
            orchestrator.update();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_calculator, bench_orchestrator);
criterion_main!(benches);
