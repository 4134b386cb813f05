//! Performance benchmarks for the rotation engine.
//!
//! This benchmark suite covers:
//! - Resolving a single week
//! - Generating a year of schedule rows, with and without approved swaps
//! - Coverage over a quarter
//! - A schedule request through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tower::ServiceExt;

use rotation_engine::api::{AppState, create_router};
use rotation_engine::config::TeamConfig;
use rotation_engine::engine::RotationEngine;
use rotation_engine::ledger::SwapSubmission;
use rotation_engine::models::{Approver, Decision, Engineer, PtoRecord, Role};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid bench date")
}

/// Creates an engine for a roster of `size` engineers.
fn create_engine(size: usize) -> RotationEngine {
    let engineers = (0..size)
        .map(|i| {
            let letter = char::from(b'A' + (i % 26) as u8);
            Engineer::new(&format!("Engineer {}", i), letter, "US", Some("CA"))
        })
        .collect();
    let config = TeamConfig::new(engineers, 2, date("2024-01-01")).expect("valid roster");
    RotationEngine::new(config).with_pto(vec![
        PtoRecord::range("Engineer 0", date("2024-03-06"), date("2024-03-08")),
        PtoRecord::dates("Engineer 1", vec![date("2024-05-20"), date("2024-08-14")]),
    ])
}

/// Benchmark: one fully resolved week.
fn bench_single_week(c: &mut Criterion) {
    let engine = create_engine(6);

    c.bench_function("single_week", |b| {
        b.iter(|| black_box(engine.week_schedule(black_box(date("2024-03-06"))).unwrap()))
    });
}

/// Benchmark: a year of schedule rows for growing teams.
fn bench_generate_year(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_schedule_52_weeks");

    for size in [4usize, 6, 12, 24] {
        let engine = create_engine(size);
        group.throughput(Throughput::Elements((size * 52 * 5) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.generate_schedule(date("2024-01-01"), 52).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark: a year of schedule rows with approved swaps in the ledger.
fn bench_generate_with_swaps(c: &mut Criterion) {
    let engine = RotationEngine::new(TeamConfig::default_team());
    let admin = Approver::new("bench", Role::Admin);
    // Blake is off on these Wednesdays; the rotation repeats every eight weeks.
    for week in 0..6 {
        let wednesday = date("2024-03-06") + chrono::Duration::weeks(week * 8);
        let submission = SwapSubmission::new("Alex", "Blake", wednesday, "bench");
        if let Ok(swap) = engine.request_swap_as_of(submission, date("2024-03-01")) {
            let _ = engine.decide_swap(swap.id, &admin, Decision::Approve);
        }
    }

    c.bench_function("generate_schedule_with_swaps", |b| {
        b.iter(|| black_box(engine.generate_schedule(date("2024-01-01"), 52).unwrap()))
    });
}

/// Benchmark: coverage over a quarter.
fn bench_coverage_quarter(c: &mut Criterion) {
    let engine = create_engine(6);

    c.bench_function("coverage_quarter", |b| {
        b.iter(|| black_box(engine.coverage(date("2024-01-01"), date("2024-03-29")).unwrap()))
    });
}

/// Benchmark: GET /schedule for eight weeks through the router.
fn bench_schedule_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let router = create_router(AppState::new(create_engine(6)));

    c.bench_function("schedule_endpoint_8_weeks", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/schedule?start=2024-03-04&weeks=8")
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_week,
    bench_generate_year,
    bench_generate_with_swaps,
    bench_coverage_quarter,
    bench_schedule_endpoint
);
criterion_main!(benches);
