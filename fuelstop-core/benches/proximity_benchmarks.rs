//! Criterion benchmarks for the proximity index.
//!
//! Measures index build and route query time across catalog sizes to track
//! performance and detect regressions.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package fuelstop-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use fuelstop_core::{ProximityIndex, Station};

/// Seed shared by every generated input.
const BENCHMARK_SEED: u64 = 0x00F0_E15C;

/// Catalog sizes to benchmark.
const CATALOG_SIZES: &[usize] = &[1_000, 10_000, 50_000];

/// Points on the benchmark route.
const ROUTE_POINTS: u32 = 2_000;

const RADIUS_MILES: f64 = 5.0;

/// Stations spread over the continental United States.
fn generate_catalog(size: usize, seed: u64) -> Vec<Station> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size)
        .map(|id| {
            let lat = rng.gen_range(25.0..49.0);
            let lon = rng.gen_range(-124.0..-67.0);
            let price = rng.gen_range(2.5..5.0);
            Station::new(format!("Station {id}"), lat, lon, price, format!("Exit {id}"))
        })
        .collect()
}

/// A straight cross-country route from Los Angeles to New York.
#[expect(clippy::float_arithmetic, reason = "route interpolation")]
fn generate_route() -> Vec<Coord<f64>> {
    let (start, end) = (Coord { x: -118.24, y: 34.05 }, Coord { x: -74.01, y: 40.71 });
    (0..=ROUTE_POINTS)
        .map(|step| {
            let t = f64::from(step) / f64::from(ROUTE_POINTS);
            Coord {
                x: start.x + (end.x - start.x) * t,
                y: start.y + (end.y - start.y) * t,
            }
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for &size in CATALOG_SIZES {
        let catalog = generate_catalog(size, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::new("stations", size), &catalog, |b, catalog| {
            b.iter(|| ProximityIndex::build(catalog, RADIUS_MILES));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_query");
    let route = generate_route();
    for &size in CATALOG_SIZES {
        let catalog = generate_catalog(size, BENCHMARK_SEED);
        let Ok(index) = ProximityIndex::build(&catalog, RADIUS_MILES) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("stations", size), &index, |b, index| {
            b.iter(|| index.query_route(&route));
        });
        group.bench_with_input(BenchmarkId::new("batched_500", size), &index, |b, index| {
            b.iter(|| index.query_route_batched(&route, 500));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
