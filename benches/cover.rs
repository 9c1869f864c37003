//! Benchmarks for closure and canonical cover computation.
//!
//! Run with:
//! ```bash
//! cargo bench --bench cover
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fd_cover::cover::{canonical_cover, remove_redundant, simplify};
use fd_cover::fd::{Fd, FdSet};
use fd_cover::schema::Schema;
use fd_cover::types::{Attr, AttrSet};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Attribute names `a0`, `a1`, ...
fn universe(size: usize) -> Vec<Attr> {
    (0..size).map(|i| Attr::new(format!("a{}", i))).collect()
}

/// Generate a deterministic random dependency set for reproducible benchmarks.
fn random_fds(seed: u64, attrs: &[Attr], count: usize) -> FdSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pick = |max: usize| -> AttrSet {
        let n = rng.random_range(1..=max);
        (0..n).map(|_| attrs[rng.random_range(0..attrs.len())].clone()).collect()
    };
    let mut fds = FdSet::new();
    while fds.len() < count {
        let lhs = pick(2);
        let rhs = pick(2);
        if let Ok(fd) = Fd::new(lhs, rhs) {
            fds.insert(fd);
        }
    }
    fds
}

// ============================================================================
// Benchmark: Closure
// ============================================================================

fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");

    for count in [16, 64, 256] {
        let attrs = universe(32);
        let fds = simplify(&random_fds(42, &attrs, count));
        let seeds: Vec<AttrSet> = attrs.iter().cloned().map(AttrSet::single).collect();

        group.throughput(Throughput::Elements(seeds.len() as u64));
        group.bench_with_input(BenchmarkId::new("random", count), &seeds, |b, seeds| {
            b.iter(|| seeds.iter().map(|seed| fds.closure(seed).len()).sum::<usize>());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Redundancy elimination
// ============================================================================

fn bench_remove_redundant(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_redundant");

    for count in [16, 64, 128] {
        let attrs = universe(32);
        let fds = simplify(&random_fds(42, &attrs, count));

        group.throughput(Throughput::Elements(fds.len() as u64));
        group.bench_with_input(BenchmarkId::new("random", count), &fds, |b, fds| {
            b.iter(|| remove_redundant(fds));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Full pipeline
// ============================================================================

fn bench_canonical_cover(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_cover");

    for count in [16, 64, 128] {
        let attrs = universe(40);
        let fds = random_fds(123, &attrs, count);
        // A quarter of the attributes fall outside the relation
        let schema = Schema::new(attrs[..30].iter().cloned()).unwrap();

        group.bench_with_input(BenchmarkId::new("random", count), &fds, |b, fds| {
            b.iter(|| canonical_cover(fds, &schema));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_closure, bench_remove_redundant, bench_canonical_cover);

criterion_main!(benches);
