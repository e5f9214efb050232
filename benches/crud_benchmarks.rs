use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rb_cursor_map::{CursorId, RBTreeMap};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Key sequences ──────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

/// Deterministic pseudo-random keys from an LCG.
fn random_keys(n: usize) -> Vec<i64> {
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── put / get / remove against BTreeMap ────────────────────────────────────

fn bench_put(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("put_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    map.put(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_get(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        let mut group = c.benchmark_group(format!("get_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for k in &keys {
                    if let Some(&v) = rb_map.get(k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for k in &keys {
                    if let Some(&v) = bt_map.get(k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.finish();
    }
}

fn bench_remove(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        let mut group = c.benchmark_group(format!("remove_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter_batched(
                || rb_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || bt_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });

        group.finish();
    }
}

// ─── Cursors and ranks ──────────────────────────────────────────────────────

fn bench_cursor_walk(c: &mut Criterion) {
    let mut map: RBTreeMap<i64, i64> = random_keys(N).into_iter().map(|k| (k, k)).collect();
    let mut group = c.benchmark_group("cursor_walk");

    group.bench_function(BenchmarkId::new("forth", N), |b| {
        b.iter(|| {
            let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
            let mut sum = 0i64;
            cursor.start();
            while !cursor.is_off() {
                sum = sum.wrapping_add(*cursor.item_at());
                cursor.forth();
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("go", N), |b| {
        b.iter(|| {
            let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
            let mut sum = 0i64;
            for index in 0..N {
                cursor.go(index);
                sum = sum.wrapping_add(*cursor.item_at());
            }
            sum
        });
    });

    group.finish();
}

fn bench_cursor_drain(c: &mut Criterion) {
    let map: RBTreeMap<i64, i64> = random_keys(N).into_iter().map(|k| (k, k)).collect();

    c.bench_function("cursor_drain", |b| {
        b.iter_batched(
            || {
                let mut map = map.clone();
                let watchers: Vec<CursorId> = (0..8).map(|_| map.new_cursor()).collect();
                for (i, &id) in watchers.iter().enumerate() {
                    map.cursor_mut(id).go(i * N / 8);
                }
                map
            },
            |mut map| {
                let mut cursor = map.cursor_mut(CursorId::BUILT_IN);
                cursor.start();
                while !cursor.is_off() {
                    black_box(cursor.remove());
                }
                map
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let mut group = c.benchmark_group("rank");

    group.bench_function(BenchmarkId::new("rank_of", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in &keys {
                sum = sum.wrapping_add(map.rank_of(k).unwrap_or(0));
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("get_by_rank", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in 0..N {
                if let Some((_, &v)) = map.get_by_rank(rank) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(crud_benches, bench_put, bench_get, bench_remove);

criterion_group!(cursor_benches, bench_cursor_walk, bench_cursor_drain, bench_rank);

criterion_main!(crud_benches, cursor_benches);
