use avl_map::AvlMap;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter(|| {
            let mut map = AvlMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in keys {
                map.entry(k).or_insert(k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "map_insert_ordered", &ordered_keys(N));
}

fn bench_map_insert_reverse(c: &mut Criterion) {
    bench_insert(c, "map_insert_reverse", &reverse_ordered_keys(N));
}

fn bench_map_insert_random(c: &mut Criterion) {
    bench_insert(c, "map_insert_random", &random_keys(N));
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = avl.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("AvlMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<AvlMap<i64, i64>>(),
            |mut map| {
                for k in keys {
                    map.remove(k);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for k in keys {
                    map.remove(k);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_map_remove_ordered(c: &mut Criterion) {
    bench_remove(c, "map_remove_ordered", &ordered_keys(N));
}

fn bench_map_remove_random(c: &mut Criterion) {
    bench_remove(c, "map_remove_random", &random_keys(N));
}

// ─── Traversal ──────────────────────────────────────────────────────────────

fn bench_map_traverse(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_traverse");

    group.bench_function(BenchmarkId::new("AvlMap::iter", N), |b| {
        b.iter(|| avl.iter().fold(0i64, |sum, (_, &v)| sum.wrapping_add(v)));
    });

    group.bench_function(BenchmarkId::new("AvlMap::cursor", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let mut cursor = avl.begin();
            while let Ok((_, &v)) = avl.get_at(cursor) {
                sum = sum.wrapping_add(v);
                cursor = black_box(avl.successor(cursor)).unwrap_or(avl.end());
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap::iter", N), |b| {
        b.iter(|| bt.iter().fold(0i64, |sum, (_, &v)| sum.wrapping_add(v)));
    });

    group.finish();
}

fn bench_map_clone(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl: AvlMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_clone");
    group.bench_function(BenchmarkId::new("AvlMap", N), |b| b.iter(|| avl.clone()));
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| b.iter(|| bt.clone()));
    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_insert_benches, bench_map_insert_ordered, bench_map_insert_reverse, bench_map_insert_random,);

criterion_group!(map_get_benches, bench_map_get_random,);

criterion_group!(map_remove_benches, bench_map_remove_ordered, bench_map_remove_random,);

criterion_group!(map_traverse_benches, bench_map_traverse, bench_map_clone,);

criterion_main!(map_insert_benches, map_get_benches, map_remove_benches, map_traverse_benches,);
