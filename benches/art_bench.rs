//! Overall simple performance bench for a static number of keys in a few
//! scenarios. Here to quickly catch regressions.
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::SliceRandom;
use rand::{thread_rng, Rng};

use radart::AdaptiveRadixTree;

// Variations on the number of keys to insert into the tree for benchmarks
// that measure retrievals.
const TREE_SIZES: [u64; 4] = [1 << 15, 1 << 20, 1 << 22, 1 << 24];

pub fn rand_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_insert");
    group.throughput(Throughput::Elements(1));

    let keys = gen_keys(3, 2, 3);

    group.bench_function("uncached_keys", |b| {
        let mut tree = AdaptiveRadixTree::new();
        let mut rng = thread_rng();
        b.iter(|| {
            let key = &keys[rng.gen_range(0..keys.len())];
            tree.set(key.as_bytes(), key.clone());
        })
    });

    group.finish();
}

pub fn rand_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_remove");
    let keys = gen_keys(3, 2, 3);

    group.throughput(Throughput::Elements(1));
    group.bench_function("uncached_keys", |b| {
        let mut tree = AdaptiveRadixTree::new();
        let mut rng = thread_rng();
        for key in &keys {
            tree.set(key.as_bytes(), key.clone());
        }
        b.iter(|| {
            let key = &keys[rng.gen_range(0..keys.len())];
            criterion::black_box(tree.del(key.as_bytes()));
        })
    });

    group.finish();
}

pub fn rand_get_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_get_str");
    let keys = gen_keys(3, 2, 3);
    group.throughput(Throughput::Elements(1));
    for size in TREE_SIZES {
        group.bench_with_input(BenchmarkId::new("uncached_keys", size), &size, |b, _size| {
            let mut tree = AdaptiveRadixTree::new();
            for (i, key) in keys.iter().enumerate() {
                tree.set(key.as_bytes(), i);
            }
            let mut rng = thread_rng();
            b.iter(|| {
                let key = &keys[rng.gen_range(0..keys.len())];
                criterion::black_box(tree.get(key.as_bytes()));
            })
        });
    }

    group.finish();
}

pub fn seq_get(c: &mut Criterion) {
    for size in TREE_SIZES {
        c.bench_with_input(BenchmarkId::new("seq_get", size), &size, |b, size| {
            let mut tree = AdaptiveRadixTree::new();
            for i in 0..*size {
                tree.set(&i.to_be_bytes(), i);
            }
            b.iter_custom(|iters| {
                let mut k = 0u64;
                let start = Instant::now();
                for _ in 0..iters {
                    if k == *size {
                        k = 0;
                    }
                    tree.get(&k.to_be_bytes()).unwrap();
                    k += 1;
                }
                start.elapsed()
            })
        });
    }
}

pub fn seq_insert(c: &mut Criterion) {
    c.bench_function("seq_insert", |b| {
        let mut tree = AdaptiveRadixTree::new();
        let mut key = 0u64;
        b.iter(|| {
            tree.set(&key.to_be_bytes(), key);
            key += 1;
        })
    });
}

pub fn seq_remove(c: &mut Criterion) {
    for size in TREE_SIZES {
        c.bench_with_input(BenchmarkId::new("seq_remove", size), &size, |b, size| {
            let mut tree = AdaptiveRadixTree::new();
            b.iter_custom(|iters| {
                for i in 0..*size {
                    tree.set(&i.to_be_bytes(), i);
                }
                let mut start = Instant::now();
                let mut cumulative_time = Duration::new(0, 0);
                let mut c = 0u64;
                for _ in 0..iters {
                    if c == *size {
                        cumulative_time += start.elapsed();
                        c = 0;
                        for i in 0..*size {
                            tree.set(&i.to_be_bytes(), i);
                        }
                        start = Instant::now();
                    }
                    tree.del(&c.to_be_bytes()).unwrap();
                    c += 1;
                }
                cumulative_time += start.elapsed();
                cumulative_time
            })
        });
    }
}

fn gen_keys(l1_prefix: usize, l2_prefix: usize, suffix: usize) -> Vec<String> {
    let mut keys = Vec::new();
    let chars: Vec<char> = ('a'..='z').collect();
    for i in 0..chars.len() {
        let level1_prefix = chars[i].to_string().repeat(l1_prefix);
        for i in 0..chars.len() {
            let level2_prefix = chars[i].to_string().repeat(l2_prefix);
            let key_prefix = level1_prefix.clone() + &level2_prefix;
            for _ in 0..=u8::MAX {
                let suffix: String =
                    (0..suffix).map(|_| chars[thread_rng().gen_range(0..chars.len())]).collect();
                let k = key_prefix.clone() + &suffix;
                keys.push(k);
            }
        }
    }

    keys.shuffle(&mut thread_rng());
    keys
}

criterion_group!(rand_benches, rand_get_str, rand_insert, rand_remove);
criterion_group!(seq_benches, seq_get, seq_insert, seq_remove);
criterion_main!(seq_benches, rand_benches);
