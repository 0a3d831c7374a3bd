use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use cuidgen::{
    AtomicCuidGenerator, BasicCuidGenerator, CuidConfig, CuidGenerator, LockCuidGenerator,
    RandSource, SecureRandom, ThreadRandom, TimeSource, WallClock, cuid, is_cuid,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource<u64> for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks a single generator driven from one thread.
fn bench_generator<G, T, R>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: CuidGenerator<T, R>,
    T: TimeSource<u64>,
    R: RandSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.create());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared by several threads.
fn bench_generator_contended<G, T, R>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> G,
) where
    G: CuidGenerator<T, R> + Send + Sync,
    T: TimeSource<u64>,
    R: RandSource,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8, 16] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(format!("elems/{TOTAL_IDS}/threads/{thread_count}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();

                for _ in 0..iters {
                    let generator = Arc::new(generator_fn());
                    let barrier = Arc::new(Barrier::new(thread_count + 1));
                    scope(|s| {
                        for _ in 0..thread_count {
                            let generator = Arc::clone(&generator);
                            let barrier = Arc::clone(&barrier);
                            s.spawn(move || {
                                barrier.wait();
                                for _ in 0..ids_per_thread {
                                    black_box(generator.create());
                                }
                            });
                        }
                        barrier.wait();
                    });
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

// --- MOCK CLOCK ---

fn benchmark_mock_sequential_basic(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/basic", || {
        BasicCuidGenerator::new(FixedMockTime { millis: 1 }, ThreadRandom)
    });
}

fn benchmark_mock_sequential_lock(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/lock", || {
        LockCuidGenerator::new(FixedMockTime { millis: 1 }, ThreadRandom)
    });
}

fn benchmark_mock_sequential_atomic(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/atomic", || {
        AtomicCuidGenerator::new(FixedMockTime { millis: 1 }, ThreadRandom)
    });
}

fn benchmark_mock_contended_lock(c: &mut Criterion) {
    bench_generator_contended(c, "mock/contended/lock", || {
        LockCuidGenerator::new(FixedMockTime { millis: 1 }, ThreadRandom)
    });
}

/// Threads may spin on CAS failures.
fn benchmark_mock_contended_atomic(c: &mut Criterion) {
    bench_generator_contended(c, "mock/contended/atomic", || {
        AtomicCuidGenerator::new(FixedMockTime { millis: 1 }, ThreadRandom)
    });
}

// --- WALL CLOCK + OS RANDOMNESS ---

fn benchmark_secure_sequential_basic(c: &mut Criterion) {
    bench_generator(c, "secure/sequential/basic", || {
        BasicCuidGenerator::new(WallClock, SecureRandom::new())
    });
}

fn benchmark_secure_contended_atomic(c: &mut Criterion) {
    bench_generator_contended(c, "secure/contended/atomic", || {
        AtomicCuidGenerator::new(WallClock, SecureRandom::new())
    });
}

fn benchmark_secure_sequential_long(c: &mut Criterion) {
    bench_generator(c, "secure/sequential/basic/len-32", || {
        BasicCuidGenerator::from_config(
            CuidConfig::new().with_length(32),
            WallClock,
            SecureRandom::new(),
        )
        .unwrap()
    });
}

// --- THREAD LOCAL ---

fn benchmark_thread_local(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread-local");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(cuid());
            }
        });
    });
    group.finish();
}

// --- VALIDATION ---

fn benchmark_is_cuid(c: &mut Criterion) {
    let ids: Vec<_> = (0..TOTAL_IDS).map(|_| cuid()).collect();
    let mut group = c.benchmark_group("validate");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("is_cuid/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for id in &ids {
                black_box(is_cuid(black_box(id)));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential_basic,
    benchmark_mock_sequential_lock,
    benchmark_mock_sequential_atomic,
    benchmark_mock_contended_lock,
    benchmark_mock_contended_atomic,
    // Wall clock
    benchmark_secure_sequential_basic,
    benchmark_secure_contended_atomic,
    benchmark_secure_sequential_long,
    // Free functions
    benchmark_thread_local,
    benchmark_is_cuid,
);
criterion_main!(benches);
