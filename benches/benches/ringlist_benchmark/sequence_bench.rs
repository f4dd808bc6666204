use std::{collections::VecDeque, hint::black_box, time::Duration};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use ringlist::{CircularBuffer, SinglyLinkedList};

const SIZES: [usize; 3] = [100usize, 1_000usize, 10_000usize];
const RANDOM_ACCESSES: usize = 1_000;

// Helper: fill containers with sequential integers 0..n-1
fn fill_buffer(n: usize) -> CircularBuffer<i32> {
    (0..n as i32).collect()
}

fn fill_list(n: usize) -> SinglyLinkedList<i32> {
    (0..n as i32).collect()
}

fn fill_vecdeque(n: usize) -> VecDeque<i32> {
    (0..n as i32).collect()
}

// Benchmark: bulk push_back, buffer starts at the default capacity and grows
fn bench_push_back(c: &mut Criterion) {
    let mut g = c.benchmark_group("push_back_bulk");
    g.measurement_time(Duration::from_secs(3));
    for &size in SIZES.iter() {
        g.throughput(Throughput::Elements(size as u64));
        g.bench_with_input(BenchmarkId::new("CircularBuffer", size), &size, |b, &n| {
            b.iter(|| {
                let mut buf = CircularBuffer::new();
                for i in 0..n {
                    buf.push_back(black_box(i as i32));
                }
                black_box(buf);
            })
        });
        // O(n) per push for the list, keep sizes small
        if size <= 1_000 {
            g.bench_with_input(BenchmarkId::new("SinglyLinkedList", size), &size, |b, &n| {
                b.iter(|| {
                    let mut list = SinglyLinkedList::new();
                    for i in 0..n {
                        list.push_back(black_box(i as i32));
                    }
                    black_box(list);
                })
            });
        }
        g.bench_with_input(BenchmarkId::new("VecDeque", size), &size, |b, &n| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i as i32));
                }
                black_box(d);
            })
        });
    }
    g.finish();
}

// Benchmark: bulk push_front
fn bench_push_front(c: &mut Criterion) {
    let mut g = c.benchmark_group("push_front_bulk");
    g.measurement_time(Duration::from_secs(3));
    for &size in SIZES.iter() {
        g.throughput(Throughput::Elements(size as u64));
        g.bench_with_input(BenchmarkId::new("CircularBuffer", size), &size, |b, &n| {
            b.iter(|| {
                let mut buf = CircularBuffer::new();
                for i in 0..n {
                    buf.push_front(black_box(i as i32));
                }
                black_box(buf);
            })
        });
        g.bench_with_input(BenchmarkId::new("SinglyLinkedList", size), &size, |b, &n| {
            b.iter(|| {
                let mut list = SinglyLinkedList::new();
                for i in 0..n {
                    list.push_front(black_box(i as i32));
                }
                black_box(list);
            })
        });
        g.bench_with_input(BenchmarkId::new("VecDeque", size), &size, |b, &n| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_front(black_box(i as i32));
                }
                black_box(d);
            })
        });
    }
    g.finish();
}

// Benchmark: random index access
fn bench_random_at(c: &mut Criterion) {
    let mut g = c.benchmark_group("random_at");
    for &size in SIZES.iter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let indices: Vec<usize> = (0..RANDOM_ACCESSES)
            .map(|_| rng.gen_range(0..size))
            .collect();

        let buf = fill_buffer(size);
        let list = fill_list(size);
        let deque = fill_vecdeque(size);

        g.throughput(Throughput::Elements(RANDOM_ACCESSES as u64));
        g.bench_with_input(BenchmarkId::new("CircularBuffer", size), &indices, |b, idx| {
            b.iter(|| {
                for &i in idx {
                    black_box(buf.at(i).ok());
                }
            })
        });
        g.bench_with_input(BenchmarkId::new("SinglyLinkedList", size), &indices, |b, idx| {
            b.iter(|| {
                for &i in idx {
                    black_box(list.at(i).ok());
                }
            })
        });
        g.bench_with_input(BenchmarkId::new("VecDeque", size), &indices, |b, idx| {
            b.iter(|| {
                for &i in idx {
                    black_box(deque.get(i));
                }
            })
        });
    }
    g.finish();
}

// Benchmark: remove_evens on a freshly filled container
fn bench_remove_evens(c: &mut Criterion) {
    let mut g = c.benchmark_group("remove_evens");
    for &size in SIZES.iter() {
        g.throughput(Throughput::Elements(size as u64));
        g.bench_with_input(BenchmarkId::new("CircularBuffer", size), &size, |b, &n| {
            b.iter_batched(
                || fill_buffer(n),
                |mut buf| {
                    buf.remove_evens();
                    black_box(buf);
                },
                criterion::BatchSize::SmallInput,
            )
        });
        g.bench_with_input(BenchmarkId::new("SinglyLinkedList", size), &size, |b, &n| {
            b.iter_batched(
                || fill_list(n),
                |mut list| {
                    list.remove_evens();
                    black_box(list);
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    g.finish();
}

// Benchmark: find of a missing value (full scan)
fn bench_find_missing(c: &mut Criterion) {
    let mut g = c.benchmark_group("find_missing");
    for &size in SIZES.iter() {
        let buf = fill_buffer(size);
        let list = fill_list(size);

        g.throughput(Throughput::Elements(size as u64));
        g.bench_function(BenchmarkId::new("CircularBuffer", size), |b| {
            b.iter(|| black_box(buf.find(&-1)))
        });
        g.bench_function(BenchmarkId::new("SinglyLinkedList", size), |b| {
            b.iter(|| black_box(list.find(&-1)))
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_front,
    bench_random_at,
    bench_remove_evens,
    bench_find_missing
);
criterion_main!(benches);
