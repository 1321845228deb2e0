//! Performance benchmarks for tenacc-kernels
//!
//! Run with: cargo bench -p tenacc-kernels
//!
//! Benchmarks cover:
//! - Elementwise add at every precision
//! - Dot product under each rounding mode
//! - Square matrix multiply

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tenacc_kernels::element::pack;
use tenacc_kernels::{dispatch_precision, ops, Precision, RoundingMode, Single};

fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| (i % 97) as f64 * 0.25).collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for &size in [64usize, 1024, 16384].iter() {
        group.throughput(Throughput::Elements(size as u64));
        let values = ramp(size);

        for precision in Precision::ALL {
            dispatch_precision!(precision, E => {
                let x = pack::<E>(&values);
                let y = pack::<E>(&values);
                group.bench_with_input(
                    BenchmarkId::new(precision.to_string(), size),
                    &size,
                    |bencher, _| {
                        bencher.iter(|| {
                            black_box(ops::add::<E>(&x, &y, RoundingMode::Nearest).unwrap());
                        });
                    },
                );
            });
        }
    }
    group.finish();
}

fn bench_dot_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot");
    let size = 4096;
    let x = pack::<Single>(&ramp(size));
    group.throughput(Throughput::Elements(size as u64));

    for mode in RoundingMode::ALL {
        group.bench_with_input(BenchmarkId::new("f32", mode), &mode, |bencher, &mode| {
            bencher.iter(|| {
                black_box(ops::dot::<Single>(&x, &x, mode).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");

    for &n in [8usize, 32, 64].iter() {
        let a = pack::<Single>(&ramp(n * n));
        group.throughput(Throughput::Elements((2 * n * n * n) as u64));
        group.bench_with_input(BenchmarkId::new("f32", format!("{}x{}", n, n)), &n, |bencher, &n| {
            bencher.iter(|| {
                black_box(ops::matmul::<Single>(&a, &a, n, n, n, RoundingMode::Nearest).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_dot_modes, bench_matmul);
criterion_main!(benches);
