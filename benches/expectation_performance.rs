use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_complex::Complex64;
use qexpval::random::{rand_hermitian, rand_ket};
use qexpval::{CsrOperator, DensityMatrix, StateVector};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEED: u64 = 42;
const DENSITY: f64 = 0.3;

fn seeded_inputs(dim: usize) -> (CsrOperator, StateVector) {
    let op = rand_hermitian(dim, DENSITY, &mut StdRng::seed_from_u64(SEED)).unwrap();
    let psi = rand_ket(dim, &mut StdRng::seed_from_u64(SEED + 1)).unwrap();
    (op, psi)
}

fn bench_sparse_vs_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_vs_dense");

    for &dim in [20, 50, 100].iter() {
        let (op, psi) = seeded_inputs(dim);
        let dense = op.to_dense();

        group.throughput(Throughput::Elements(op.nnz() as u64));

        group.bench_with_input(
            BenchmarkId::new("sparse_fused", dim),
            &dim,
            |b, _| {
                b.iter(|| black_box(op.expectation_value(&psi).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("dense_baseline", dim),
            &dim,
            |b, _| {
                b.iter(|| black_box(dense.expectation_value(&psi).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_fused_vs_two_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("fused_vs_two_pass");

    for &dim in [50, 200].iter() {
        let (op, psi) = seeded_inputs(dim);
        group.throughput(Throughput::Elements(op.nnz() as u64));

        group.bench_with_input(BenchmarkId::new("fused", dim), &dim, |b, _| {
            b.iter(|| black_box(op.expectation_value(&psi).unwrap()));
        });

        // Materialize Aψ in full, then reduce
        group.bench_with_input(BenchmarkId::new("two_pass", dim), &dim, |b, _| {
            b.iter(|| {
                let mut product = vec![Complex64::new(0.0, 0.0); dim];
                op.spmv(psi.amplitudes(), &mut product).unwrap();
                let value: Complex64 = psi
                    .amplitudes()
                    .iter()
                    .zip(product.iter())
                    .map(|(a, b)| a.conj() * b)
                    .sum();
                black_box(value.re)
            });
        });
    }

    group.finish();
}

fn bench_ket_vs_density_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("ket_vs_density_path");

    for &dim in [10, 20, 50].iter() {
        let (op, psi) = seeded_inputs(dim);
        let rho = DensityMatrix::from_pure(&psi);

        group.throughput(Throughput::Elements(op.nnz() as u64));

        group.bench_with_input(BenchmarkId::new("wavefunction", dim), &dim, |b, _| {
            b.iter(|| black_box(op.expectation_value(&psi).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("density_vectorized", dim), &dim, |b, _| {
            b.iter(|| black_box(op.density_expectation_value(&rho).unwrap()));
        });
    }

    group.finish();
}

fn bench_serial_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("serial_vs_parallel");

    for &dim in [256, 1024].iter() {
        let op = rand_hermitian(dim, 0.05, &mut StdRng::seed_from_u64(SEED)).unwrap();
        let psi = rand_ket(dim, &mut StdRng::seed_from_u64(SEED + 1)).unwrap();

        group.throughput(Throughput::Elements(op.nnz() as u64));

        group.bench_with_input(BenchmarkId::new("serial", dim), &dim, |b, _| {
            b.iter(|| black_box(op.expectation_value(&psi).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("parallel", dim), &dim, |b, _| {
            b.iter(|| black_box(op.expectation_value_parallel(&psi).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sparse_vs_dense,
    bench_fused_vs_two_pass,
    bench_ket_vs_density_path,
    bench_serial_vs_parallel
);

criterion_main!(benches);
