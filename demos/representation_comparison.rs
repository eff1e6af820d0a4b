//! Example comparing the wavefunction and density-matrix expectation
//! paths
//!
//! The two representations of the same physical state produce matching
//! scalars; the vectorized density path works at dimension dim² and is
//! expected to be the slower of the two.

use qexpval::random::{rand_hermitian, rand_ket};
use qexpval::{expectation, DensityMatrix, QuantumState, Superoperator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() {
    println!("=== Wavefunction vs Density-Matrix Paths ===\n");

    let dim = 50;
    let op = rand_hermitian(dim, 0.3, &mut StdRng::seed_from_u64(42)).unwrap();
    let psi = rand_ket(dim, &mut StdRng::seed_from_u64(43)).unwrap();
    let rho = DensityMatrix::from_pure(&psi);

    println!("operator: dim = {}, nnz = {}, density = {:.1}%", dim, op.nnz(), op.density() * 100.0);

    let start = Instant::now();
    let ket_value = expectation(&op, &QuantumState::Ket(psi.clone())).unwrap();
    let ket_elapsed = start.elapsed();

    let start = Instant::now();
    let density_value = expectation(&op, &QuantumState::Density(rho.clone())).unwrap();
    let density_elapsed = start.elapsed();

    println!("\nwavefunction path:  {:+.13}  ({:?})", ket_value, ket_elapsed);
    println!("density path:       {:+.13}  ({:?})", density_value, density_elapsed);
    println!("difference:         {:.2e}", (ket_value - density_value).abs());

    // The superoperator can be built once and reused across states
    let sop = Superoperator::pre(&op);
    println!(
        "\nsuperoperator: acts at dimension {} with {} non-zeros",
        sop.vec_dim(),
        sop.nnz()
    );
    let reused = sop.expectation_value(&rho).unwrap();
    println!("reused superoperator value: {:+.13}", reused);
}
