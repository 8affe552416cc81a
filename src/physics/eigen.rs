// src/physics/eigen.rs

use crate::error::{Result, ZeoranError};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

/// Iteration cap for the real Schur decomposition
const SCHUR_MAX_ITERATIONS: usize = 100_000;

/// Inverse iteration shift, relative to the eigenvalue magnitude
const SHIFT_SCALE: f64 = 1e-7;

const INVERSE_ITERATIONS: usize = 6;

/// Accepted |A v - lambda v| relative to max(|lambda|, 1)
const RESIDUAL_TOLERANCE: f64 = 1e-6;

/// Dominant eigenvalue of a real matrix and its (unit, sign-fixed) eigenvector
#[derive(Clone, Debug)]
pub struct EigenPair {
    pub value: f64,
    pub vector: DVector<f64>,
}

/// Eigenpair with the largest real eigenvalue of a dense, possibly non-symmetric matrix.
///
/// # Algorithm
/// 1. Real Schur decomposition gives every eigenvalue; keep the largest real part
/// 2. Shifted inverse iteration (LU of `A - (lambda + delta) I`) recovers its eigenvector
/// 3. The vector is normalised, oriented to a positive sum and checked against `A v = lambda v`
///
/// For a strictly positive matrix this is the Perron pair and every vector
/// component is positive.
///
/// # Returns
/// - `Err(ZeoranError::Numerical)` if the decomposition does not converge or the
///   residual check fails
pub fn dominant_eigenpair(matrix: &DMatrix<f64>) -> Result<EigenPair> {
    let n = matrix.nrows();
    if n == 0 || matrix.ncols() != n {
        return Err(ZeoranError::numerical(format!(
            "expected a non-empty square matrix, got {}x{}",
            matrix.nrows(),
            matrix.ncols()
        )));
    }

    if n == 1 {
        return Ok(EigenPair {
            value: matrix[(0, 0)],
            vector: DVector::from_element(1, 1.0),
        });
    }

    let schur = matrix
        .clone()
        .try_schur(f64::EPSILON, SCHUR_MAX_ITERATIONS)
        .ok_or_else(|| ZeoranError::numerical("Schur decomposition did not converge"))?;

    let eigenvalues: DVector<Complex<f64>> = schur.complex_eigenvalues();
    let lambda = eigenvalues
        .iter()
        .map(|z| z.re)
        .fold(f64::NEG_INFINITY, f64::max);

    if !lambda.is_finite() {
        return Err(ZeoranError::numerical("no finite eigenvalue found"));
    }

    // --- Inverse iteration ---
    let shift = lambda + SHIFT_SCALE * lambda.abs().max(1.0);
    let shifted = matrix - DMatrix::<f64>::identity(n, n) * shift;
    let lu = shifted.lu();

    let mut v = DVector::from_element(n, 1.0 / (n as f64).sqrt());
    for _ in 0..INVERSE_ITERATIONS {
        let next = lu
            .solve(&v)
            .ok_or_else(|| ZeoranError::numerical("shifted matrix is singular"))?;
        let norm = next.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(ZeoranError::numerical("inverse iteration diverged"));
        }
        v = next / norm;
    }

    if v.sum() < 0.0 {
        v = -v;
    }

    let residual = (matrix * &v - &v * lambda).norm();
    if !residual.is_finite() || residual > RESIDUAL_TOLERANCE * lambda.abs().max(1.0) {
        return Err(ZeoranError::numerical(format!(
            "eigenvector residual {:.3e} above tolerance",
            residual
        )));
    }

    Ok(EigenPair { value: lambda, vector: v })
}
