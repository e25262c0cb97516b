//! Root solver adapter.
//!
//! The [`RootSolver`] trait decouples enumeration from the numerical routine.
//! [`CompanionSolver`] takes eigenvalues of the companion matrix, the same
//! method used by the classic `roots` routine of array libraries.

use anyhow::{Result, anyhow};
use nalgebra::{DMatrix, Schur};
use num_complex::Complex64;

/// Computes the complex roots of a polynomial.
pub trait RootSolver {
    /// Roots of the polynomial with `coefficients`, leading coefficient first.
    ///
    /// Root order is unspecified.
    fn roots(&self, coefficients: &[f64]) -> Result<Vec<Complex64>>;
}

/// Companion-matrix eigenvalue solver backed by `nalgebra`'s real Schur form.
#[derive(Debug, Clone)]
pub struct CompanionSolver {
    /// Iteration cap for the Schur decomposition (0 = unlimited).
    pub max_iterations: usize,
}

impl Default for CompanionSolver {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
        }
    }
}

impl RootSolver for CompanionSolver {
    fn roots(&self, coefficients: &[f64]) -> Result<Vec<Complex64>> {
        let Some(first_nonzero) = coefficients.iter().position(|c| *c != 0.0) else {
            return Ok(Vec::new());
        };
        let last_nonzero = coefficients
            .iter()
            .rposition(|c| *c != 0.0)
            .unwrap_or(first_nonzero);
        let trimmed = &coefficients[first_nonzero..=last_nonzero];
        let zero_roots = coefficients.len() - 1 - last_nonzero;

        let mut roots = match trimmed.len() - 1 {
            0 => Vec::new(),
            1 => vec![Complex64::new(-trimmed[1] / trimmed[0], 0.0)],
            n => companion_eigenvalues(trimmed, n, self.max_iterations)?,
        };
        roots.extend(std::iter::repeat_n(Complex64::new(0.0, 0.0), zero_roots));
        Ok(roots)
    }
}

fn companion_eigenvalues(
    coefficients: &[f64],
    n: usize,
    max_iterations: usize,
) -> Result<Vec<Complex64>> {
    let lead = coefficients[0];
    let mut companion = DMatrix::<f64>::zeros(n, n);
    for (col, coeff) in coefficients[1..].iter().enumerate() {
        companion[(0, col)] = -coeff / lead;
    }
    for row in 1..n {
        companion[(row, row - 1)] = 1.0;
    }
    let schur = Schur::try_new(companion, f64::EPSILON, max_iterations)
        .ok_or_else(|| anyhow!("companion matrix of degree {n} did not converge"))?;
    Ok(schur.complex_eigenvalues().iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(coefficients: &[f64], z: Complex64) -> Complex64 {
        coefficients
            .iter()
            .fold(Complex64::new(0.0, 0.0), |acc, c| acc * z + *c)
    }

    fn assert_contains(roots: &[Complex64], expected: Complex64) {
        assert!(
            roots.iter().any(|r| (r - expected).norm() < 1e-9),
            "{expected} not in {roots:?}"
        );
    }

    #[test]
    fn linear_root_is_negated_constant_over_leading() {
        let roots = CompanionSolver::default().roots(&[1.0, -1.0]).expect("roots");
        assert_eq!(roots, vec![Complex64::new(1.0, 0.0)]);
        let roots = CompanionSolver::default().roots(&[-1.0, -1.0]).expect("roots");
        assert_eq!(roots, vec![Complex64::new(-1.0, 0.0)]);
    }

    #[test]
    fn quadratic_roots_as_a_set() {
        let roots = CompanionSolver::default()
            .roots(&[1.0, 0.0, -1.0])
            .expect("roots");
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, Complex64::new(1.0, 0.0));
        assert_contains(&roots, Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn complex_conjugate_pairs() {
        let roots = CompanionSolver::default()
            .roots(&[1.0, 1.0, 1.0])
            .expect("roots");
        let half_sqrt3 = 3f64.sqrt() / 2.0;
        assert_contains(&roots, Complex64::new(-0.5, half_sqrt3));
        assert_contains(&roots, Complex64::new(-0.5, -half_sqrt3));
    }

    #[test]
    fn trailing_zeros_become_zero_roots() {
        let roots = CompanionSolver::default()
            .roots(&[1.0, -1.0, 0.0])
            .expect("roots");
        assert_eq!(roots.len(), 2);
        assert_contains(&roots, Complex64::new(0.0, 0.0));
        assert_contains(&roots, Complex64::new(1.0, 0.0));
    }

    #[test]
    fn leading_zeros_lower_the_degree() {
        let roots = CompanionSolver::default()
            .roots(&[0.0, 1.0, -2.0])
            .expect("roots");
        assert_eq!(roots, vec![Complex64::new(2.0, 0.0)]);
        let none = CompanionSolver::default().roots(&[0.0, 0.0]).expect("roots");
        assert!(none.is_empty());
    }

    #[test]
    fn littlewood_roots_satisfy_polynomial() {
        let solver = CompanionSolver::default();
        for code in [0u64, 37, 85, 127] {
            let coefficients: Vec<f64> = crate::core::encoder::encode(code, 6)
                .into_iter()
                .map(f64::from)
                .collect();
            let roots = solver.roots(&coefficients).expect("roots");
            assert_eq!(roots.len(), 6);
            for root in &roots {
                assert!(eval(&coefficients, *root).norm() < 1e-8, "code {code}");
                // Roots of ±1 polynomials lie in the annulus 1/2 < |z| < 2.
                assert!(root.norm() > 0.5 && root.norm() < 2.0);
            }
        }
    }
}
