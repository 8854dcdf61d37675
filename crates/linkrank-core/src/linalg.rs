//! Dense linear-algebra helpers behind the ranking engines.
//!
//! PageRank's direct mode only needs one capability: the dominant left
//! eigenvector of a row-stochastic matrix, scaled to sum 1. That capability
//! is the [`DominantEigen`] trait; the engine does not care which solver
//! sits behind it.
//!
//! - [`LuStationary`] solves `(Pᵀ − I) x = 0` with one equation replaced by
//!   `Σx = 1`. Exact up to rounding, O(n³), and fails cleanly when the chain
//!   has more than one stationary distribution.
//! - [`PowerIteration`] repeats the lazy step `x ← ½(x + Pᵀx)` until the L1
//!   change drops below a tolerance. The lazy chain has the same stationary
//!   vectors as `P` and is aperiodic, so periodic chains converge too.
//!   Always produces an estimate for `n > 0`; `converged` reports whether
//!   the tolerance was reached within `max_iter` steps.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace, warn};

/// An eigenvector estimate together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenEstimate {
    /// Non-negative vector summing to 1.
    pub vector: DVector<f64>,
    /// Solver steps taken (0 for direct solvers).
    pub iterations: usize,
    /// `‖Pᵀx − x‖₁` for the returned vector.
    pub residual: f64,
    /// Whether the solver met its own acceptance criterion.
    pub converged: bool,
}

/// Dominant left eigenvector of a row-stochastic matrix.
pub trait DominantEigen {
    /// Returns `None` when the solver cannot produce a unique, valid
    /// stationary vector for `p`.
    fn dominant_left_eigenvector(&self, p: &DMatrix<f64>) -> Option<EigenEstimate>;
}

// ---------------------------------------------------------------------------
// Direct solver
// ---------------------------------------------------------------------------

/// LU solve of the stationary equations.
#[derive(Debug, Clone, Copy)]
pub struct LuStationary {
    /// Largest accepted residual and most negative accepted entry.
    pub tolerance: f64,
}

impl Default for LuStationary {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl DominantEigen for LuStationary {
    fn dominant_left_eigenvector(&self, p: &DMatrix<f64>) -> Option<EigenEstimate> {
        let n = p.nrows();
        if n == 0 || p.ncols() != n {
            return None;
        }

        let mut system = p.transpose() - DMatrix::<f64>::identity(n, n);
        system.row_mut(n - 1).fill(1.0);
        let mut rhs = DVector::<f64>::zeros(n);
        rhs[n - 1] = 1.0;

        let Some(mut x) = system.lu().solve(&rhs) else {
            debug!(n, "stationary system is singular");
            return None;
        };

        if x.iter().any(|v| !v.is_finite() || *v < -self.tolerance) {
            debug!(n, "stationary solution has invalid entries");
            return None;
        }
        // Rounding can leave entries like -1e-17.
        x.iter_mut().for_each(|v| *v = v.max(0.0));
        if !normalize_sum(x.as_mut_slice()) {
            return None;
        }

        let residual = stationary_residual(p, &x);
        if residual > self.tolerance {
            debug!(n, residual, "stationary solution rejected");
            return None;
        }

        Some(EigenEstimate {
            vector: x,
            iterations: 0,
            residual,
            converged: true,
        })
    }
}

// ---------------------------------------------------------------------------
// Iterative solver
// ---------------------------------------------------------------------------

/// Lazy power iteration from the uniform vector.
#[derive(Debug, Clone, Copy)]
pub struct PowerIteration {
    /// Stop when the L1 change between steps is below this value.
    pub tolerance: f64,
    /// Upper bound on steps.
    pub max_iter: usize,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iter: 10_000,
        }
    }
}

impl DominantEigen for PowerIteration {
    fn dominant_left_eigenvector(&self, p: &DMatrix<f64>) -> Option<EigenEstimate> {
        let n = p.nrows();
        if n == 0 || p.ncols() != n {
            return None;
        }

        let mut x = uniform(n);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            iterations += 1;
            let mut next = (p.tr_mul(&x) + &x) * 0.5;
            if !normalize_sum(next.as_mut_slice()) {
                return None;
            }
            let delta = (&next - &x).lp_norm(1);
            x = next;
            trace!(iterations, delta, "power step");
            if delta < self.tolerance {
                converged = true;
                break;
            }
        }

        let residual = stationary_residual(p, &x);
        if !converged {
            warn!(
                n,
                iterations, residual, "power iteration hit max_iter before converging"
            );
        }
        Some(EigenEstimate {
            vector: x,
            iterations,
            residual,
            converged,
        })
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// `[1/n; n]`. Empty for `n == 0`.
#[must_use]
pub fn uniform(n: usize) -> DVector<f64> {
    if n == 0 {
        return DVector::zeros(0);
    }
    DVector::from_element(n, 1.0 / n as f64)
}

/// Exactly `steps` left multiplications `x ← x P`, renormalising to sum 1
/// after each one.
#[must_use]
pub fn left_power_steps(p: &DMatrix<f64>, start: DVector<f64>, steps: usize) -> DVector<f64> {
    let mut x = start;
    for _ in 0..steps {
        x = p.tr_mul(&x);
        normalize_sum(x.as_mut_slice());
    }
    x
}

/// `‖Pᵀx − x‖₁`.
#[must_use]
pub fn stationary_residual(p: &DMatrix<f64>, x: &DVector<f64>) -> f64 {
    (p.tr_mul(x) - x).lp_norm(1)
}

/// Scale `values` to sum 1.
///
/// A zero or non-finite sum leaves the values untouched and returns `false`.
pub fn normalize_sum(values: &mut [f64]) -> bool {
    let sum: f64 = values.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return false;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state() -> DMatrix<f64> {
        // Stationary distribution of [[0.5, 0.5], [0.25, 0.75]] is [1/3, 2/3].
        DMatrix::from_row_slice(2, 2, &[0.5, 0.5, 0.25, 0.75])
    }

    #[test]
    fn normalize_sum_scales_to_one() {
        let mut v = [1.0, 3.0];
        assert!(normalize_sum(&mut v));
        assert!((v[0] - 0.25).abs() < 1e-15);
        assert!((v[1] - 0.75).abs() < 1e-15);
    }

    #[test]
    fn normalize_sum_guards_zero() {
        let mut v = [0.0, 0.0, 0.0];
        assert!(!normalize_sum(&mut v));
        assert_eq!(v, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn lu_solves_two_state_chain() {
        let est = LuStationary::default()
            .dominant_left_eigenvector(&two_state())
            .expect("irreducible chain");
        assert!((est.vector[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((est.vector[1] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(est.iterations, 0);
        assert!(est.residual < 1e-12);
    }

    #[test]
    fn power_iteration_matches_lu() {
        let p = two_state();
        let lu = LuStationary::default()
            .dominant_left_eigenvector(&p)
            .expect("irreducible chain");
        let pi = PowerIteration::default()
            .dominant_left_eigenvector(&p)
            .expect("non-empty");
        assert!((&lu.vector - &pi.vector).lp_norm(1) < 1e-10);
        assert!(pi.iterations > 0);
    }

    #[test]
    fn lu_rejects_reducible_chain() {
        // Two absorbing states: every mix of them is stationary.
        let p = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        assert!(LuStationary::default().dominant_left_eigenvector(&p).is_none());
    }

    #[test]
    fn power_iteration_handles_reducible_chain() {
        let p = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let est = PowerIteration::default()
            .dominant_left_eigenvector(&p)
            .expect("non-empty");
        assert!((est.vector.sum() - 1.0).abs() < 1e-12);
        assert!(est.residual < 1e-12);
    }

    #[test]
    fn power_iteration_converges_on_periodic_chain() {
        // A 2-cycle flips `x ← Pᵀx` forever; the lazy step settles.
        let p = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let est = PowerIteration::default()
            .dominant_left_eigenvector(&p)
            .expect("non-empty");
        assert!(est.converged);
        assert!(est.residual < 1e-12);
        assert!((est.vector[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn power_iteration_reports_step_limit() {
        let est = PowerIteration {
            tolerance: 0.0,
            max_iter: 3,
        }
        .dominant_left_eigenvector(&two_state())
        .expect("non-empty");
        assert!(!est.converged);
        assert_eq!(est.iterations, 3);
    }

    #[test]
    fn empty_matrix_has_no_eigenvector() {
        let p = DMatrix::<f64>::zeros(0, 0);
        assert!(LuStationary::default().dominant_left_eigenvector(&p).is_none());
        assert!(PowerIteration::default().dominant_left_eigenvector(&p).is_none());
    }

    #[test]
    fn zero_power_steps_returns_start() {
        let start = uniform(2);
        let out = left_power_steps(&two_state(), start.clone(), 0);
        assert_eq!(out, start);
    }
}
