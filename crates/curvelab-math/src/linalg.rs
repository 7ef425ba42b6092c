//! Dense linear solves with dual-valued right-hand sides.
//!
//! Spline collocation matrices depend only on dates, so they stay `f64`;
//! the node values on the right-hand side carry derivatives. Solving
//! `A x = b` with `A` constant is linear in `b`, so applying the `f64`
//! factorisation to a dual `b` propagates gradients and Hessians exactly.

use nalgebra::DMatrix;
use tracing::{debug, trace};

use crate::dual::Number;
use crate::error::{MathError, MathResult};

/// Relative pivot size below which a matrix is treated as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-14;

/// Smallest accepted reciprocal condition number `σ_min / σ_max`.
pub const RCOND_TOLERANCE: f64 = 1e-13;

/// LU factorisation with partial pivoting, `P A = L U`.
///
/// `L` (unit diagonal, not stored) and `U` share one matrix.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: DMatrix<f64>,
    perm: Vec<usize>,
}

impl LuDecomposition {
    /// Factorises a square matrix.
    ///
    /// # Errors
    ///
    /// `Configuration` for a non-square matrix, `SingularSystem` when a pivot
    /// is smaller than `PIVOT_TOLERANCE` times the largest entry.
    pub fn new(matrix: &DMatrix<f64>) -> MathResult<Self> {
        let n = matrix.nrows();
        if n != matrix.ncols() {
            return Err(MathError::configuration(format!(
                "LU needs a square matrix, got {}x{}",
                n,
                matrix.ncols()
            )));
        }
        let scale = matrix.amax();
        let mut lu = matrix.clone();
        let mut perm: Vec<usize> = (0..n).collect();

        for k in 0..n {
            let (pivot_row, pivot) = (k..n)
                .map(|i| (i, lu[(i, k)].abs()))
                .fold((k, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });
            if pivot <= PIVOT_TOLERANCE * scale || scale == 0.0 {
                return Err(MathError::singular(n, n, format!("zero pivot in column {k}")));
            }
            if pivot_row != k {
                lu.swap_rows(k, pivot_row);
                perm.swap(k, pivot_row);
            }
            for i in k + 1..n {
                let factor = lu[(i, k)] / lu[(k, k)];
                lu[(i, k)] = factor;
                for j in k + 1..n {
                    lu[(i, j)] -= factor * lu[(k, j)];
                }
            }
        }
        Ok(Self { lu, perm })
    }

    /// Dimension of the factorised matrix.
    pub fn dim(&self) -> usize {
        self.perm.len()
    }

    /// Solves `A x = b` for any numeric right-hand side.
    pub fn solve<T: Number>(&self, b: &[T]) -> MathResult<Vec<T>> {
        let n = self.dim();
        if b.len() != n {
            return Err(MathError::configuration(format!(
                "right-hand side has {} entries for a {n}x{n} system",
                b.len()
            )));
        }
        let mut y: Vec<T> = Vec::with_capacity(n);
        for i in 0..n {
            let mut sum = b[self.perm[i]].clone();
            for (j, yj) in y.iter().enumerate() {
                sum = sum - yj.clone() * self.lu[(i, j)];
            }
            y.push(sum);
        }
        let mut x: Vec<T> = vec![T::from(0.0); n];
        for i in (0..n).rev() {
            let mut sum = y[i].clone();
            for j in i + 1..n {
                sum = sum - x[j].clone() * self.lu[(i, j)];
            }
            x[i] = sum / self.lu[(i, i)];
        }
        Ok(x)
    }
}

/// Reciprocal condition number `σ_min / σ_max` from the SVD.
pub fn rcond(matrix: &DMatrix<f64>) -> f64 {
    let sv = matrix.singular_values();
    let max = sv.max();
    if max == 0.0 {
        0.0
    } else {
        sv.min() / max
    }
}

/// `Aᵀ b` for a dual-valued `b`.
fn transpose_mul<T: Number>(a: &DMatrix<f64>, b: &[T]) -> Vec<T> {
    (0..a.ncols())
        .map(|j| {
            b.iter()
                .enumerate()
                .map(|(i, bi)| bi.clone() * a[(i, j)])
                .sum()
        })
        .collect()
}

fn solve_square<T: Number>(a: &DMatrix<f64>, b: &[T]) -> MathResult<Vec<T>> {
    let rc = rcond(a);
    trace!(dim = a.nrows(), rcond = rc, "condition estimate");
    if rc < RCOND_TOLERANCE {
        return Err(MathError::singular(
            a.nrows(),
            a.ncols(),
            format!("reciprocal condition {rc:.3e} below {RCOND_TOLERANCE:e}"),
        ));
    }
    LuDecomposition::new(a)?.solve(b)
}

/// Solves `A x = b` where `b` may carry derivatives.
///
/// Square systems are solved directly. With `allow_lsq`, overdetermined
/// systems return the least-squares solution via the normal equations and
/// underdetermined systems return the minimum-norm solution `Aᵀ(AAᵀ)⁻¹b`.
///
/// # Errors
///
/// - `Configuration`: `b` length differs from the row count, or the system
///   is not square and `allow_lsq` is false.
/// - `SingularSystem`: the (normal) matrix is singular or ill-conditioned.
pub fn dsolve<T: Number>(a: &DMatrix<f64>, b: &[T], allow_lsq: bool) -> MathResult<Vec<T>> {
    let (rows, cols) = a.shape();
    if b.len() != rows {
        return Err(MathError::configuration(format!(
            "right-hand side has {} entries for {rows} equations",
            b.len()
        )));
    }
    debug!(rows, cols, order = %T::ORDER, lsq = rows != cols, "dense solve");

    if rows == cols {
        return solve_square(a, b);
    }
    if !allow_lsq {
        return Err(MathError::configuration(format!(
            "{rows} equations in {cols} unknowns requires least squares"
        )));
    }
    let at = a.transpose();
    if rows > cols {
        let ata = &at * a;
        let atb = transpose_mul(a, b);
        solve_square(&ata, &atb)
    } else {
        let aat = a * &at;
        let y = solve_square(&aat, b)?;
        Ok(transpose_mul(a, &y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::{var_set, Dual};
    use approx::assert_relative_eq;

    #[test]
    fn test_lu_needs_pivoting() {
        // zero in the leading position forces a row swap
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 2.0, 3.0]);
        let x = dsolve(&a, &[1.0, 8.0], false).unwrap();
        assert_relative_eq!(x[0], 2.5, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_three_by_three() {
        let a = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 1.0, 4.0, 3.0, 3.0, 8.0, 7.0, 9.0]);
        let b = [4.0, 10.0, 24.0];
        let x = dsolve(&a, &b, false).unwrap();
        for i in 0..3 {
            let row: f64 = (0..3).map(|j| a[(i, j)] * x[j]).sum();
            assert_relative_eq!(row, b[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_dual_rhs_gives_inverse_columns() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let vars = var_set(["b0", "b1"]).unwrap();
        let b = Dual::seed(&[5.0, 5.0], &vars).unwrap();
        let x = dsolve(&a, &b, false).unwrap();
        assert_relative_eq!(x[0].real(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1].real(), 1.0, epsilon = 1e-12);
        // ∂x/∂b = A⁻¹ = [[0.6, -0.2], [-0.2, 0.4]]
        assert_relative_eq!(x[0].gradient(&["b0"])[0], 0.6, epsilon = 1e-12);
        assert_relative_eq!(x[0].gradient(&["b1"])[0], -0.2, epsilon = 1e-12);
        assert_relative_eq!(x[1].gradient(&["b1"])[0], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_system() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(
            dsolve(&a, &[1.0, 2.0], false),
            Err(MathError::SingularSystem { .. })
        ));
        let zero = DMatrix::<f64>::zeros(2, 2);
        assert!(LuDecomposition::new(&zero).is_err());
    }

    #[test]
    fn test_non_square_requires_lsq() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert!(matches!(
            dsolve(&a, &[1.0, 1.0, 1.0], false),
            Err(MathError::Configuration { .. })
        ));
        assert!(dsolve(&a, &[1.0, 1.0], true).is_err());
    }

    #[test]
    fn test_overdetermined_least_squares() {
        // fit y = c0 + c1 t through (0,1), (1,3), (2,5), (3,7.3)
        let a = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let x = dsolve(&a, &[1.0, 3.0, 5.0, 7.3], true).unwrap();
        assert_relative_eq!(x[0], 0.94, epsilon = 1e-10);
        assert_relative_eq!(x[1], 2.09, epsilon = 1e-10);
    }

    #[test]
    fn test_underdetermined_minimum_norm() {
        let a = DMatrix::from_row_slice(1, 2, &[1.0, 1.0]);
        let x = dsolve(&a, &[2.0], true).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rcond() {
        let id = DMatrix::<f64>::identity(3, 3);
        assert_relative_eq!(rcond(&id), 1.0, epsilon = 1e-12);
        assert_eq!(rcond(&DMatrix::<f64>::zeros(2, 2)), 0.0);
    }
}
