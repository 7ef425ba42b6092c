//! Piecewise polynomial spline in B-spline form.

use nalgebra::DMatrix;
use tracing::debug;

use super::bspline::{basis_count, basis_funs, de_boor, de_boor_derivative, find_span};
use crate::dual::Number;
use crate::error::{MathError, MathResult};
use crate::linalg::dsolve;

/// A spline `S(x) = Σ cᵢ Bᵢ,ₖ(x)` of degree `k` on a clamped knot vector.
///
/// Coefficients are generic so that a solve with dual-valued targets yields
/// dual-valued coefficients, and every evaluation then carries derivatives
/// with respect to the targets.
///
/// # Example
///
/// ```rust
/// use curvelab_math::splines::PPSpline;
///
/// let mut s = PPSpline::<f64>::new(3, vec![0.0, 0.0, 0.0, 0.0, 2.0, 4.0, 4.0, 4.0, 4.0], None).unwrap();
/// s.csolve(&[0.0, 0.0, 2.0, 4.0, 4.0], &[0.0, 1.0, 4.0, 16.0, 0.0], 2, 2, false).unwrap();
/// assert!((s.ppev_single(2.0).unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PPSpline<T> {
    k: usize,
    t: Vec<f64>,
    n: usize,
    c: Option<Vec<T>>,
}

impl<T: Number> PPSpline<T> {
    /// Creates a spline, optionally with known coefficients.
    ///
    /// # Errors
    ///
    /// `Configuration` when the knots decrease, when either end knot does not
    /// appear exactly `k+1` times, or when the coefficient count is not
    /// `t.len() - k - 1`.
    pub fn new(k: usize, t: Vec<f64>, c: Option<Vec<T>>) -> MathResult<Self> {
        if t.len() < 2 * (k + 1) {
            return Err(MathError::configuration(format!(
                "degree {k} needs at least {} knots, got {}",
                2 * (k + 1),
                t.len()
            )));
        }
        if t.iter().any(|x| !x.is_finite()) {
            return Err(MathError::configuration("knots must be finite"));
        }
        if t.windows(2).any(|w| w[1] < w[0]) {
            return Err(MathError::configuration("knots must be non-decreasing"));
        }
        let m = t.len();
        let left_ok = t[k] == t[0] && t[k + 1] > t[0];
        let right_ok = t[m - 1 - k] == t[m - 1] && t[m - 2 - k] < t[m - 1];
        if !left_ok || !right_ok {
            return Err(MathError::configuration(format!(
                "end knots must have multiplicity exactly {}",
                k + 1
            )));
        }
        let n = basis_count(&t, k);
        if let Some(c) = &c {
            if c.len() != n {
                return Err(MathError::configuration(format!(
                    "{} coefficients given, {n} required",
                    c.len()
                )));
            }
        }
        Ok(Self { k, t, n, c })
    }

    /// Degree.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Knot sequence.
    pub fn t(&self) -> &[f64] {
        &self.t
    }

    /// Number of coefficients.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Coefficients, once solved or supplied.
    pub fn c(&self) -> Option<&[T]> {
        self.c.as_deref()
    }

    /// Closed domain `[t₀, t_last]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.t[0], self.t[self.t.len() - 1])
    }

    /// Value of basis function `i` at `x`.
    pub fn bsplev_single(&self, x: f64, i: usize) -> f64 {
        if i >= self.n {
            return 0.0;
        }
        let span = find_span(&self.t, self.k, x);
        if i + self.k < span || i > span {
            return 0.0;
        }
        basis_funs(&self.t, self.k, span, x)[i + self.k - span]
    }

    /// `m`-th derivative of basis function `i` at `x`.
    pub fn bspldnev_single(&self, x: f64, i: usize, m: usize) -> f64 {
        if m == 0 {
            return self.bsplev_single(x, i);
        }
        if i >= self.n {
            return 0.0;
        }
        let mut unit = vec![0.0; self.n];
        unit[i] = 1.0;
        de_boor_derivative(&self.t, self.k, &unit, x, m)
    }

    /// Collocation matrix `A[i][j] = Bⱼ(τᵢ)`.
    ///
    /// The first row holds the `left_n`-th derivatives at `τ₀` and the last
    /// row the `right_n`-th derivatives at `τ_last`; `0` keeps plain values.
    pub fn bsplmatrix(&self, tau: &[f64], left_n: usize, right_n: usize) -> MathResult<DMatrix<f64>> {
        if left_n > self.k || right_n > self.k {
            return Err(MathError::configuration(format!(
                "boundary derivative orders ({left_n}, {right_n}) exceed degree {}",
                self.k
            )));
        }
        let rows = tau.len();
        let mut a = DMatrix::zeros(rows, self.n);
        for (r, &x) in tau.iter().enumerate() {
            let order = match r {
                0 => left_n,
                _ if r == rows - 1 => right_n,
                _ => 0,
            };
            if order == 0 {
                let span = find_span(&self.t, self.k, x);
                for (offset, value) in basis_funs(&self.t, self.k, span, x).into_iter().enumerate() {
                    a[(r, span - self.k + offset)] = value;
                }
            } else {
                for j in 0..self.n {
                    a[(r, j)] = self.bspldnev_single(x, j, order);
                }
            }
        }
        Ok(a)
    }

    /// Solves for the coefficients that interpolate `y` at `tau`.
    ///
    /// `left_n`/`right_n` select which derivative the first and last equations
    /// constrain: `0` a value, `1` a slope (clamped), `2` a curvature (natural
    /// when the target is zero). `allow_lsq` admits non-square systems.
    /// Existing coefficients are replaced only on success.
    ///
    /// # Errors
    ///
    /// `Configuration` for mismatched lengths, derivative orders above `k`, or a
    /// non-square system without `allow_lsq`; `SingularSystem` when the
    /// collocation matrix cannot be inverted.
    pub fn csolve(
        &mut self,
        tau: &[f64],
        y: &[T],
        left_n: usize,
        right_n: usize,
        allow_lsq: bool,
    ) -> MathResult<()> {
        if tau.len() != y.len() {
            return Err(MathError::configuration(format!(
                "{} collocation points for {} targets",
                tau.len(),
                y.len()
            )));
        }
        if tau.is_empty() {
            return Err(MathError::configuration("no collocation points"));
        }
        debug!(
            degree = self.k,
            coefficients = self.n,
            points = tau.len(),
            left_n,
            right_n,
            allow_lsq,
            "spline collocation solve"
        );
        let a = self.bsplmatrix(tau, left_n, right_n)?;
        let c = dsolve(&a, y, allow_lsq)?;
        self.c = Some(c);
        Ok(())
    }

    fn coefficients(&self) -> MathResult<&[T]> {
        self.c
            .as_deref()
            .ok_or_else(|| MathError::configuration("spline coefficients have not been solved"))
    }

    fn check_domain(&self, x: f64) -> MathResult<()> {
        let (lo, hi) = self.domain();
        if x < lo || x > hi || x.is_nan() {
            return Err(MathError::out_of_domain(x, lo, hi));
        }
        Ok(())
    }

    /// Value at `x`.
    ///
    /// # Errors
    ///
    /// `OutOfDomain` outside the knot range, `Configuration` before coefficients exist.
    pub fn ppev_single(&self, x: f64) -> MathResult<T> {
        self.check_domain(x)?;
        Ok(de_boor(&self.t, self.k, self.coefficients()?, x))
    }

    /// Value at `x`, continuing the end polynomials beyond the knot range.
    pub fn ppev_single_extrapolated(&self, x: f64) -> MathResult<T> {
        Ok(de_boor(&self.t, self.k, self.coefficients()?, x))
    }

    /// Values at several points.
    pub fn ppev(&self, x: &[f64]) -> MathResult<Vec<T>> {
        x.iter().map(|xi| self.ppev_single(*xi)).collect()
    }

    /// `m`-th derivative at `x`. Zero when `m > k`.
    pub fn ppdnev_single(&self, x: f64, m: usize) -> MathResult<T> {
        self.check_domain(x)?;
        Ok(de_boor_derivative(&self.t, self.k, self.coefficients()?, x, m))
    }

    /// `m`-th derivative at `x`, continuing the end polynomials.
    pub fn ppdnev_single_extrapolated(&self, x: f64, m: usize) -> MathResult<T> {
        Ok(de_boor_derivative(&self.t, self.k, self.coefficients()?, x, m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::{var_set, Dual, Dual2};
    use approx::assert_abs_diff_eq;

    fn cubic(t: &[f64]) -> PPSpline<f64> {
        PPSpline::new(3, t.to_vec(), None).unwrap()
    }

    #[test]
    fn new_validates_knots() {
        assert!(PPSpline::<f64>::new(3, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0], None).is_err());
        assert!(PPSpline::<f64>::new(3, vec![0.0; 8], None).is_err());
        assert!(PPSpline::<f64>::new(
            3,
            vec![0.0, 0.0, 0.0, 0.0, 2.0, 1.0, 4.0, 4.0, 4.0, 4.0],
            None
        )
        .is_err());
        assert!(PPSpline::new(3, vec![0.0, 0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0], Some(vec![1.0; 3])).is_err());
        assert!(PPSpline::new(1, vec![0.0, 0.0, 1.0, 2.0, 2.0], Some(vec![1.0, 2.0, 3.0])).is_ok());
    }

    #[test]
    fn unsolved_spline_errors() {
        let s = cubic(&[0.0, 0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0]);
        assert!(matches!(s.ppev_single(1.0), Err(MathError::Configuration { .. })));
    }

    #[test]
    fn out_of_domain() {
        let s = PPSpline::new(1, vec![0.0, 0.0, 1.0, 2.0, 2.0], Some(vec![1.0, 2.0, 3.0])).unwrap();
        assert!(matches!(s.ppev_single(2.5), Err(MathError::OutOfDomain { .. })));
        assert_abs_diff_eq!(s.ppev_single(2.0).unwrap(), 3.0);
        assert_abs_diff_eq!(s.ppev_single_extrapolated(2.5).unwrap(), 3.5);
        assert_abs_diff_eq!(s.ppev_single_extrapolated(-1.0).unwrap(), 0.0);
    }

    #[test]
    fn natural_spline_interpolates() {
        let mut s = cubic(&[0.0, 0.0, 0.0, 0.0, 1.0, 3.0, 4.0, 4.0, 4.0, 4.0]);
        let tau = [0.0, 0.0, 1.0, 3.0, 4.0, 4.0];
        let y = [0.0, 1.0, 2.0, 1.5, 3.0, 0.0];
        s.csolve(&tau, &y, 2, 2, false).unwrap();
        for (x, v) in [(0.0, 1.0), (1.0, 2.0), (3.0, 1.5), (4.0, 3.0)] {
            assert_abs_diff_eq!(s.ppev_single(x).unwrap(), v, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(s.ppdnev_single(0.0, 2).unwrap(), 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(s.ppdnev_single(4.0, 2).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn clamped_spline_reproduces_cubic() {
        // y = x³ on [0, 2] with matching end slopes is reproduced exactly
        let mut s = cubic(&[0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
        let tau = [0.0, 0.0, 1.0, 2.0, 2.0];
        let y = [0.0, 0.0, 1.0, 8.0, 12.0];
        s.csolve(&tau, &y, 1, 1, false).unwrap();
        assert_abs_diff_eq!(s.ppev_single(1.5).unwrap(), 3.375, epsilon = 1e-12);
        assert_abs_diff_eq!(s.ppdnev_single(1.5, 1).unwrap(), 6.75, epsilon = 1e-12);
        assert_abs_diff_eq!(s.ppdnev_single(0.5, 2).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.ppdnev_single(0.5, 3).unwrap(), 6.0, epsilon = 1e-10);
    }

    #[test]
    fn boundary_order_above_degree() {
        let mut s = cubic(&[0.0, 0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0]);
        let err = s.csolve(&[0.0, 1.0, 3.0, 4.0], &[0.0, 1.0, 2.0, 3.0], 4, 0, false);
        assert!(matches!(err, Err(MathError::Configuration { .. })));
        assert!(s.c().is_none());
    }

    #[test]
    fn basis_derivative_matches_finite_difference() {
        let s = cubic(&[0.0, 0.0, 0.0, 0.0, 1.0, 2.5, 4.0, 4.0, 4.0, 4.0]);
        let h = 1e-6;
        for i in 0..s.n() {
            for x in [0.3, 1.2, 3.1] {
                let fd = (s.bsplev_single(x + h, i) - s.bsplev_single(x - h, i)) / (2.0 * h);
                assert_abs_diff_eq!(s.bspldnev_single(x, i, 1), fd, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn dual_targets_give_coefficient_sensitivities() {
        let vars = var_set(["y0", "y1", "y2", "y3"]).unwrap();
        let y = Dual::seed(&[1.0, 2.0, 0.5, 1.0], &vars).unwrap();
        let mut s = PPSpline::<Dual>::new(3, vec![0.0, 0.0, 0.0, 0.0, 3.0, 3.0, 3.0, 3.0], None).unwrap();
        s.csolve(&[0.0, 1.0, 2.0, 3.0], &y, 0, 0, false).unwrap();
        // interpolation: value at a node depends only on that node's target
        let v = s.ppev_single(1.0).unwrap();
        assert_abs_diff_eq!(v.real(), 2.0, epsilon = 1e-12);
        let g = v.gradient(&["y0", "y1", "y2", "y3"]);
        assert_abs_diff_eq!(g[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g[3], 0.0, epsilon = 1e-12);

        // a single cubic through four points is linear in the targets, so Hessians vanish
        let y2 = Dual2::seed(&[1.0, 2.0, 0.5, 1.0], &vars).unwrap();
        let mut s2 = PPSpline::<Dual2>::new(3, vec![0.0, 0.0, 0.0, 0.0, 3.0, 3.0, 3.0, 3.0], None).unwrap();
        s2.csolve(&[0.0, 1.0, 2.0, 3.0], &y2, 0, 0, false).unwrap();
        let v2 = s2.ppev_single(1.5).unwrap();
        assert!(v2.dual2().iter().all(|h| h.abs() < 1e-12));
    }
}
