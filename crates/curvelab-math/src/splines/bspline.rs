//! B-spline primitives on a clamped knot vector.
//!
//! All routines take the knot slice `t` and degree `k`; the number of basis
//! functions is `t.len() - k - 1`.

use crate::dual::Number;

/// Number of basis functions for knots `t` and degree `k`.
#[inline]
pub(crate) fn basis_count(t: &[f64], k: usize) -> usize {
    t.len() - k - 1
}

/// Knot span `i` with `t[i] <= x < t[i+1]`, clamped to `[k, n-1]`.
///
/// Points at or beyond the right end map to the last span so that the
/// domain is closed on both sides.
pub(crate) fn find_span(t: &[f64], k: usize, x: f64) -> usize {
    let n = basis_count(t, k);
    if x >= t[n] {
        return n - 1;
    }
    if x < t[k] {
        return k;
    }
    let idx = t.partition_point(|knot| *knot <= x).saturating_sub(1);
    idx.clamp(k, n - 1)
}

/// Non-zero basis values `B_{span-k..=span}(x)`.
///
/// Iterative Cox–de Boor triangle, no recursion and no zero divisions for
/// spans of positive length.
pub(crate) fn basis_funs(t: &[f64], k: usize, span: usize, x: f64) -> Vec<f64> {
    let mut n = vec![0.0; k + 1];
    let mut left = vec![0.0; k + 1];
    let mut right = vec![0.0; k + 1];
    n[0] = 1.0;
    for j in 1..=k {
        left[j] = x - t[span + 1 - j];
        right[j] = t[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let temp = if denom == 0.0 { 0.0 } else { n[r] / denom };
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Evaluates `Σ cᵢ Bᵢ(x)` with de Boor's algorithm.
///
/// Outside the knot range the polynomial of the nearest end span is used.
pub(crate) fn de_boor<T: Number>(t: &[f64], k: usize, c: &[T], x: f64) -> T {
    let span = find_span(t, k, x);
    let mut d: Vec<T> = (0..=k).map(|j| c[j + span - k].clone()).collect();
    for r in 1..=k {
        for j in (r..=k).rev() {
            let lo = t[j + span - k];
            let hi = t[j + 1 + span - r];
            let alpha = if hi == lo { 0.0 } else { (x - lo) / (hi - lo) };
            d[j] = d[j - 1].clone() * (1.0 - alpha) + d[j].clone() * alpha;
        }
    }
    d.swap_remove(k)
}

/// Coefficients of the derivative spline, which has degree `k-1` on `t[1..len-1]`.
pub(crate) fn differentiate<T: Number>(t: &[f64], k: usize, c: &[T]) -> Vec<T> {
    let kf = k as f64;
    (0..c.len() - 1)
        .map(|j| {
            let width = t[j + k + 1] - t[j + 1];
            if width == 0.0 {
                T::from(0.0)
            } else {
                (c[j + 1].clone() - c[j].clone()) * (kf / width)
            }
        })
        .collect()
}

/// `m`-th derivative of `Σ cᵢ Bᵢ` at `x`. Zero for `m > k`.
pub(crate) fn de_boor_derivative<T: Number>(t: &[f64], k: usize, c: &[T], x: f64, m: usize) -> T {
    if m > k {
        return T::from(0.0);
    }
    let mut coefs = c.to_vec();
    let mut knots = t;
    for order in (k - m + 1..=k).rev() {
        coefs = differentiate(knots, order, &coefs);
        knots = &knots[1..knots.len() - 1];
    }
    de_boor(knots, k - m, &coefs, x)
}
