//! Forward-mode automatic differentiation.
//!
//! [`Dual`] carries a value and its gradient, [`Dual2`] adds the full
//! Hessian. Both tag their derivative components with an ordered set of
//! variable names shared behind an `Arc`, so values produced from the same
//! seed never copy or re-align their tags.
//!
//! Binary operations on operands with different tag sets first build the
//! union of the two sets: the left operand's tags in order, followed by the
//! right operand's tags that are new. The result is deterministic for a given
//! operand order.
//!
//! ```rust
//! use curvelab_math::dual::{Dual, Dual2, MathFuncs};
//!
//! let x = Dual::new(2.0, vec!["x".to_string()]);
//! let y = Dual::new(3.0, vec!["y".to_string()]);
//! let z = &x * &y + x.exp();
//! assert_eq!(z.gradient(&["y", "x"])[0], 2.0);
//!
//! let x2 = Dual2::new(1.5, vec!["x".to_string()]);
//! let sq = &x2 * &x2;
//! assert_eq!(sq.hessian(&["x"])[[0, 0]], 2.0);
//! ```

mod dual1;
mod dual2;
mod funcs;
mod number;
mod ops;

pub use dual1::Dual;
pub use dual2::Dual2;
pub use funcs::{Chain, MathFuncs};
pub use number::{AdOrder, Gradient, Number};

use indexmap::IndexSet;
use ndarray::{Array1, Array2};
use std::sync::Arc;

use crate::error::{MathError, MathResult};

/// Shared, ordered set of variable tags.
pub type VarSet = Arc<IndexSet<String>>;

/// Builds a tag set from names, rejecting duplicates.
pub fn var_set<I, S>(names: I) -> MathResult<VarSet>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut set = IndexSet::new();
    for name in names {
        let name = name.into();
        if !set.insert(name.clone()) {
            return Err(MathError::configuration(format!(
                "duplicate variable tag '{name}'"
            )));
        }
    }
    Ok(Arc::new(set))
}

/// Union of two tag sets in first-seen order.
///
/// Returns one of the inputs unchanged whenever the union equals it, which
/// keeps `Arc` identity (and the no-copy fast path) alive through chains of
/// operations on the same seed.
pub(crate) fn union_vars(lhs: &VarSet, rhs: &VarSet) -> VarSet {
    if Arc::ptr_eq(lhs, rhs) || rhs.iter().all(|v| lhs.contains(v)) {
        return Arc::clone(lhs);
    }
    if lhs.len() < rhs.len() && lhs.iter().zip(rhs.iter()).all(|(a, b)| a == b) {
        return Arc::clone(rhs);
    }
    let mut union = IndexSet::with_capacity(lhs.len() + rhs.len());
    union.extend(lhs.iter().cloned());
    union.extend(rhs.iter().cloned());
    Arc::new(union)
}

fn same_layout(from: &VarSet, to: &VarSet) -> bool {
    Arc::ptr_eq(from, to) || (from.len() == to.len() && from.iter().eq(to.iter()))
}

/// Re-indexes a gradient from `from` onto the superset `to`.
pub(crate) fn project_grad(grad: &Array1<f64>, from: &VarSet, to: &VarSet) -> Array1<f64> {
    if same_layout(from, to) {
        return grad.clone();
    }
    let mut out = Array1::zeros(to.len());
    for (i, name) in from.iter().enumerate() {
        if let Some(j) = to.get_index_of(name) {
            out[j] = grad[i];
        }
    }
    out
}

/// Re-indexes a Hessian from `from` onto the superset `to`.
pub(crate) fn project_hess(hess: &Array2<f64>, from: &VarSet, to: &VarSet) -> Array2<f64> {
    if same_layout(from, to) {
        return hess.clone();
    }
    let idx: Vec<Option<usize>> = from.iter().map(|n| to.get_index_of(n)).collect();
    let mut out = Array2::zeros((to.len(), to.len()));
    for (i, ti) in idx.iter().enumerate() {
        let Some(ti) = ti else { continue };
        for (j, tj) in idx.iter().enumerate() {
            if let Some(tj) = tj {
                out[[*ti, *tj]] = hess[[i, j]];
            }
        }
    }
    out
}

/// Outer product `a bᵀ`.
pub(crate) fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    let n = a.len();
    let m = b.len();
    Array2::from_shape_fn((n, m), |(i, j)| a[i] * b[j])
}

/// Extracts entries of `values` for the requested tags, zero when absent.
pub(crate) fn select(values: &Array1<f64>, vars: &VarSet, names: &[&str]) -> Array1<f64> {
    names
        .iter()
        .map(|n| vars.get_index_of(*n).map_or(0.0, |i| values[i]))
        .collect()
}
