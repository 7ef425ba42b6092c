//! B-spline curves with dual-valued coefficients.
//!
//! [`PPSpline`] stores a degree, a clamped knot sequence and (once solved)
//! coefficients. `csolve` builds the collocation system, optionally with
//! derivative constraints at either end, and solves it with
//! [`dsolve`](crate::linalg::dsolve) so that derivatives with respect to
//! the targets flow into the coefficients.

mod bspline;
mod ppspline;

pub use ppspline::PPSpline;
