//! # Curvelab Math
//!
//! Numeric kernel for the Curvelab curve engine:
//!
//! - **Dual numbers**: [`Dual`](dual::Dual) and [`Dual2`](dual::Dual2) for exact
//!   first and second order forward-mode derivatives, with the
//!   [`Number`](dual::Number) trait to write code once for every order
//! - **Linear Algebra**: pivoted LU and least-squares solves whose right-hand
//!   side may carry derivatives
//! - **Splines**: B-spline basis evaluation, collocation and [`PPSpline`](splines::PPSpline)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::needless_range_loop)]

pub mod dual;
pub mod error;
pub mod linalg;
pub mod splines;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dual::{var_set, AdOrder, Dual, Dual2, Gradient, MathFuncs, Number, VarSet};
    pub use crate::error::{MathError, MathResult};
    pub use crate::linalg::dsolve;
    pub use crate::splines::PPSpline;
}

pub use error::{MathError, MathResult};
