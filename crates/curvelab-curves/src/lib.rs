//! # Curvelab Curves
//!
//! Interpolated discount and rate curves whose every query carries exact
//! sensitivities to the curve's node values.
//!
//! This crate provides:
//!
//! - **Curves**: [`Curve`] over discount factors or rates, generic over the AD
//!   order (`f64`, [`Dual`](curvelab_math::dual::Dual), [`Dual2`](curvelab_math::dual::Dual2))
//! - **Interpolation**: linear, log-linear, index, flat forward/backward,
//!   linear zero rate, and natural cubic splines with optional knots
//! - **Transforms**: composite, shifted, rolled and translated curves sharing
//!   their inputs without copying
//! - **Configuration**: [`CurveConfig`](config::CurveConfig), loadable from JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use curvelab_core::types::Date;
//! use curvelab_curves::prelude::*;
//!
//! let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
//! let curve = Arc::new(
//!     CurveBuilder::discount()
//!         .id("sofr")
//!         .interpolation(Interpolation::LogLinear)
//!         .node(d(2024, 1, 1), 1.0)
//!         .node(d(2025, 1, 1), 0.95)
//!         .build::<Dual>()
//!         .unwrap(),
//! );
//!
//! // sensitivity of a discount factor to the 1Y node
//! let df = curve.df(d(2024, 7, 2)).unwrap();
//! let delta = df.gradient(&["sofr1"])[0];
//! assert!(delta > 0.0);
//!
//! // a 10bp parallel shift, seen through a shared handle
//! let shared: SharedCurve<Dual> = curve.clone();
//! let bumped = shared.shift(0.1).unwrap();
//! assert!(bumped.df(d(2024, 7, 2)).unwrap().real() < df.real());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod builder;
pub mod cache;
pub mod config;
pub mod curve;
pub mod error;
pub mod interpolation;
pub mod nodes;
pub mod traits;
pub mod transforms;

pub use builder::CurveBuilder;
pub use curve::{Curve, CurveState};
pub use error::{CurveError, CurveResult, ErrorKind};
pub use traits::{CurveKind, CurveShape, RateCurve, SharedCurve};
pub use transforms::CurveOps;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::CurveBuilder;
    pub use crate::config::CurveConfig;
    pub use crate::curve::{Curve, CurveState};
    pub use crate::error::{CurveError, CurveResult, ErrorKind};
    pub use crate::interpolation::Interpolation;
    pub use crate::traits::{period_rate, CurveKind, CurveShape, RateCurve, SharedCurve};
    pub use crate::transforms::{
        CompositeCurve, CompoundingMethod, CurveOps, RolledCurve, ShiftedCurve, TranslatedCurve,
    };
    pub use curvelab_math::dual::{Dual, Dual2, Gradient, Number};
}
