//! Curves derived from other curves.
//!
//! - [`CompositeCurve`]: sum of several curves
//! - [`ShiftedCurve`]: parallel spread
//! - [`RolledCurve`]: shape moved along the date axis
//! - [`TranslatedCurve`]: discount factors rebased to a later date
//!
//! Wrappers are immutable and hold their inputs as [`SharedCurve`]s. The
//! [`CurveOps`] methods are the preferred way to build them: repeated
//! transforms of one kind collapse onto the curve underneath, and
//! transforms of a composite distribute over its components.

pub mod composite;
pub mod compounding;
pub mod rolled;
pub mod shifted;
pub mod translated;

use std::sync::Arc;

use curvelab_core::types::{Date, Tenor};
use curvelab_math::dual::Number;

pub use composite::CompositeCurve;
pub use compounding::CompoundingMethod;
pub use rolled::RolledCurve;
pub use shifted::ShiftedCurve;
pub use translated::TranslatedCurve;

use crate::error::{CurveError, CurveResult};
use crate::traits::{CurveShape, RateCurve, SharedCurve};

/// Transform constructors on shared curves.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use curvelab_core::types::{Date, Tenor};
/// use curvelab_curves::prelude::*;
///
/// let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
/// let curve: SharedCurve<f64> = Arc::new(
///     CurveBuilder::discount()
///         .node(d(2024, 1, 1), 1.0)
///         .node(d(2025, 1, 1), 0.95)
///         .build::<f64>()
///         .unwrap(),
/// );
/// let bumped = curve.shift(0.01).unwrap().shift(0.02).unwrap();
/// assert!(matches!(bumped.shape(), CurveShape::Shifted { .. }));
///
/// let later = curve.roll(Tenor::parse("1m").unwrap()).unwrap();
/// assert_eq!(later.final_date(), d(2025, 2, 1));
/// ```
pub trait CurveOps<T: Number> {
    /// Adds `spread` (percent) to every rate.
    fn shift(&self, spread: impl Into<T>) -> CurveResult<SharedCurve<T>>;

    /// Moves the curve later by `tenor`, measured from the base date.
    fn roll(&self, tenor: Tenor) -> CurveResult<SharedCurve<T>>;

    /// Moves the curve by `days` calendar days.
    fn roll_days(&self, days: i64) -> CurveResult<SharedCurve<T>>;

    /// Rebases discount factors to `base`.
    fn translate(&self, base: Date) -> CurveResult<SharedCurve<T>>;
}

impl<T: Number> CurveOps<T> for SharedCurve<T> {
    fn shift(&self, spread: impl Into<T>) -> CurveResult<SharedCurve<T>> {
        let spread = spread.into();
        match self.shape() {
            CurveShape::Shifted {
                curve,
                spread: inner,
            } => Ok(Arc::new(ShiftedCurve::new(curve, inner + spread))),
            CurveShape::Composite { mut curves, method } => {
                curves[0] = curves[0].shift(spread)?;
                Ok(Arc::new(CompositeCurve::new(curves, method)?))
            }
            _ => Ok(Arc::new(ShiftedCurve::new(Arc::clone(self), spread))),
        }
    }

    fn roll(&self, tenor: Tenor) -> CurveResult<SharedCurve<T>> {
        let base = self.base_date();
        let target = tenor.add_unadjusted(base)?;
        self.roll_days(target - base)
    }

    fn roll_days(&self, days: i64) -> CurveResult<SharedCurve<T>> {
        if days == 0 {
            return Ok(Arc::clone(self));
        }
        match self.shape() {
            CurveShape::Rolled { curve, days: inner } => {
                let total = inner.checked_add(days).ok_or_else(|| {
                    CurveError::configuration(format!("roll of {inner} + {days} days overflows"))
                })?;
                if total == 0 {
                    Ok(curve)
                } else {
                    Ok(Arc::new(RolledCurve::new(curve, total)?))
                }
            }
            CurveShape::Composite { curves, method } => {
                let rolled = curves
                    .iter()
                    .map(|c| c.roll_days(days))
                    .collect::<CurveResult<Vec<_>>>()?;
                Ok(Arc::new(CompositeCurve::new(rolled, method)?))
            }
            _ => Ok(Arc::new(RolledCurve::new(Arc::clone(self), days)?)),
        }
    }

    fn translate(&self, base: Date) -> CurveResult<SharedCurve<T>> {
        match self.shape() {
            CurveShape::Translated { curve, .. } => curve.translate(base),
            CurveShape::Composite { curves, method } => {
                let moved = curves
                    .iter()
                    .map(|c| c.translate(base))
                    .collect::<CurveResult<Vec<_>>>()?;
                Ok(Arc::new(CompositeCurve::new(moved, method)?))
            }
            _ => Ok(Arc::new(TranslatedCurve::new(Arc::clone(self), base)?)),
        }
    }
}
