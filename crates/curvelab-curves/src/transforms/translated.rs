//! Discount curves rebased to a later date.

use tracing::trace;

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::DayCountConvention;
use curvelab_core::types::Date;
use curvelab_math::dual::Number;

use super::CompoundingMethod;
use crate::error::{CurveError, CurveResult};
use crate::traits::{CurveKind, CurveShape, RateCurve, SharedCurve};

/// A discount curve seen from a later base date.
///
/// `df(d) = curve.df(d) / curve.df(base)` for `d ≥ base`; forwards are
/// unchanged.
#[derive(Debug)]
pub struct TranslatedCurve<T: Number> {
    id: String,
    curve: SharedCurve<T>,
    base: Date,
}

impl<T: Number> TranslatedCurve<T> {
    /// Rebases `curve` to `base`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation`: a rate curve, or an interpolation whose shape
    ///   does not survive rebasing.
    /// - `OutOfDomain`: `base` outside the curve's date range.
    pub fn new(curve: SharedCurve<T>, base: Date) -> CurveResult<Self> {
        if curve.kind() == CurveKind::Rate {
            return Err(CurveError::unsupported(
                "translate",
                format!("curve '{}' holds rates", curve.id()),
            ));
        }
        if !curve.supports_translation() {
            return Err(CurveError::unsupported(
                "translate",
                format!("interpolation of curve '{}' does not commute with rebasing", curve.id()),
            ));
        }
        if base < curve.base_date() || base > curve.final_date() {
            return Err(CurveError::out_of_domain(base, curve.base_date(), curve.final_date()));
        }
        let id = format!("{}_at_{base}", curve.id());
        trace!(id = %id, "translated curve");
        Ok(Self { id, curve, base })
    }

    /// Underlying curve.
    pub fn underlying(&self) -> &SharedCurve<T> {
        &self.curve
    }

    fn check(&self, date: Date) -> CurveResult<()> {
        if date < self.base {
            return Err(CurveError::out_of_domain(date, self.base, self.final_date()));
        }
        Ok(())
    }
}

impl<T: Number> RateCurve<T> for TranslatedCurve<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Discount
    }

    fn base_date(&self) -> Date {
        self.base
    }

    fn final_date(&self) -> Date {
        self.curve.final_date()
    }

    fn day_count(&self) -> DayCountConvention {
        self.curve.day_count()
    }

    fn calendar(&self) -> CalendarKind {
        self.curve.calendar()
    }

    fn modifier(&self) -> BusinessDayConvention {
        self.curve.modifier()
    }

    fn compounding(&self) -> CompoundingMethod {
        self.curve.compounding()
    }

    fn supports_translation(&self) -> bool {
        true
    }

    fn shape(&self) -> CurveShape<T> {
        CurveShape::Translated {
            curve: self.curve.clone(),
            base: self.base,
        }
    }

    fn value(&self, date: Date) -> CurveResult<T> {
        self.check(date)?;
        let df = self.curve.df(date)?;
        Ok(df.checked_div(&self.curve.df(self.base)?)?)
    }

    fn forward(&self, date: Date) -> CurveResult<T> {
        self.check(date)?;
        self.curve.forward(date)
    }
}
