//! Curves moved along the date axis.

use tracing::trace;

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::DayCountConvention;
use curvelab_core::types::Date;
use curvelab_math::dual::{MathFuncs, Number};

use super::CompoundingMethod;
use crate::error::CurveResult;
use crate::traits::{CurveKind, CurveShape, RateCurve, SharedCurve};

/// A curve whose shape is moved `days` later (or earlier when negative).
///
/// `rate(d) = curve.rate(d - days)` while the base date stays put:
///
/// - discount curves rolled forward carry the initial overnight rate flat
///   over the gap `[base, base + days)`;
/// - discount curves rolled backward drop the first `|days|` of the curve and
///   are rebased so that `DF(base) = 1`;
/// - rate curves use the first value wherever `d - days` precedes the base.
#[derive(Debug)]
pub struct RolledCurve<T: Number> {
    id: String,
    curve: SharedCurve<T>,
    days: i64,
}

impl<T: Number> RolledCurve<T> {
    /// Wraps `curve`, moving it by `days` calendar days.
    ///
    /// # Errors
    ///
    /// `Configuration` when the moved base or final date leaves the
    /// representable date range.
    pub fn new(curve: SharedCurve<T>, days: i64) -> CurveResult<Self> {
        curve.base_date().checked_add_days(days)?;
        curve.final_date().checked_add_days(days)?;
        let id = format!("{}_roll{days}", curve.id());
        trace!(id = %id, days, "rolled curve");
        Ok(Self { id, curve, days })
    }

    /// Offset in calendar days.
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Underlying curve.
    pub fn underlying(&self) -> &SharedCurve<T> {
        &self.curve
    }

    fn source(&self, date: Date) -> Date {
        let base = self.curve.base_date();
        let src = date - self.days;
        if src < base {
            base
        } else {
            src
        }
    }

    fn rolled_df(&self, date: Date) -> CurveResult<T> {
        let base = self.curve.base_date();
        let df0 = self.curve.df(base)?;
        if self.days >= 0 {
            // one day of growth at the initial overnight rate
            let step = self.curve.df(base + 1)?.checked_div(&df0)?;
            let split = base + self.days;
            if date < split {
                Ok(step.try_powf((date - base) as f64)?)
            } else {
                let tail = self.curve.df(date - self.days)?.checked_div(&df0)?;
                Ok(tail * step.try_powf(self.days as f64)?)
            }
        } else {
            let anchor = base - self.days;
            let anchor_df = self.curve.df(anchor)?;
            Ok(self.curve.df(date - self.days)?.checked_div(&anchor_df)?)
        }
    }
}

impl<T: Number> RateCurve<T> for RolledCurve<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> CurveKind {
        self.curve.kind()
    }

    fn base_date(&self) -> Date {
        self.curve.base_date()
    }

    fn final_date(&self) -> Date {
        self.curve.final_date() + self.days
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
        self.curve.supports_translation()
    }

    fn shape(&self) -> CurveShape<T> {
        CurveShape::Rolled {
            curve: self.curve.clone(),
            days: self.days,
        }
    }

    fn value(&self, date: Date) -> CurveResult<T> {
        match self.kind() {
            CurveKind::Rate => self.curve.value(self.source(date)),
            CurveKind::Discount => self.rolled_df(date),
        }
    }

    fn forward(&self, date: Date) -> CurveResult<T> {
        self.curve.forward(self.source(date))
    }
}
