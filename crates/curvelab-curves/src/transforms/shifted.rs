//! Parallel spread over another curve.

use tracing::trace;

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::{DayCount, DayCountConvention};
use curvelab_core::types::Date;
use curvelab_math::dual::Number;

use super::compounding::{compound_average, compound_daily, overnight};
use super::CompoundingMethod;
use crate::error::CurveResult;
use crate::traits::{CurveKind, CurveShape, RateCurve, SharedCurve};

/// A curve wrapper that adds a constant spread to every rate.
///
/// The spread is in percent, like the rates. On a rate curve it is added to
/// the values. On a discount curve it enters as an extra overnight rate
/// `spread/100 × dcf(day, day+1)` compounded together with the underlying
/// curve's own overnight rates, so `rate(d, None)` moves by exactly `spread`.
///
/// A dual-valued spread carries the sensitivity of every query to the shift.
#[derive(Debug)]
pub struct ShiftedCurve<T: Number> {
    id: String,
    curve: SharedCurve<T>,
    spread: T,
    method: CompoundingMethod,
}

impl<T: Number> ShiftedCurve<T> {
    /// Wraps `curve`, compounding as the curve itself does.
    pub fn new(curve: SharedCurve<T>, spread: T) -> Self {
        let method = curve.compounding();
        let id = format!("{}_shift", curve.id());
        trace!(id = %id, spread = spread.real(), "shifted curve");
        Self {
            id,
            curve,
            spread,
            method,
        }
    }

    /// Spread in percent.
    pub fn spread(&self) -> &T {
        &self.spread
    }

    /// Underlying curve.
    pub fn underlying(&self) -> &SharedCurve<T> {
        &self.curve
    }

    fn daily_spread(&self, day: Date) -> T {
        let dcf = self.curve.day_count().year_fraction(day, day + 1);
        self.spread.clone() * (dcf / 100.0)
    }

    fn shifted_df(&self, date: Date) -> CurveResult<T> {
        let base = self.curve.base_date();
        match self.method {
            CompoundingMethod::Exact => {
                let base_df = self.curve.df(base)?;
                let factor = compound_daily(base, date, |day| {
                    Ok(overnight(self.curve.as_ref(), day)? + self.daily_spread(day) + 1.0)
                })?;
                Ok(base_df * factor)
            }
            CompoundingMethod::Approximate => {
                let df = self.curve.df(date)?;
                let n = date - base;
                if n == 0 {
                    return Ok(df);
                }
                let dcf = self.curve.day_count().year_fraction(base, date);
                let daily = self.spread.clone() * (dcf / 100.0 / n as f64);
                Ok(df * compound_average(daily, n)?)
            }
        }
    }
}

impl<T: Number> RateCurve<T> for ShiftedCurve<T> {
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
        self.method
    }

    fn supports_translation(&self) -> bool {
        self.curve.supports_translation()
    }

    fn shape(&self) -> CurveShape<T> {
        CurveShape::Shifted {
            curve: self.curve.clone(),
            spread: self.spread.clone(),
        }
    }

    fn value(&self, date: Date) -> CurveResult<T> {
        match self.kind() {
            CurveKind::Rate => Ok(self.curve.value(date)? + &self.spread),
            CurveKind::Discount => self.shifted_df(date),
        }
    }

    fn forward(&self, date: Date) -> CurveResult<T> {
        Ok(self.curve.forward(date)? + &self.spread)
    }
}
