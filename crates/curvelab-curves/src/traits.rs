//! The query interface shared by curves and their transforms.
//!
//! Every curve, whether built from nodes or derived from other curves,
//! implements [`RateCurve`]. Transforms hold other curves as
//! [`SharedCurve`] trait objects, so a wrapper never copies node data and
//! sees every later mutation of the curves it wraps.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::{DayCount, DayCountConvention};
use curvelab_core::types::{Date, Tenor};
use curvelab_math::dual::Number;

use crate::error::{CurveError, CurveResult};
use crate::transforms::CompoundingMethod;

/// What the node values of a curve represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Discount factors.
    Discount,
    /// Rates in percent, as for a line curve of fixings.
    Rate,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discount => f.write_str("discount"),
            Self::Rate => f.write_str("rate"),
        }
    }
}

/// A shared, dynamically dispatched curve.
pub type SharedCurve<T> = Arc<dyn RateCurve<T>>;

/// How a curve is built from other curves.
///
/// Used by [`CurveOps`](crate::CurveOps) to collapse repeated transforms
/// onto the curve underneath.
#[derive(Debug, Clone)]
pub enum CurveShape<T: Number> {
    /// Built from nodes.
    Leaf,
    /// Sum of several curves.
    Composite {
        /// Component curves.
        curves: Vec<SharedCurve<T>>,
        /// Compounding of summed overnight rates.
        method: CompoundingMethod,
    },
    /// Another curve plus a spread.
    Shifted {
        /// Underlying curve.
        curve: SharedCurve<T>,
        /// Spread in percent.
        spread: T,
    },
    /// Another curve moved along the date axis.
    Rolled {
        /// Underlying curve.
        curve: SharedCurve<T>,
        /// Offset in calendar days.
        days: i64,
    },
    /// Another curve rebased to a later date.
    Translated {
        /// Underlying curve.
        curve: SharedCurve<T>,
        /// New base date.
        base: Date,
    },
}

/// Queries on a discount or rate curve.
///
/// Rates are in percent. `value` returns the raw node-space quantity, a
/// discount factor or a rate depending on [`kind`](RateCurve::kind).
pub trait RateCurve<T: Number>: Send + Sync + fmt::Debug {
    /// Curve identifier.
    fn id(&self) -> &str;

    /// What the values represent.
    fn kind(&self) -> CurveKind;

    /// First date of the curve.
    fn base_date(&self) -> Date;

    /// Last date covered without extrapolation.
    fn final_date(&self) -> Date;

    /// Day count for rates.
    fn day_count(&self) -> DayCountConvention;

    /// Calendar for tenor end dates.
    fn calendar(&self) -> CalendarKind;

    /// Business day convention for tenor end dates.
    fn modifier(&self) -> BusinessDayConvention;

    /// Whether [`translate`](crate::CurveOps::translate) is available.
    fn supports_translation(&self) -> bool;

    /// Raw value on `date`.
    fn value(&self, date: Date) -> CurveResult<T>;

    /// Instantaneous forward rate on `date`, in percent.
    ///
    /// Equal to `value` on rate curves.
    fn forward(&self, date: Date) -> CurveResult<T>;

    /// Compounding used when spreads or other curves are added to this one.
    fn compounding(&self) -> CompoundingMethod {
        CompoundingMethod::default()
    }

    /// Transform structure, `Leaf` for node-based curves.
    fn shape(&self) -> CurveShape<T> {
        CurveShape::Leaf
    }

    /// Discount factor on `date`.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` on rate curves.
    fn df(&self, date: Date) -> CurveResult<T> {
        match self.kind() {
            CurveKind::Discount => self.value(date),
            CurveKind::Rate => Err(CurveError::unsupported(
                "df",
                format!("curve '{}' holds rates, not discount factors", self.id()),
            )),
        }
    }

    /// Rate on `date`.
    ///
    /// On rate curves the value. On discount curves the instantaneous forward
    /// without a tenor, otherwise the simple rate from `date` to the adjusted
    /// tenor end:
    ///
    /// `(df(date) / df(end) - 1) / dcf(date, end) × 100`
    fn rate(&self, date: Date, tenor: Option<Tenor>) -> CurveResult<T> {
        match (self.kind(), tenor) {
            (CurveKind::Rate, _) => self.value(date),
            (CurveKind::Discount, None) => self.forward(date),
            (CurveKind::Discount, Some(tenor)) => {
                let end = tenor.add_to(date, self.calendar().calendar(), self.modifier())?;
                period_rate(self, date, end)
            }
        }
    }
}

/// Simple rate between two dates implied by discount factors, in percent.
///
/// # Errors
///
/// `Configuration` when the period has zero length.
pub fn period_rate<T: Number, C: RateCurve<T> + ?Sized>(
    curve: &C,
    start: Date,
    end: Date,
) -> CurveResult<T> {
    let dcf = curve.day_count().year_fraction(start, end);
    if dcf == 0.0 {
        return Err(CurveError::configuration(format!(
            "rate period {start} to {end} has zero length"
        )));
    }
    let ratio = curve.df(start)?.checked_div(&curve.df(end)?)?;
    Ok((ratio - 1.0) * (100.0 / dcf))
}

/// Instantaneous forward in percent from the per-day slope of ln DF.
pub(crate) fn forward_from_log_slope<T: Number>(
    slope: T,
    day_count: DayCountConvention,
    date: Date,
) -> CurveResult<T> {
    let dcf = day_count.year_fraction(date, date + 1);
    Ok((-slope).checked_div_f64(dcf / 100.0)?)
}

impl<T: Number, C: RateCurve<T> + ?Sized> RateCurve<T> for Arc<C> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn kind(&self) -> CurveKind {
        (**self).kind()
    }

    fn base_date(&self) -> Date {
        (**self).base_date()
    }

    fn final_date(&self) -> Date {
        (**self).final_date()
    }

    fn day_count(&self) -> DayCountConvention {
        (**self).day_count()
    }

    fn calendar(&self) -> CalendarKind {
        (**self).calendar()
    }

    fn modifier(&self) -> BusinessDayConvention {
        (**self).modifier()
    }

    fn supports_translation(&self) -> bool {
        (**self).supports_translation()
    }

    fn value(&self, date: Date) -> CurveResult<T> {
        (**self).value(date)
    }

    fn forward(&self, date: Date) -> CurveResult<T> {
        (**self).forward(date)
    }

    fn compounding(&self) -> CompoundingMethod {
        (**self).compounding()
    }

    fn shape(&self) -> CurveShape<T> {
        (**self).shape()
    }

    fn df(&self, date: Date) -> CurveResult<T> {
        (**self).df(date)
    }

    fn rate(&self, date: Date, tenor: Option<Tenor>) -> CurveResult<T> {
        (**self).rate(date, tenor)
    }
}
