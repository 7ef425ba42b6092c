//! Sum of several curves.

use tracing::debug;

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::DayCountConvention;
use curvelab_core::types::Date;
use curvelab_math::dual::Number;

use super::compounding::{average_overnight, compound_average, compound_daily, overnight};
use super::CompoundingMethod;
use crate::error::{CurveError, CurveResult};
use crate::traits::{CurveKind, CurveShape, RateCurve, SharedCurve};

/// A curve whose rates are the sum of its components' rates.
///
/// Rate curves add their values. Discount curves add their overnight rates
/// and compound the sum, see [`compounding`](super::compounding) for the
/// exact and approximate methods. Components must agree on kind, base date,
/// day count and calendar.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use curvelab_core::types::Date;
/// use curvelab_curves::prelude::*;
///
/// let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
/// let line = |v: f64| -> SharedCurve<f64> {
///     Arc::new(CurveBuilder::rate().node(d(2024, 1, 1), v).node(d(2025, 1, 1), v).build::<f64>().unwrap())
/// };
/// let sum = CompositeCurve::new(vec![line(3.0), line(0.25)], CompoundingMethod::Exact).unwrap();
/// assert_eq!(sum.rate(d(2024, 6, 1), None).unwrap(), 3.25);
/// ```
#[derive(Debug)]
pub struct CompositeCurve<T: Number> {
    id: String,
    curves: Vec<SharedCurve<T>>,
    method: CompoundingMethod,
}

impl<T: Number> CompositeCurve<T> {
    /// Combines `curves`.
    ///
    /// # Errors
    ///
    /// `Consistency` for an empty list or components that differ in kind,
    /// base date, day count or calendar.
    pub fn new(curves: Vec<SharedCurve<T>>, method: CompoundingMethod) -> CurveResult<Self> {
        let first = curves
            .first()
            .ok_or_else(|| CurveError::consistency("a composite curve needs at least one curve"))?;
        for other in &curves[1..] {
            let mismatch = if other.kind() != first.kind() {
                Some(format!("kind {} differs from {}", other.kind(), first.kind()))
            } else if other.base_date() != first.base_date() {
                Some(format!("base date {} differs from {}", other.base_date(), first.base_date()))
            } else if other.day_count() != first.day_count() {
                Some(format!("day count {} differs from {}", other.day_count(), first.day_count()))
            } else if other.calendar() != first.calendar() {
                Some(format!("calendar {} differs from {}", other.calendar(), first.calendar()))
            } else {
                None
            };
            if let Some(reason) = mismatch {
                return Err(CurveError::consistency(format!(
                    "curve '{}' cannot join '{}': {reason}",
                    other.id(),
                    first.id()
                )));
            }
        }

        let ids: Vec<&str> = curves.iter().map(|c| c.id()).collect();
        let id = format!("composite({})", ids.join(","));
        debug!(id = %id, components = curves.len(), method = %method, "composite curve built");
        Ok(Self { id, curves, method })
    }

    /// Component curves.
    pub fn curves(&self) -> &[SharedCurve<T>] {
        &self.curves
    }

    fn composite_df(&self, date: Date) -> CurveResult<T> {
        let base = self.base_date();
        let mut base_df = T::from(1.0);
        for curve in &self.curves {
            base_df = base_df * curve.df(base)?;
        }
        let factor = match self.method {
            CompoundingMethod::Exact => compound_daily(base, date, |day| {
                let mut growth = T::from(1.0);
                for curve in &self.curves {
                    growth = growth + overnight(curve.as_ref(), day)?;
                }
                Ok(growth)
            })?,
            CompoundingMethod::Approximate => {
                let n = date - base;
                if n == 0 {
                    return Ok(base_df);
                }
                let mut rate = T::from(0.0);
                for curve in &self.curves {
                    rate = rate + average_overnight(curve.as_ref(), base, date)?;
                }
                compound_average(rate, n)?
            }
        };
        Ok(base_df * factor)
    }
}

impl<T: Number> RateCurve<T> for CompositeCurve<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> CurveKind {
        self.curves[0].kind()
    }

    fn base_date(&self) -> Date {
        self.curves[0].base_date()
    }

    fn final_date(&self) -> Date {
        self.curves
            .iter()
            .map(|c| c.final_date())
            .min()
            .unwrap_or_else(|| self.base_date())
    }

    fn day_count(&self) -> DayCountConvention {
        self.curves[0].day_count()
    }

    fn calendar(&self) -> CalendarKind {
        self.curves[0].calendar()
    }

    fn modifier(&self) -> BusinessDayConvention {
        self.curves[0].modifier()
    }

    fn compounding(&self) -> CompoundingMethod {
        self.method
    }

    fn supports_translation(&self) -> bool {
        self.curves.iter().all(|c| c.supports_translation())
    }

    fn shape(&self) -> CurveShape<T> {
        CurveShape::Composite {
            curves: self.curves.clone(),
            method: self.method,
        }
    }

    fn value(&self, date: Date) -> CurveResult<T> {
        match self.kind() {
            CurveKind::Rate => {
                let mut sum = T::from(0.0);
                for curve in &self.curves {
                    sum = sum + curve.value(date)?;
                }
                Ok(sum)
            }
            CurveKind::Discount => self.composite_df(date),
        }
    }

    fn forward(&self, date: Date) -> CurveResult<T> {
        let mut sum = T::from(0.0);
        for curve in &self.curves {
            sum = sum + curve.forward(date)?;
        }
        Ok(sum)
    }
}
