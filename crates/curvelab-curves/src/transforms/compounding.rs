//! Compounding of overnight rates into discount factors.
//!
//! Adding curves, or adding a spread to a curve, is defined on daily
//! overnight rates: the combined curve's growth from day `i` to `i+1` is
//! `1 + Σⱼ ρⱼ(i)`, where `ρⱼ(i) = dfⱼ(i)/dfⱼ(i+1) - 1`. Compounding these
//! day by day is exact but costs one pass per query date.
//!
//! The approximate method replaces each curve's daily rates by their
//! geometric average over the period, `ρ̄ⱼ = (dfⱼ(base)/dfⱼ(d))^(1/n) - 1`,
//! and compounds the sum `n` times. Only the cross terms between curves are
//! affected: the error is `n` times the covariance of the curves' daily
//! rates. With daily rates of size `r` and `Δⱼ` the range of curve `j`'s
//! daily rates over the period,
//!
//! `|Δ ln DF| ≤ n·Σ_{j<k} Δⱼ·Δₖ / 4 + O(n·r³)`
//!
//! and the error vanishes when all but one curve is flat.

use std::fmt;

use serde::{Deserialize, Serialize};

use curvelab_core::types::Date;
use curvelab_math::dual::{MathFuncs, Number};

use crate::error::CurveResult;
use crate::traits::RateCurve;

/// How summed overnight rates are turned into discount factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingMethod {
    /// Day by day compounding from the base date.
    #[default]
    Exact,
    /// Compounding of geometric-average daily rates.
    Approximate,
}

impl fmt::Display for CompoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Approximate => f.write_str("approximate"),
        }
    }
}

/// Unannualised overnight rate `df(day)/df(day+1) - 1`.
pub(crate) fn overnight<T: Number>(curve: &dyn RateCurve<T>, day: Date) -> CurveResult<T> {
    let ratio = curve.df(day)?.checked_div(&curve.df(day + 1)?)?;
    Ok(ratio - 1.0)
}

/// Discount factor from `from` to `to` given daily growth factors.
///
/// For `to < from` the result is the growth over `[to, from)`, the inverse
/// of discounting forward.
pub(crate) fn compound_daily<T: Number>(
    from: Date,
    to: Date,
    mut growth: impl FnMut(Date) -> CurveResult<T>,
) -> CurveResult<T> {
    let (start, end) = if to >= from { (from, to) } else { (to, from) };
    let mut acc = T::from(1.0);
    let mut day = start;
    while day < end {
        acc = acc * growth(day)?;
        day = day + 1;
    }
    if to >= from {
        Ok(T::from(1.0).checked_div(&acc)?)
    } else {
        Ok(acc)
    }
}

/// Geometric-average daily rate of `curve` between two distinct dates.
pub(crate) fn average_overnight<T: Number>(
    curve: &dyn RateCurve<T>,
    from: Date,
    to: Date,
) -> CurveResult<T> {
    let n = (to - from) as f64;
    let ratio = curve.df(from)?.checked_div(&curve.df(to)?)?;
    Ok(ratio.try_powf(1.0 / n)? - 1.0)
}

/// `(1 + rate)^(-n)`, discounting `n` days at a constant daily rate.
pub(crate) fn compound_average<T: Number>(rate: T, n: i64) -> CurveResult<T> {
    Ok((rate + 1.0).try_powf(-(n as f64))?)
}
