//! Interpolation between curve nodes.
//!
//! All kernels work on the day axis of a [`NodeStore`]. Outside the node
//! range the end interval's formula is continued, which is what curve
//! extrapolation relies on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use curvelab_math::dual::{MathFuncs, Number};

use crate::error::{CurveError, CurveResult};
use crate::nodes::NodeStore;
use crate::traits::CurveKind;

/// Interpolation method between nodes.
///
/// On a discount curve the method acts on discount factors; on a rate curve
/// it acts on the rate values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Linear in the value.
    Linear,
    /// Linear in the log of the value.
    #[default]
    LogLinear,
    /// Linear in the reciprocal of the value.
    LinearIndex,
    /// Constant forward over each interval; a node starts the interval on its right.
    FlatForward,
    /// Constant forward over each interval; a node ends the interval on its left.
    FlatBackward,
    /// Linear in the continuously compounded zero rate, flat in the first interval.
    LinearZeroRate,
    /// Natural cubic spline on log discount factors or on rates.
    Spline,
}

impl Interpolation {
    /// All methods, in declaration order.
    pub const ALL: [Interpolation; 7] = [
        Self::Linear,
        Self::LogLinear,
        Self::LinearIndex,
        Self::FlatForward,
        Self::FlatBackward,
        Self::LinearZeroRate,
        Self::Spline,
    ];

    /// Configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::LogLinear => "log_linear",
            Self::LinearIndex => "linear_index",
            Self::FlatForward => "flat_forward",
            Self::FlatBackward => "flat_backward",
            Self::LinearZeroRate => "linear_zero_rate",
            Self::Spline => "spline",
        }
    }

    /// Whether dividing every discount factor by a constant commutes with
    /// the interpolation, so that rebasing a curve preserves its shape.
    pub fn supports_translation(self) -> bool {
        matches!(
            self,
            Self::Linear | Self::LogLinear | Self::LinearIndex | Self::Spline
        )
    }

    /// Whether forwards jump at node dates.
    pub fn is_step(self) -> bool {
        matches!(self, Self::FlatForward | Self::FlatBackward)
    }

    /// Rejects methods that have no meaning for `kind`.
    pub(crate) fn check_kind(self, kind: CurveKind) -> CurveResult<()> {
        if kind == CurveKind::Rate && self == Self::LinearZeroRate {
            return Err(CurveError::configuration(
                "linear_zero_rate interpolation needs a discount curve",
            ));
        }
        Ok(())
    }

    /// Method used before the first spline knot.
    pub(crate) fn spline_base(self, kind: CurveKind) -> Interpolation {
        match (self, kind) {
            (Self::Spline, CurveKind::Discount) => Self::LogLinear,
            (Self::Spline, CurveKind::Rate) => Self::Linear,
            (other, _) => other,
        }
    }

    fn interval<T: Number>(self, nodes: &NodeStore<T>, x: f64) -> usize {
        match self {
            Self::FlatBackward => nodes.index_left_closed(x),
            _ => nodes.index_left(x),
        }
    }

    /// Interpolated node-space value at day offset `x`.
    ///
    /// # Errors
    ///
    /// `Domain` when a log or reciprocal meets a non-positive or zero value,
    /// `Configuration` for `Spline`, whose values come from a solved spline.
    pub(crate) fn value<T: Number>(
        self,
        kind: CurveKind,
        nodes: &NodeStore<T>,
        x: f64,
    ) -> CurveResult<T> {
        let i = self.interval(nodes, x);
        let seg = Segment::new(nodes, i, x);
        match (kind, self) {
            (_, Self::Linear) => Ok(seg.lerp(seg.v0, seg.v1)),
            (_, Self::LogLinear) | (CurveKind::Discount, Self::FlatForward | Self::FlatBackward) => {
                Ok(seg.lerp(&seg.v0.try_ln()?, &seg.v1.try_ln()?).exp())
            }
            (_, Self::LinearIndex) => {
                let (i0, i1) = seg.reciprocals()?;
                Ok(T::from(1.0).checked_div(&seg.lerp(&i0, &i1))?)
            }
            (CurveKind::Rate, Self::FlatForward) => {
                Ok(if x >= seg.x1 { seg.v1 } else { seg.v0 }.clone())
            }
            (CurveKind::Rate, Self::FlatBackward) => {
                Ok(if x <= seg.x0 { seg.v0 } else { seg.v1 }.clone())
            }
            (CurveKind::Discount, Self::LinearZeroRate) => {
                let (ln_v0, z0, z1) = zero_rates(nodes, i)?;
                Ok((ln_v0 - seg.lerp(&z0, &z1) * x).exp())
            }
            (CurveKind::Rate, Self::LinearZeroRate) => Err(CurveError::configuration(
                "linear_zero_rate interpolation needs a discount curve",
            )),
            (_, Self::Spline) => Err(CurveError::configuration(
                "spline values are evaluated on the solved spline",
            )),
        }
    }

    /// Derivative of ln DF per day at `x` on a discount curve.
    ///
    /// Step methods return the constant slope of the interval that owns `x`,
    /// so the result jumps at node dates.
    pub(crate) fn log_slope<T: Number>(self, nodes: &NodeStore<T>, x: f64) -> CurveResult<T> {
        let i = self.interval(nodes, x);
        let seg = Segment::new(nodes, i, x);
        let h = seg.x1 - seg.x0;
        match self {
            Self::Linear => {
                let slope = (seg.v1.clone() - seg.v0.clone()) / h;
                Ok(slope.checked_div(&seg.lerp(seg.v0, seg.v1))?)
            }
            Self::LogLinear | Self::FlatForward | Self::FlatBackward => {
                Ok((seg.v1.try_ln()? - seg.v0.try_ln()?) / h)
            }
            Self::LinearIndex => {
                let (i0, i1) = seg.reciprocals()?;
                let slope = (i1.clone() - i0.clone()) / h;
                Ok(-slope.checked_div(&seg.lerp(&i0, &i1))?)
            }
            Self::LinearZeroRate => {
                let (_, z0, z1) = zero_rates(nodes, i)?;
                let dz = (z1.clone() - z0.clone()) / h;
                Ok(-(seg.lerp(&z0, &z1) + dz * x))
            }
            Self::Spline => Err(CurveError::configuration(
                "spline slopes are evaluated on the solved spline",
            )),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == lower)
            .ok_or_else(|| CurveError::configuration(format!("unknown interpolation '{s}'")))
    }
}

/// The bracketing interval of a query point.
struct Segment<'a, T> {
    x0: f64,
    x1: f64,
    v0: &'a T,
    v1: &'a T,
    w: f64,
}

impl<'a, T: Number> Segment<'a, T> {
    fn new(nodes: &'a NodeStore<T>, i: usize, x: f64) -> Self {
        let (x0, x1) = (nodes.x()[i], nodes.x()[i + 1]);
        Self {
            x0,
            x1,
            v0: &nodes.values()[i],
            v1: &nodes.values()[i + 1],
            w: (x - x0) / (x1 - x0),
        }
    }

    fn lerp(&self, a: &T, b: &T) -> T {
        a.clone() * (1.0 - self.w) + b.clone() * self.w
    }

    fn reciprocals(&self) -> CurveResult<(T, T)> {
        let one = T::from(1.0);
        Ok((one.checked_div(self.v0)?, one.checked_div(self.v1)?))
    }
}

/// `ln v₀` and the zero rates per day at nodes `i` and `i+1`.
///
/// The zero rate is measured from the first node, `z = -(ln v - ln v₀)/x`,
/// and the first node borrows the rate of the second.
fn zero_rates<T: Number>(nodes: &NodeStore<T>, i: usize) -> CurveResult<(T, T, T)> {
    let values = nodes.values();
    let ln_v0 = values[0].try_ln()?;
    let rate = |j: usize| -> CurveResult<T> {
        let j = j.max(1);
        Ok((ln_v0.clone() - values[j].try_ln()?) / nodes.x()[j])
    };
    let z0 = rate(i)?;
    let z1 = rate(i + 1)?;
    Ok((ln_v0, z0, z1))
}
