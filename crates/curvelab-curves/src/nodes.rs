//! Ordered node storage with binary-search lookups.

use curvelab_core::types::Date;
use curvelab_math::dual::Number;

use crate::error::{CurveError, CurveResult};
use crate::traits::CurveKind;

/// Strictly increasing node dates with one value per date.
///
/// Dates are also kept as day offsets `x` from the first node, the axis all
/// interpolation and spline evaluation runs on.
#[derive(Debug, Clone)]
pub struct NodeStore<T> {
    dates: Vec<Date>,
    x: Vec<f64>,
    values: Vec<T>,
}

impl<T: Number> NodeStore<T> {
    /// Creates a node store.
    ///
    /// # Errors
    ///
    /// `Configuration` for fewer than two nodes, dates that do not strictly
    /// increase, mismatched lengths, or non-positive discount factors.
    pub fn new(dates: Vec<Date>, values: Vec<T>, kind: CurveKind) -> CurveResult<Self> {
        if dates.len() != values.len() {
            return Err(CurveError::configuration(format!(
                "{} node dates for {} values",
                dates.len(),
                values.len()
            )));
        }
        if dates.len() < 2 {
            return Err(CurveError::configuration(format!(
                "a curve needs at least 2 nodes, got {}",
                dates.len()
            )));
        }
        if let Some(w) = dates.windows(2).find(|w| w[1] <= w[0]) {
            return Err(CurveError::configuration(format!(
                "node dates must strictly increase: {} follows {}",
                w[1], w[0]
            )));
        }
        check_values(kind, values.iter().map(T::real))?;
        let first = dates[0];
        let x = dates.iter().map(|d| (*d - first) as f64).collect();
        Ok(Self { dates, x, values })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false; a store holds at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Node dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Node values.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Node positions in days from the first node.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// First node date.
    pub fn first(&self) -> Date {
        self.dates[0]
    }

    /// Last node date.
    pub fn last(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Day offset of `date` from the first node.
    pub fn days(&self, date: Date) -> f64 {
        (date - self.first()) as f64
    }

    /// Index of the node exactly on `date`.
    pub fn position(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Interval `i` with `x[i] <= x < x[i+1]`, clamped to `[0, len-2]`.
    ///
    /// A point on an interior node belongs to the interval on its right.
    pub fn index_left(&self, x: f64) -> usize {
        let idx = self.x.partition_point(|xi| *xi <= x);
        idx.saturating_sub(1).min(self.len() - 2)
    }

    /// Interval `i` with `x[i] < x <= x[i+1]`, clamped to `[0, len-2]`.
    ///
    /// A point on an interior node belongs to the interval on its left.
    pub fn index_left_closed(&self, x: f64) -> usize {
        let idx = self.x.partition_point(|xi| *xi < x);
        idx.saturating_sub(1).min(self.len() - 2)
    }

    pub(crate) fn replace_values(&mut self, values: Vec<T>) {
        self.values = values;
    }
}

/// Rejects non-finite values, and non-positive values on discount curves.
pub(crate) fn check_values(kind: CurveKind, values: impl IntoIterator<Item = f64>) -> CurveResult<()> {
    for (i, v) in values.into_iter().enumerate() {
        if !v.is_finite() {
            return Err(CurveError::configuration(format!("node {i} is not finite: {v}")));
        }
        if kind == CurveKind::Discount && v <= 0.0 {
            return Err(CurveError::configuration(format!(
                "discount factor at node {i} must be positive, got {v}"
            )));
        }
    }
    Ok(())
}
