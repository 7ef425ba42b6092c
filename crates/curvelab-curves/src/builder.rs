//! Fluent construction of [`Curve`]s.

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::DayCountConvention;
use curvelab_core::types::Date;
use curvelab_math::dual::Number;

use crate::config::CurveConfig;
use crate::curve::Curve;
use crate::error::CurveResult;
use crate::interpolation::Interpolation;
use crate::traits::CurveKind;
use crate::transforms::CompoundingMethod;

/// Builder for discount and rate curves.
///
/// Nodes are given as real values; `build` seeds them as AD variables of
/// the requested order.
///
/// # Example
///
/// ```rust
/// use curvelab_core::types::Date;
/// use curvelab_curves::prelude::*;
///
/// let curve = CurveBuilder::rate()
///     .id("fixings")
///     .interpolation(Interpolation::FlatForward)
///     .node(Date::from_ymd(2024, 1, 17).unwrap(), 5.35)
///     .node(Date::from_ymd(2024, 2, 21).unwrap(), 5.34)
///     .build::<f64>()
///     .unwrap();
/// assert_eq!(curve.rate(Date::from_ymd(2024, 2, 1).unwrap(), None).unwrap(), 5.35);
/// ```
#[derive(Debug, Clone)]
pub struct CurveBuilder {
    kind: CurveKind,
    nodes: Vec<(Date, f64)>,
    config: CurveConfig,
}

impl CurveBuilder {
    /// Creates a builder with default settings.
    pub fn new(kind: CurveKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            config: CurveConfig::default(),
        }
    }

    /// Builder for a curve of discount factors.
    pub fn discount() -> Self {
        Self::new(CurveKind::Discount)
    }

    /// Builder for a line curve of rates.
    pub fn rate() -> Self {
        Self::new(CurveKind::Rate)
    }

    /// Replaces every setting with `config`. Nodes are kept.
    #[must_use]
    pub fn config(mut self, config: CurveConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends a node.
    #[must_use]
    pub fn node(mut self, date: Date, value: f64) -> Self {
        self.nodes.push((date, value));
        self
    }

    /// Appends several nodes.
    #[must_use]
    pub fn nodes(mut self, nodes: impl IntoIterator<Item = (Date, f64)>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Sets the curve id, which also prefixes node variable tags.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.config.id = Some(id.into());
        self
    }

    /// Sets the interpolation method.
    #[must_use]
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.config.interpolation = interpolation;
        self
    }

    /// Sets explicit spline knots.
    #[must_use]
    pub fn knots(mut self, knots: Vec<Date>) -> Self {
        self.config.knots = Some(knots);
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.config.day_count = day_count;
        self
    }

    /// Sets the calendar.
    #[must_use]
    pub fn calendar(mut self, calendar: CalendarKind) -> Self {
        self.config.calendar = calendar;
        self
    }

    /// Sets the business day convention for tenor end dates.
    #[must_use]
    pub fn modifier(mut self, modifier: BusinessDayConvention) -> Self {
        self.config.modifier = modifier;
        self
    }

    /// Allows queries outside the node range.
    #[must_use]
    pub fn extrapolate(mut self, extrapolate: bool) -> Self {
        self.config.extrapolate = extrapolate;
        self
    }

    /// Enables or disables memoisation.
    #[must_use]
    pub fn caching(mut self, caching: bool) -> Self {
        self.config.caching = caching;
        self
    }

    /// Sets the compounding used when spreads are added to the curve.
    #[must_use]
    pub fn compounding(mut self, compounding: CompoundingMethod) -> Self {
        self.config.compounding = compounding;
        self
    }

    /// Builds the curve with AD order `T`.
    ///
    /// # Errors
    ///
    /// `Configuration` for invalid nodes or knots, or an interpolation that
    /// does not apply to the curve kind. Spline solves happen on first query.
    pub fn build<T: Number>(self) -> CurveResult<Curve<T>> {
        let (dates, values) = self.nodes.into_iter().unzip();
        Curve::from_parts(self.kind, self.config, dates, values)
    }
}
