//! Node-based discount and rate curves.
//!
//! A [`Curve`] owns its nodes, seeds every node value as an independent AD
//! variable tagged `{id}{i}`, and solves its spline lazily on the first
//! query after construction or mutation. Mutations go through `&self`, so a
//! curve shared behind an `Arc` can be updated in place while every wrapper
//! built on it observes the change.

use std::fmt;

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::DayCountConvention;
use curvelab_core::types::Date;
use curvelab_math::dual::{var_set, MathFuncs, Number, VarSet};
use curvelab_math::splines::PPSpline;

use crate::cache::QueryCache;
use crate::config::CurveConfig;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::Interpolation;
use crate::nodes::{check_values, NodeStore};
use crate::traits::{forward_from_log_slope, CurveKind, RateCurve};
use crate::transforms::CompoundingMethod;

const SPLINE_DEGREE: usize = 3;
const BOUNDARY_MULTIPLICITY: usize = SPLINE_DEGREE + 1;

/// Lifecycle of a curve's derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveState {
    /// Nodes changed and the spline has not been solved yet.
    NodesSet,
    /// Every query can be answered.
    Queryable,
}

/// Knot layout and collocation points of the spline region.
///
/// Depends only on dates, so it is fixed for the life of the curve.
#[derive(Debug, Clone)]
struct SplinePlan<T> {
    knots: Vec<Date>,
    template: PPSpline<T>,
    tau: Vec<f64>,
    nodes: Vec<usize>,
    start: f64,
}

impl<T: Number> SplinePlan<T> {
    fn new(knots: Vec<Date>, nodes: &NodeStore<T>) -> CurveResult<Self> {
        if knots.len() < 2 * BOUNDARY_MULTIPLICITY {
            return Err(CurveError::configuration(format!(
                "a cubic spline needs at least {} knots, got {}",
                2 * BOUNDARY_MULTIPLICITY,
                knots.len()
            )));
        }
        let mut distinct = knots.clone();
        distinct.dedup();
        if let Some(stray) = distinct.iter().find(|k| nodes.position(**k).is_none()) {
            return Err(CurveError::configuration(format!(
                "spline knot {stray} is not a node date"
            )));
        }
        let first = knots[0];
        let last = knots[knots.len() - 1];
        if last != nodes.last() {
            return Err(CurveError::configuration(format!(
                "spline knots end on {last} but the last node is {}",
                nodes.last()
            )));
        }

        let t: Vec<f64> = knots.iter().map(|k| nodes.days(*k)).collect();
        let template = PPSpline::new(SPLINE_DEGREE, t, None)?;

        let in_range: Vec<usize> = (0..nodes.len())
            .filter(|i| (first..=last).contains(&nodes.dates()[*i]))
            .collect();
        if in_range.len() + 2 != template.n() {
            return Err(CurveError::configuration(format!(
                "{} nodes inside the knot range plus 2 end conditions do not match {} spline coefficients",
                in_range.len(),
                template.n()
            )));
        }

        let (start, end) = (nodes.days(first), nodes.days(last));
        let mut tau = Vec::with_capacity(in_range.len() + 2);
        tau.push(start);
        tau.extend(in_range.iter().map(|i| nodes.x()[*i]));
        tau.push(end);

        Ok(Self {
            knots,
            template,
            tau,
            nodes: in_range,
            start,
        })
    }

    /// Every node date, with the end dates repeated to boundary multiplicity.
    fn default_knots(dates: &[Date]) -> Vec<Date> {
        let (first, last) = (dates[0], dates[dates.len() - 1]);
        let mut knots = vec![first; BOUNDARY_MULTIPLICITY];
        knots.extend_from_slice(&dates[1..dates.len() - 1]);
        knots.extend(std::iter::repeat(last).take(BOUNDARY_MULTIPLICITY));
        knots
    }

    /// Natural spline through ln DF (discount) or the values (rate).
    fn solve(&self, kind: CurveKind, nodes: &NodeStore<T>) -> CurveResult<PPSpline<T>> {
        let mut y = Vec::with_capacity(self.tau.len());
        y.push(T::from(0.0));
        for i in &self.nodes {
            let v = &nodes.values()[*i];
            y.push(match kind {
                CurveKind::Discount => v.try_ln()?,
                CurveKind::Rate => v.clone(),
            });
        }
        y.push(T::from(0.0));

        let mut spline = self.template.clone();
        spline.csolve(&self.tau, &y, 2, 2, false)?;
        Ok(spline)
    }
}

#[derive(Debug)]
struct CurveInner<T> {
    nodes: NodeStore<T>,
    spline: Option<PPSpline<T>>,
    state: CurveState,
    state_id: u64,
}

/// An interpolated curve of discount factors or rates.
///
/// Built with [`CurveBuilder`](crate::CurveBuilder). The AD order is the
/// type parameter: `Curve<f64>` for plain values, `Curve<Dual>` for
/// gradients and `Curve<Dual2>` for Hessians with respect to the node
/// values.
///
/// # Example
///
/// ```rust
/// use curvelab_core::types::Date;
/// use curvelab_curves::prelude::*;
///
/// let d = |y, m, dd| Date::from_ymd(y, m, dd).unwrap();
/// let curve = CurveBuilder::discount()
///     .id("ois")
///     .node(d(2024, 1, 1), 1.0)
///     .node(d(2025, 1, 1), 0.95)
///     .build::<Dual>()
///     .unwrap();
///
/// let df = curve.df(d(2024, 7, 2)).unwrap();
/// assert!((df.real() - 0.95_f64.sqrt()).abs() < 1e-12);
/// assert!(df.gradient(&["ois1"])[0] > 0.0);
/// ```
pub struct Curve<T: Number> {
    id: String,
    kind: CurveKind,
    config: CurveConfig,
    base: Interpolation,
    vars: VarSet,
    plan: Option<SplinePlan<T>>,
    inner: RwLock<CurveInner<T>>,
    cache: QueryCache<T>,
}

impl<T: Number> Curve<T> {
    pub(crate) fn from_parts(
        kind: CurveKind,
        mut config: CurveConfig,
        dates: Vec<Date>,
        reals: Vec<f64>,
    ) -> CurveResult<Self> {
        let id = config
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        config.id = Some(id.clone());
        config.interpolation.check_kind(kind)?;
        check_values(kind, reals.iter().copied())?;

        let vars = var_set((0..reals.len()).map(|i| format!("{id}{i}")))?;
        let values = T::seed(&reals, &vars)?;
        let nodes = NodeStore::new(dates, values, kind)?;

        let knots = match (&config.knots, config.interpolation) {
            (Some(knots), _) => Some(knots.clone()),
            (None, Interpolation::Spline) => Some(SplinePlan::<T>::default_knots(nodes.dates())),
            (None, _) => None,
        };
        let plan = knots.map(|k| SplinePlan::new(k, &nodes)).transpose()?;
        let state = if plan.is_some() {
            CurveState::NodesSet
        } else {
            CurveState::Queryable
        };

        debug!(
            id = %id,
            kind = %kind,
            interpolation = %config.interpolation,
            nodes = nodes.len(),
            spline = plan.is_some(),
            order = %T::ORDER,
            "curve built"
        );

        Ok(Self {
            base: config.interpolation.spline_base(kind),
            cache: QueryCache::new(config.caching),
            id,
            kind,
            config,
            vars,
            plan,
            inner: RwLock::new(CurveInner {
                nodes,
                spline: None,
                state,
                state_id: 0,
            }),
        })
    }

    /// Settings the curve was built with, including its resolved id.
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Interpolation method.
    pub fn interpolation(&self) -> Interpolation {
        self.config.interpolation
    }

    /// Spline knots, when a spline region exists.
    pub fn knots(&self) -> Option<&[Date]> {
        self.plan.as_ref().map(|p| p.knots.as_slice())
    }

    /// Variable tags of the node values, `{id}0`, `{id}1`, ...
    pub fn vars(&self) -> &VarSet {
        &self.vars
    }

    /// Node dates.
    pub fn node_dates(&self) -> Vec<Date> {
        self.inner.read().nodes.dates().to_vec()
    }

    /// Node values with their seeded derivatives.
    pub fn node_values(&self) -> Vec<T> {
        self.inner.read().nodes.values().to_vec()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CurveState {
        self.inner.read().state
    }

    /// Counter bumped by every mutation.
    pub fn state_id(&self) -> u64 {
        self.inner.read().state_id
    }

    /// Number of memoised point values.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops memoised point values.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Spline coefficients, solving first if needed. `None` without a spline region.
    pub fn spline_coefficients(&self) -> CurveResult<Option<Vec<T>>> {
        self.with_solved(|inner| {
            Ok(inner
                .spline
                .as_ref()
                .and_then(|s| s.c().map(<[T]>::to_vec)))
        })
    }

    /// Replaces the value of the node on `date`.
    ///
    /// # Errors
    ///
    /// `Configuration` when no node falls on `date` or the value is invalid
    /// for the curve kind. The curve is unchanged on error.
    pub fn update_node(&self, date: Date, value: f64) -> CurveResult<()> {
        let mut inner = self.inner.write();
        let i = inner
            .nodes
            .position(date)
            .ok_or_else(|| CurveError::configuration(format!("curve '{}' has no node on {date}", self.id)))?;
        let mut reals: Vec<f64> = inner.nodes.values().iter().map(T::real).collect();
        reals[i] = value;
        self.reseed(&mut inner, &reals)
    }

    /// Replaces every node value, in date order.
    ///
    /// # Errors
    ///
    /// `Configuration` for a length mismatch or invalid values.
    pub fn set_values(&self, values: &[f64]) -> CurveResult<()> {
        let mut inner = self.inner.write();
        if values.len() != inner.nodes.len() {
            return Err(CurveError::configuration(format!(
                "{} values for {} nodes",
                values.len(),
                inner.nodes.len()
            )));
        }
        self.reseed(&mut inner, values)
    }

    /// Rebuilds the curve with another AD order, keeping ids and settings.
    pub fn to_order<U: Number>(&self) -> CurveResult<Curve<U>> {
        let inner = self.inner.read();
        let reals = inner.nodes.values().iter().map(T::real).collect();
        Curve::from_parts(
            self.kind,
            self.config.clone(),
            inner.nodes.dates().to_vec(),
            reals,
        )
    }

    fn reseed(&self, inner: &mut CurveInner<T>, reals: &[f64]) -> CurveResult<()> {
        check_values(self.kind, reals.iter().copied())?;
        let values = T::seed(reals, &self.vars)?;
        inner.nodes.replace_values(values);
        inner.spline = None;
        inner.state = if self.plan.is_some() {
            CurveState::NodesSet
        } else {
            CurveState::Queryable
        };
        inner.state_id += 1;
        self.cache.clear();
        debug!(id = %self.id, state_id = inner.state_id, "curve nodes updated");
        Ok(())
    }

    /// Runs `f` on a queryable state, solving the spline first if needed.
    fn with_solved<R>(&self, f: impl FnOnce(&CurveInner<T>) -> CurveResult<R>) -> CurveResult<R> {
        {
            let inner = self.inner.read();
            if inner.state == CurveState::Queryable {
                return f(&inner);
            }
        }
        let mut inner = self.inner.write();
        if inner.state == CurveState::NodesSet {
            if let Some(plan) = &self.plan {
                inner.spline = Some(plan.solve(self.kind, &inner.nodes)?);
                debug!(id = %self.id, coefficients = plan.template.n(), "curve spline solved");
            }
            inner.state = CurveState::Queryable;
        }
        f(&inner)
    }

    fn check_domain(&self, nodes: &NodeStore<T>, date: Date) -> CurveResult<()> {
        if !self.config.extrapolate && (date < nodes.first() || date > nodes.last()) {
            return Err(CurveError::out_of_domain(date, nodes.first(), nodes.last()));
        }
        Ok(())
    }

    /// The spline polynomial applies from the first knot onwards.
    fn spline_at<'a>(&self, inner: &'a CurveInner<T>, x: f64) -> Option<&'a PPSpline<T>> {
        match (&self.plan, &inner.spline) {
            (Some(plan), Some(spline)) if x >= plan.start => Some(spline),
            _ => None,
        }
    }

    fn eval(&self, inner: &CurveInner<T>, x: f64) -> CurveResult<T> {
        match self.spline_at(inner, x) {
            Some(spline) => {
                let s = spline.ppev_single_extrapolated(x)?;
                Ok(match self.kind {
                    CurveKind::Discount => s.exp(),
                    CurveKind::Rate => s,
                })
            }
            None => self.base.value(self.kind, &inner.nodes, x),
        }
    }

    fn log_slope(&self, inner: &CurveInner<T>, x: f64) -> CurveResult<T> {
        match self.spline_at(inner, x) {
            Some(spline) => Ok(spline.ppdnev_single_extrapolated(x, 1)?),
            None => self.base.log_slope(&inner.nodes, x),
        }
    }
}

impl<T: Number> RateCurve<T> for Curve<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> CurveKind {
        self.kind
    }

    fn base_date(&self) -> Date {
        self.inner.read().nodes.first()
    }

    fn final_date(&self) -> Date {
        self.inner.read().nodes.last()
    }

    fn day_count(&self) -> DayCountConvention {
        self.config.day_count
    }

    fn calendar(&self) -> CalendarKind {
        self.config.calendar
    }

    fn modifier(&self) -> BusinessDayConvention {
        self.config.modifier
    }

    fn compounding(&self) -> CompoundingMethod {
        self.config.compounding
    }

    fn supports_translation(&self) -> bool {
        self.kind == CurveKind::Discount && self.config.interpolation.supports_translation()
    }

    fn value(&self, date: Date) -> CurveResult<T> {
        if let Some(v) = self.cache.get(date) {
            return Ok(v);
        }
        self.with_solved(|inner| {
            self.check_domain(&inner.nodes, date)?;
            let v = self.eval(inner, inner.nodes.days(date))?;
            self.cache.insert(date, v.clone());
            Ok(v)
        })
    }

    fn forward(&self, date: Date) -> CurveResult<T> {
        if self.kind == CurveKind::Rate {
            return self.value(date);
        }
        self.with_solved(|inner| {
            self.check_domain(&inner.nodes, date)?;
            let slope = self.log_slope(inner, inner.nodes.days(date))?;
            forward_from_log_slope(slope, self.config.day_count, date)
        })
    }
}

impl<T: Number> fmt::Debug for Curve<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Curve")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("interpolation", &self.config.interpolation)
            .field("order", &T::ORDER)
            .field("nodes", &inner.nodes.len())
            .field("state", &inner.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CurveBuilder;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use curvelab_core::types::Tenor;
    use curvelab_math::dual::{Dual, Dual2};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ois<T: Number>(interpolation: Interpolation) -> Curve<T> {
        CurveBuilder::discount()
            .id("v")
            .interpolation(interpolation)
            .node(date(2024, 1, 1), 1.0)
            .node(date(2024, 4, 1), 0.99)
            .node(date(2024, 10, 1), 0.97)
            .node(date(2025, 1, 1), 0.955)
            .node(date(2026, 1, 1), 0.91)
            .build()
            .unwrap()
    }

    #[test]
    fn test_nodes_are_tagged_variables() {
        let curve = ois::<Dual>(Interpolation::LogLinear);
        let vars: Vec<&str> = curve.vars().iter().map(String::as_str).collect();
        assert_eq!(vars, vec!["v0", "v1", "v2", "v3", "v4"]);
        let df = curve.df(date(2024, 4, 1)).unwrap();
        assert_eq!(df.real(), 0.99);
        assert_eq!(df.gradient(&["v0", "v1", "v2"]).to_vec(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_default_id_is_generated() {
        let curve: Curve<f64> = CurveBuilder::discount()
            .node(date(2024, 1, 1), 1.0)
            .node(date(2025, 1, 1), 0.95)
            .build()
            .unwrap();
        assert_eq!(curve.id().len(), 32);
        assert_eq!(curve.config().id.as_deref(), Some(curve.id()));
    }

    #[test]
    fn test_log_linear_gradient_between_nodes() {
        let curve = ois::<Dual>(Interpolation::LogLinear);
        let d = date(2024, 2, 15);
        let w = 45.0 / 91.0;
        let df = curve.df(d).unwrap();
        let expected = 0.99_f64.powf(w);
        assert_relative_eq!(df.real(), expected, epsilon = 1e-14);
        // d/dv1 of v0^(1-w) v1^w at v0 = 1
        assert_relative_eq!(df.gradient(&["v1"])[0], w * expected / 0.99, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_domain_without_extrapolation() {
        let curve = ois::<f64>(Interpolation::LogLinear);
        let err = curve.df(date(2023, 12, 31)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfDomain);
        assert!(curve.df(date(2026, 1, 2)).is_err());
        assert!(curve.forward(date(2026, 1, 2)).is_err());
    }

    #[test]
    fn test_extrapolation_continues_last_interval() {
        let curve: Curve<f64> = CurveBuilder::discount()
            .extrapolate(true)
            .node(date(2024, 1, 1), 1.0)
            .node(date(2024, 1, 11), 0.999)
            .build()
            .unwrap();
        assert_relative_eq!(curve.df(date(2024, 1, 21)).unwrap(), 0.999 * 0.999, epsilon = 1e-14);
    }

    #[test]
    fn test_forward_of_log_linear_curve() {
        let curve = ois::<f64>(Interpolation::LogLinear);
        let d = date(2024, 2, 1);
        let slope = (0.99_f64).ln() / 91.0;
        let expected = -slope * 360.0 * 100.0;
        assert_relative_eq!(curve.forward(d).unwrap(), expected, epsilon = 1e-10);
        assert_relative_eq!(curve.rate(d, None).unwrap(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_tenor_rate_from_discount_factors() {
        let curve = ois::<f64>(Interpolation::LogLinear);
        let start = date(2024, 3, 1);
        let end = date(2024, 4, 1);
        let expected =
            (curve.df(start).unwrap() / curve.df(end).unwrap() - 1.0) / (31.0 / 360.0) * 100.0;
        let got = curve.rate(start, Some(Tenor::parse("1m").unwrap())).unwrap();
        assert_relative_eq!(got, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_spline_reproduces_nodes_and_is_natural() {
        let curve = ois::<f64>(Interpolation::Spline);
        assert_eq!(curve.state(), CurveState::NodesSet);
        for (d, v) in curve.node_dates().into_iter().zip([1.0, 0.99, 0.97, 0.955, 0.91]) {
            assert_relative_eq!(curve.df(d).unwrap(), v, epsilon = 1e-12);
        }
        assert_eq!(curve.state(), CurveState::Queryable);
        assert_eq!(curve.spline_coefficients().unwrap().map(|c| c.len()), Some(7));
        assert_eq!(curve.knots().map(<[Date]>::len), Some(11));
    }

    #[test]
    fn test_mixed_regime_uses_base_before_first_knot() {
        let k = date(2024, 4, 1);
        let last = date(2026, 1, 1);
        let knots = vec![k, k, k, k, date(2024, 10, 1), date(2025, 1, 1), last, last, last, last];
        let curve: Curve<f64> = CurveBuilder::discount()
            .interpolation(Interpolation::LogLinear)
            .knots(knots)
            .node(date(2024, 1, 1), 1.0)
            .node(k, 0.99)
            .node(date(2024, 10, 1), 0.97)
            .node(date(2025, 1, 1), 0.955)
            .node(last, 0.91)
            .build()
            .unwrap();
        let before = date(2024, 2, 15);
        assert_relative_eq!(
            curve.df(before).unwrap(),
            0.99_f64.powf(45.0 / 91.0),
            epsilon = 1e-14
        );
        assert_relative_eq!(curve.df(date(2025, 1, 1)).unwrap(), 0.955, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_knots_are_rejected() {
        let base = || {
            CurveBuilder::discount()
                .node(date(2024, 1, 1), 1.0)
                .node(date(2024, 6, 1), 0.98)
                .node(date(2025, 1, 1), 0.95)
        };
        let (a, b, c) = (date(2024, 1, 1), date(2024, 6, 1), date(2025, 1, 1));

        let stray = vec![a, a, a, a, date(2024, 7, 1), c, c, c, c];
        let err = base().knots(stray).build::<f64>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        // 3 nodes + 2 conditions against 4 coefficients
        let short = vec![a, a, a, a, c, c, c, c];
        assert!(base().knots(short).build::<f64>().is_err());

        let early_end = vec![a, a, a, a, b, b, b, b];
        assert!(base().knots(early_end).build::<f64>().is_err());
    }

    #[test]
    fn test_update_node_invalidates_cache_and_spline() {
        let curve = ois::<Dual>(Interpolation::Spline);
        let d = date(2024, 8, 1);
        let before = curve.df(d).unwrap();
        assert_eq!(curve.cache_len(), 1);

        curve.update_node(date(2024, 10, 1), 0.965).unwrap();
        assert_eq!(curve.state_id(), 1);
        assert_eq!(curve.state(), CurveState::NodesSet);
        assert_eq!(curve.cache_len(), 0);

        let after = curve.df(d).unwrap();
        assert!(after.real() < before.real());
        assert_eq!(after.vars(), before.vars());
        assert!(curve.update_node(date(2024, 8, 1), 0.9).is_err());
        assert!(curve.update_node(date(2024, 10, 1), -0.1).is_err());
        assert_eq!(curve.state_id(), 1);
    }

    #[test]
    fn test_set_values_and_order_change() {
        let curve = ois::<f64>(Interpolation::LogLinear);
        curve.set_values(&[1.0, 0.985, 0.97, 0.955, 0.91]).unwrap();
        assert!(curve.set_values(&[1.0]).is_err());

        let second: Curve<Dual2> = curve.to_order().unwrap();
        assert_eq!(second.id(), "v");
        let df = second.df(date(2024, 4, 1)).unwrap();
        assert_eq!(df.real(), 0.985);
        assert_eq!(df.hessian(&["v1"])[[0, 0]], 0.0);
    }

    #[test]
    fn test_rate_curve_rejects_df_and_zero_rate_interpolation() {
        let line: Curve<f64> = CurveBuilder::rate()
            .interpolation(Interpolation::FlatForward)
            .node(date(2024, 1, 1), 5.3)
            .node(date(2024, 2, 1), 5.2)
            .build()
            .unwrap();
        assert_eq!(
            line.df(date(2024, 1, 5)).unwrap_err().kind(),
            ErrorKind::UnsupportedOperation
        );
        assert_eq!(line.forward(date(2024, 1, 5)).unwrap(), 5.3);
        assert!(!line.supports_translation());

        let err = CurveBuilder::rate()
            .interpolation(Interpolation::LinearZeroRate)
            .node(date(2024, 1, 1), 5.3)
            .node(date(2024, 2, 1), 5.2)
            .build::<f64>()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_caching_can_be_disabled() {
        let curve: Curve<f64> = CurveBuilder::discount()
            .caching(false)
            .node(date(2024, 1, 1), 1.0)
            .node(date(2025, 1, 1), 0.95)
            .build()
            .unwrap();
        curve.df(date(2024, 5, 1)).unwrap();
        assert_eq!(curve.cache_len(), 0);
    }
}
