//! Serializable curve settings.
//!
//! Every field has a default, so a configuration file only needs to name
//! what differs:
//!
//! ```rust
//! use curvelab_curves::config::CurveConfig;
//! use curvelab_curves::interpolation::Interpolation;
//!
//! let config = CurveConfig::from_json(r#"{ "id": "sofr", "interpolation": "flat_forward" }"#).unwrap();
//! assert_eq!(config.interpolation, Interpolation::FlatForward);
//! assert!(config.caching);
//! ```

use serde::{Deserialize, Serialize};

use curvelab_core::calendars::{BusinessDayConvention, CalendarKind};
use curvelab_core::daycounts::DayCountConvention;
use curvelab_core::types::Date;

use crate::error::{CurveError, CurveResult};
use crate::interpolation::Interpolation;
use crate::transforms::CompoundingMethod;

fn default_caching() -> bool {
    true
}

/// Settings shared by every curve built through [`CurveBuilder`](crate::CurveBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Curve identifier and prefix for node variable tags. A UUID when absent.
    #[serde(default)]
    pub id: Option<String>,

    /// Interpolation between nodes.
    #[serde(default)]
    pub interpolation: Interpolation,

    /// Spline knots, enabling the spline from the first knot onwards.
    #[serde(default)]
    pub knots: Option<Vec<Date>>,

    /// Day count used for rates.
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Calendar used to roll tenor end dates.
    #[serde(default)]
    pub calendar: CalendarKind,

    /// Business day convention applied to tenor end dates.
    #[serde(default)]
    pub modifier: BusinessDayConvention,

    /// Whether queries outside the node range continue the end interval.
    #[serde(default)]
    pub extrapolate: bool,

    /// Whether point values are memoised.
    #[serde(default = "default_caching")]
    pub caching: bool,

    /// Compounding used by composite and shifted discount curves.
    #[serde(default)]
    pub compounding: CompoundingMethod,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            id: None,
            interpolation: Interpolation::default(),
            knots: None,
            day_count: DayCountConvention::default(),
            calendar: CalendarKind::default(),
            modifier: BusinessDayConvention::default(),
            extrapolate: false,
            caching: default_caching(),
            compounding: CompoundingMethod::default(),
        }
    }
}

impl CurveConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// `Configuration` when the document is malformed or names an unknown
    /// interpolation, convention or calendar.
    pub fn from_json(json: &str) -> CurveResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CurveError::configuration(format!("invalid curve config: {e}")))
    }

    /// Serialises the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> CurveResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CurveError::configuration(format!("cannot serialise curve config: {e}")))
    }
}
