//! Day count conventions.
//!
//! Curves use a day count for one thing: turning a discount factor ratio
//! over `[start, end]` into a simple rate. Only the money market bases are
//! provided here; richer conventions implement [`DayCount`] elsewhere.
//!
//! ```rust
//! use curvelab_core::daycounts::{Act360, DayCount};
//! use curvelab_core::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(Act360.day_count(start, end), 90);
//! assert_eq!(Act360.year_fraction(start, end), 0.25);
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Date;

/// A day count convention.
pub trait DayCount: Send + Sync {
    /// Market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction from `start` to `end`. Negative when `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Day count from `start` to `end` under the convention.
    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Runtime selector for the built-in conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360.
    #[default]
    #[serde(rename = "ACT/360", alias = "act360")]
    Act360,
    /// Actual/365 Fixed.
    #[serde(rename = "ACT/365F", alias = "act365f")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Borrow the convention as a trait object.
    pub fn to_day_count(self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
        }
    }
}

impl DayCount for DayCountConvention {
    fn name(&self) -> &'static str {
        self.to_day_count().name()
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.to_day_count().year_fraction(start, end)
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(DayCount::name(self))
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(' ', "").as_str() {
            "ACT/360" | "ACT360" | "A360" => Ok(DayCountConvention::Act360),
            "ACT/365F" | "ACT365F" | "ACT/365FIXED" | "A365F" => Ok(DayCountConvention::Act365Fixed),
            _ => Err(CoreError::unknown_convention("day count", s)),
        }
    }
}
