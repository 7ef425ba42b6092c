//! Tenor strings such as `"1d"`, `"2b"`, `"3m"` or `"-1y"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::calendars::{BusinessDayConvention, Calendar};
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days (`d`).
    Days,
    /// Business days under the supplied calendar (`b`).
    BusinessDays,
    /// Weeks (`w`).
    Weeks,
    /// Calendar months (`m`).
    Months,
    /// Calendar years (`y`).
    Years,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Days => 'd',
            TenorUnit::BusinessDays => 'b',
            TenorUnit::Weeks => 'w',
            TenorUnit::Months => 'm',
            TenorUnit::Years => 'y',
        }
    }
}

/// A signed period of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tenor {
    /// Signed number of units.
    pub count: i32,
    /// Unit of the period.
    pub unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor from its parts.
    pub const fn new(count: i32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Shorthand for `n` calendar days.
    pub const fn days(count: i32) -> Self {
        Self::new(count, TenorUnit::Days)
    }

    /// Parses strings of the form `<signed integer><unit>`, case-insensitive.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_lowercase()) {
            Some('d') => TenorUnit::Days,
            Some('b') => TenorUnit::BusinessDays,
            Some('w') => TenorUnit::Weeks,
            Some('m') => TenorUnit::Months,
            Some('y') => TenorUnit::Years,
            Some(other) => {
                return Err(CoreError::invalid_tenor(s, format!("unknown unit '{other}'")))
            }
            None => return Err(CoreError::invalid_tenor(s, "empty string")),
        };
        let count = chars
            .as_str()
            .parse::<i32>()
            .map_err(|e| CoreError::invalid_tenor(s, e.to_string()))?;
        Ok(Self { count, unit })
    }

    /// Adds the tenor to `date` without any business day adjustment.
    ///
    /// Business-day tenors skip weekends only.
    pub fn add_unadjusted(&self, date: Date) -> CoreResult<Date> {
        match self.unit {
            TenorUnit::Days => Ok(date.add_days(i64::from(self.count))),
            TenorUnit::Weeks => Ok(date.add_days(7 * i64::from(self.count))),
            TenorUnit::Months => date.add_months(self.count),
            TenorUnit::Years => date.add_years(self.count),
            TenorUnit::BusinessDays => Ok(crate::calendars::WeekendCalendar
                .add_business_days(date, self.count)),
        }
    }

    /// Adds the tenor to `date` and adjusts the result on `calendar`.
    pub fn add_to<C: Calendar + ?Sized>(
        &self,
        date: Date,
        calendar: &C,
        convention: BusinessDayConvention,
    ) -> CoreResult<Date> {
        let raw = match self.unit {
            TenorUnit::BusinessDays => return Ok(calendar.add_business_days(date, self.count)),
            _ => self.add_unadjusted(date)?,
        };
        Ok(calendar.adjust(raw, convention))
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tenor::parse(s)
    }
}
