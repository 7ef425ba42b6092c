//! Business day calendar contracts.
//!
//! The curve engine only asks two questions of a calendar: is a date a
//! business day, and where does a date land after adjustment. Holiday
//! databases plug in by implementing [`Calendar`].

mod conventions;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use conventions::{adjust, BusinessDayConvention};

use crate::error::CoreError;
use crate::types::Date;

/// A business day calendar.
pub trait Calendar: Send + Sync {
    /// Name of the calendar, used for consistency checks between curves.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let step: i64 = if days >= 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();
        let mut result = date;
        while remaining > 0 {
            result = result.add_days(step);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }
        result
    }
}

/// Every day is a business day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHolidayCalendar;

impl Calendar for NoHolidayCalendar {
    fn name(&self) -> &'static str {
        "all"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Saturdays and Sundays are holidays; nothing else is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "bus"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Serializable selector for the built-in calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    /// [`NoHolidayCalendar`].
    #[default]
    NoHolidays,
    /// [`WeekendCalendar`].
    Weekends,
}

impl CalendarKind {
    /// The calendar this kind names.
    pub fn calendar(self) -> &'static dyn Calendar {
        match self {
            CalendarKind::NoHolidays => &NoHolidayCalendar,
            CalendarKind::Weekends => &WeekendCalendar,
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.calendar().name())
    }
}

impl FromStr for CalendarKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "none" | "no_holidays" => Ok(CalendarKind::NoHolidays),
            "bus" | "weekends" => Ok(CalendarKind::Weekends),
            _ => Err(CoreError::unknown_convention("calendar", s)),
        }
    }
}
