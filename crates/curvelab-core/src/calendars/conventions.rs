//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// How to move a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BusinessDayConvention {
    /// Leave the date as-is.
    Unadjusted,
    /// Next business day.
    Following,
    /// Next business day unless that crosses a month end, then previous.
    #[default]
    ModifiedFollowing,
    /// Previous business day.
    Preceding,
    /// Previous business day unless that crosses a month start, then next.
    ModifiedPreceding,
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" | "UNADJUSTED" => Ok(Self::Unadjusted),
            "F" | "FOLLOWING" => Ok(Self::Following),
            "MF" | "MODIFIED_FOLLOWING" => Ok(Self::ModifiedFollowing),
            "P" | "PRECEDING" => Ok(Self::Preceding),
            "MP" | "MODIFIED_PRECEDING" => Ok(Self::ModifiedPreceding),
            _ => Err(CoreError::unknown_convention("business day", s)),
        }
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }
    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => roll(date, 1, calendar),
        BusinessDayConvention::Preceding => roll(date, -1, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = roll(date, 1, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                roll(date, -1, calendar)
            }
        }
        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = roll(date, -1, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                roll(date, 1, calendar)
            }
        }
    }
}

fn roll<C: Calendar + ?Sized>(mut date: Date, step: i64, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(step);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_business_day_untouched() {
        let monday = d(2024, 1, 8);
        for conv in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
        ] {
            assert_eq!(adjust(monday, conv, &WeekendCalendar), monday);
        }
    }

    #[test]
    fn test_modified_following_month_end() {
        // Saturday 2024-08-31
        let sat = d(2024, 8, 31);
        assert_eq!(adjust(sat, BusinessDayConvention::Following, &WeekendCalendar), d(2024, 9, 2));
        assert_eq!(
            adjust(sat, BusinessDayConvention::ModifiedFollowing, &WeekendCalendar),
            d(2024, 8, 30)
        );
        assert_eq!(adjust(sat, BusinessDayConvention::Unadjusted, &WeekendCalendar), sat);
    }

    #[test]
    fn test_modified_preceding_month_start() {
        // Sunday 2024-09-01
        let sun = d(2024, 9, 1);
        assert_eq!(adjust(sun, BusinessDayConvention::Preceding, &WeekendCalendar), d(2024, 8, 30));
        assert_eq!(
            adjust(sun, BusinessDayConvention::ModifiedPreceding, &WeekendCalendar),
            d(2024, 9, 2)
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("mf".parse::<BusinessDayConvention>().unwrap(), BusinessDayConvention::ModifiedFollowing);
        assert!("xx".parse::<BusinessDayConvention>().is_err());
    }
}
