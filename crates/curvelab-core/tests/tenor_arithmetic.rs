//! Property tests for tenor arithmetic against the built-in calendars.

use curvelab_core::prelude::*;
use proptest::prelude::*;

fn base() -> Date {
    Date::from_ymd(2024, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn day_tenors_shift_exactly(offset in 0i64..3000, n in -400i32..400) {
        let start = base() + offset;
        let end = Tenor::days(n).add_to(start, &NoHolidayCalendar, BusinessDayConvention::Following).unwrap();
        prop_assert_eq!(end - start, i64::from(n));
    }

    #[test]
    fn adjusted_dates_are_business_days(offset in 0i64..3000, months in -24i32..120) {
        let start = base() + offset;
        let tenor = Tenor::new(months, TenorUnit::Months);
        for conv in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
        ] {
            let end = tenor.add_to(start, &WeekendCalendar, conv).unwrap();
            prop_assert!(WeekendCalendar.is_business_day(end));
            prop_assert!((end - tenor.add_unadjusted(start).unwrap()).abs() <= 3);
        }
    }

    #[test]
    fn business_day_tenors_round_trip(offset in 0i64..3000, n in 1i32..60) {
        let start = WeekendCalendar.adjust(base() + offset, BusinessDayConvention::Following);
        let fwd = Tenor::new(n, TenorUnit::BusinessDays)
            .add_to(start, &WeekendCalendar, BusinessDayConvention::Unadjusted)
            .unwrap();
        let back = Tenor::new(-n, TenorUnit::BusinessDays)
            .add_to(fwd, &WeekendCalendar, BusinessDayConvention::Unadjusted)
            .unwrap();
        prop_assert_eq!(back, start);
    }
}

#[test]
fn tenor_strings_drive_day_counts() {
    let start = Date::parse("2024-01-17").unwrap();
    let end = "1m".parse::<Tenor>().unwrap().add_to(start, &WeekendCalendar, BusinessDayConvention::ModifiedFollowing).unwrap();
    assert_eq!(end, Date::parse("2024-02-19").unwrap());
    assert_eq!(DayCountConvention::Act360.day_count(start, end), 33);
}
