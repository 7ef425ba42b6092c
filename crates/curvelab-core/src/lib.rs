//! # Curvelab Core
//!
//! Calendar-facing building blocks shared by the Curvelab crates:
//!
//! - **Types**: [`Date`] and [`Tenor`] (`"1d"`, `"1b"`, `"3m"`, `"-2y"`)
//! - **Day Count Conventions**: the [`DayCount`] contract plus Act/360 and Act/365F
//! - **Business Day Calendars**: the [`Calendar`] contract, weekend-only and
//!   no-holiday calendars, and business day adjustment
//!
//! Full holiday tables and schedule generation live outside this crate; the
//! curve engine only consumes the contracts defined here.
//!
//! ## Example
//!
//! ```rust
//! use curvelab_core::prelude::*;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Tenor::parse("6m").unwrap().add_to(start, &WeekendCalendar, BusinessDayConvention::ModifiedFollowing).unwrap();
//! let dcf = DayCountConvention::Act360.year_fraction(start, end);
//! assert!(dcf > 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, CalendarKind, NoHolidayCalendar, WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Tenor, TenorUnit};
}

pub use error::{CoreError, CoreResult};
pub use types::{Date, Tenor, TenorUnit};
