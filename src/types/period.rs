//! Calendar periods used to pick days out of a year of data.

use chrono::{Months, NaiveDate};
use std::fmt;

/// A calendar year. Completes `D-Mon` dates and names the charted year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

impl Year {
    pub fn is_leap(self) -> bool {
        NaiveDate::from_ymd_opt(self.0, 2, 29).is_some()
    }

    pub fn day_count(self) -> u32 {
        365 + u32::from(self.is_leap())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month of a given year, e.g. `Month::new(2015, 3)` for March 2015.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(self) -> Option<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StartEndDate {
    /// Number of days covered, counting both ends.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Anything that resolves into an inclusive range of days.
///
/// Strings are accepted as `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub trait AnyDate {
    fn get_date_range(self) -> Option<StartEndDate>;
}

impl AnyDate for NaiveDate {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self,
            end: self,
        })
    }
}

impl AnyDate for Year {
    fn get_date_range(self) -> Option<StartEndDate> {
        let start = NaiveDate::from_ymd_opt(self.0, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(self.0, 12, 31)?;
        Some(StartEndDate { start, end })
    }
}

impl AnyDate for Month {
    fn get_date_range(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self.first_day()?,
            end: self.last_day()?,
        })
    }
}

impl AnyDate for &str {
    fn get_date_range(self) -> Option<StartEndDate> {
        let value = self.trim();
        let parts: Vec<&str> = value.split('-').collect();
        match parts.as_slice() {
            [_, _, _] => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()?
                .get_date_range(),
            [year, month] => Month::new(year.parse().ok()?, month.parse().ok()?).get_date_range(),
            [year] => Year(year.parse().ok()?).get_date_range(),
            _ => None,
        }
    }
}

impl AnyDate for String {
    fn get_date_range(self) -> Option<StartEndDate> {
        self.as_str().get_date_range()
    }
}
