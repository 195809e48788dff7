use chrono::{Datelike, NaiveDate};
use std::fmt;

/// The (year, month) pair shown by the popup. `month` is zero-based:
/// 0 = January .. 11 = December.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisibleMonth {
    pub year: i32,
    pub month: u32,
}

impl VisibleMonth {
    /// Builds a month from a possibly out-of-range month index, carrying
    /// whole years into `year`. `new(2024, -1)` is December 2023 and
    /// `new(2024, 12)` is January 2025. None if the carry overflows `i32`.
    pub fn new(year: i32, month: i32) -> Option<Self> {
        Some(VisibleMonth {
            year: year.checked_add(month.div_euclid(12))?,
            month: month.rem_euclid(12) as u32,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        VisibleMonth {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn prev(self) -> Option<Self> {
        if self.month == 0 {
            Some(VisibleMonth {
                year: self.year.checked_sub(1)?,
                month: 11,
            })
        } else {
            Some(VisibleMonth {
                year: self.year,
                month: self.month - 1,
            })
        }
    }

    pub fn next(self) -> Option<Self> {
        if self.month == 11 {
            Some(VisibleMonth {
                year: self.year.checked_add(1)?,
                month: 0,
            })
        } else {
            Some(VisibleMonth {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    /// Day `day` of this month, or None if the month is shorter than that
    /// or the year is outside chrono's range.
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, day)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        self.day(1)
    }

    pub fn days(self) -> Option<u32> {
        days_in_month(self.year, self.month + 1)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }
}

impl fmt::Display for VisibleMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// Number of days in `month` (1-based) of `year`, measured between the first
/// of the month and the first of the next. None when either date is outside
/// chrono's range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Long English name for a 1-based month.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
