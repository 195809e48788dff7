use crate::calc::month::VisibleMonth;
use chrono::{Datelike, NaiveDate};

/// Cells in a popup grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// One entry of the month grid. Generated on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// True for leading days of the previous month and trailing days of the next.
    pub other_month: bool,
}

impl DayCell {
    fn current(date: NaiveDate) -> Self {
        DayCell {
            date,
            other_month: false,
        }
    }

    fn filler(date: NaiveDate) -> Self {
        DayCell {
            date,
            other_month: true,
        }
    }
}

/// Builds the Sunday-first grid for `month` (zero-based) of `year`.
///
/// `month` may lie outside 0..=11; it is normalized by carrying into the
/// year first. The result always holds [`GRID_CELLS`] cells: the trailing
/// days of the previous month needed to put day 1 under its weekday, every
/// day of the month, then days of the next month counted from 1.
///
/// Months whose grid would step outside chrono's representable dates, or
/// whose year carry overflows `i32`, yield an empty grid.
pub fn build_grid(year: i32, month: i32) -> Vec<DayCell> {
    VisibleMonth::new(year, month)
        .and_then(month_grid)
        .unwrap_or_default()
}

pub fn month_grid(visible: VisibleMonth) -> Option<Vec<DayCell>> {
    let first = visible.first_day()?;
    let leading = first.weekday().num_days_from_sunday();

    let prev = visible.prev()?;
    let prev_days = prev.days()?;
    let mut cells = Vec::with_capacity(GRID_CELLS);

    // leading < 7 and every month has at least 28 days, so the prefix never
    // reaches further back than the previous month.
    for day in (prev_days - leading + 1)..=prev_days {
        cells.push(DayCell::filler(prev.day(day)?));
    }

    for day in 1..=visible.days()? {
        cells.push(DayCell::current(visible.day(day)?));
    }

    let next = visible.next()?;
    let trailing = (GRID_CELLS - cells.len()) as u32;
    for day in 1..=trailing {
        cells.push(DayCell::filler(next.day(day)?));
    }

    Some(cells)
}
