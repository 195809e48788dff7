use crate::calc::{VisibleMonth, WEEKDAY_LABELS};
use crate::data::picker_state::has_grid;
use crate::data::{PickerState, Settings};
use crate::ui::picker_view::find_cell;
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use log::{info, warn};

/// Parses `YYYY-MM` (1-based month) into a visible month. Months too close
/// to the end of the supported calendar to fill a grid are refused.
pub(crate) fn parse_month(s: &str) -> Result<VisibleMonth> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("invalid month '{s}', expected YYYY-MM"))?;
    let month = VisibleMonth::from_date(first);
    if !has_grid(month) {
        bail!("month '{s}' is outside the supported calendar range");
    }
    Ok(month)
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

pub fn run(settings: &Settings, month: Option<&str>, select: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();
    let mut state = PickerState::new(today);
    if let Some(m) = month {
        state.visible = parse_month(m)?;
    }
    if let Some(s) = select {
        let date = parse_date(s)?;
        apply_selection(&mut state, date);
    }
    info!("printing {}", state.visible);
    write_month(&state, settings, today, &mut std::io::stdout())
}

/// Selects `date` through the same path a click on its cell takes. Dates that
/// are not an in-month cell of the visible month leave the state untouched.
pub(crate) fn apply_selection(state: &mut PickerState, date: NaiveDate) -> bool {
    let grid = state.grid();
    let changed = find_cell(&grid, date).is_some_and(|cell| state.select(cell));
    if !changed {
        warn!("{date} is not a day of {}; selection unchanged", state.visible);
    }
    changed
}

/// Text rendering of the popup. In-month days print as ` dd `, filler days
/// as `(dd)`, the selection as `[dd]`, today with a trailing `*`.
pub(crate) fn write_month<W: std::io::Write>(
    state: &PickerState,
    settings: &Settings,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    let text = state.display_text(&settings.date_format);
    if text.is_empty() {
        writeln!(out, "Date: <{}>", settings.placeholder)?;
    } else {
        writeln!(out, "Date: {text}")?;
    }
    writeln!(out, "{:^28}", state.header_label())?;
    let header: String = WEEKDAY_LABELS.iter().map(|w| format!(" {w} ")).collect();
    writeln!(out, "{}", header.trim_end())?;

    for week in state.grid().chunks(7) {
        let mut line = String::new();
        for cell in week {
            let day = cell.date.day();
            let rendered = if state.is_selected(cell.date) {
                format!("[{day:>2}]")
            } else if cell.other_month {
                format!("({day:>2})")
            } else if cell.date == today {
                format!(" {day:>2}*")
            } else {
                format!(" {day:>2} ")
            };
            line.push_str(&rendered);
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
