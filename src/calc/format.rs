use crate::calc::month::{month_name, VisibleMonth};
use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Short numeric date in the en-US style, e.g. `2/29/2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Text shown in the input field: empty when nothing is selected.
pub fn display_text(selected: Option<NaiveDate>, date_format: &str) -> String {
    selected
        .map(|date| date.format(date_format).to_string())
        .unwrap_or_default()
}

/// Popup header, e.g. `February 2024`.
pub fn header_label(visible: VisibleMonth) -> String {
    format!("{} {:04}", month_name(visible.month + 1), visible.year)
}

/// Reads a field string back into a date using the same pattern it was written with.
pub fn parse_display(text: &str, date_format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), date_format).ok()
}

/// Rejects patterns chrono cannot render, and patterns that lose part of the
/// date so the field text would not identify a single day.
pub fn validate_date_format(date_format: &str) -> Result<()> {
    if date_format.trim().is_empty() {
        bail!("date format must not be empty");
    }
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        bail!("invalid date format '{date_format}'");
    }
    // Spread over centuries and leap days so two-digit years and missing
    // fields fail at least one sample.
    for (y, m, d) in ROUND_TRIP_SAMPLES {
        let Some(sample) = NaiveDate::from_ymd_opt(y, m, d) else {
            continue;
        };
        let text = display_text(Some(sample), date_format);
        if parse_display(&text, date_format) != Some(sample) {
            bail!(
                "date format '{date_format}' does not identify a single day \
                 ({sample} renders as '{text}')"
            );
        }
    }
    Ok(())
}

const ROUND_TRIP_SAMPLES: [(i32, u32, u32); 7] = [
    (1, 1, 1),
    (1950, 6, 1),
    (1999, 12, 31),
    (2000, 2, 29),
    (2024, 2, 29),
    (2024, 12, 31),
    (9999, 12, 31),
];
