use crate::calc::format::{display_text, header_label};
use crate::calc::{build_grid, DayCell, VisibleMonth};
use chrono::NaiveDate;
use log::debug;

/// Widget state. `visible` and `selected` are independent: navigating never
/// touches the selection and selecting never moves the visible month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerState {
    pub selected: Option<NaiveDate>,
    pub visible: VisibleMonth,
    pub open: bool,
}

impl PickerState {
    /// Closed, nothing selected, showing the month that contains `today`.
    pub fn new(today: NaiveDate) -> Self {
        PickerState {
            selected: None,
            visible: VisibleMonth::from_date(today),
            open: false,
        }
    }

    // Each handler returns true when it changed the state, so the caller knows
    // a redraw is due.

    /// Field click: flips the popup.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        debug!("popup {}", if self.open { "opened" } else { "closed" });
        true
    }

    pub fn prev_month(&mut self) -> bool {
        self.navigate(self.visible.prev())
    }

    pub fn next_month(&mut self) -> bool {
        self.navigate(self.visible.next())
    }

    fn navigate(&mut self, target: Option<VisibleMonth>) -> bool {
        // Stop at the edge of chrono's calendar rather than show an empty grid.
        let Some(target) = target.filter(|t| has_grid(*t)) else {
            debug!("navigation from {} refused: outside the supported calendar", self.visible);
            return false;
        };
        debug!("visible month {} -> {target}", self.visible);
        self.visible = target;
        true
    }

    /// Commits a same-month cell and closes the popup. Filler cells are ignored.
    pub fn select(&mut self, cell: &DayCell) -> bool {
        if cell.other_month {
            debug!("ignored click on filler day {}", cell.date);
            return false;
        }
        debug!("selected {}", cell.date);
        self.selected = Some(cell.date);
        self.open = false;
        true
    }

    /// Civil-date comparison against the current selection.
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == Some(date)
    }

    pub fn grid(&self) -> Vec<DayCell> {
        build_grid(self.visible.year, self.visible.month as i32)
    }

    pub fn display_text(&self, date_format: &str) -> String {
        display_text(self.selected, date_format)
    }

    pub fn header_label(&self) -> String {
        header_label(self.visible)
    }
}

/// True when `month` can be shown as a full grid.
pub fn has_grid(month: VisibleMonth) -> bool {
    !build_grid(month.year, month.month as i32).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::format::{parse_display, DEFAULT_DATE_FORMAT};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn vm(year: i32, month: u32) -> VisibleMonth {
        VisibleMonth { year, month }
    }

    fn cell_for(state: &PickerState, date: NaiveDate) -> DayCell {
        *state.grid().iter().find(|c| c.date == date).unwrap()
    }

    #[test]
    fn test_new_is_closed_on_current_month() {
        let state = PickerState::new(d(2024, 1, 15));
        assert!(!state.open);
        assert_eq!(state.selected, None);
        assert_eq!(state.visible, vm(2024, 0));
    }

    #[test]
    fn test_toggle_flips_open() {
        let mut state = PickerState::new(d(2024, 1, 15));
        assert!(state.toggle());
        assert!(state.open);
        assert!(state.toggle());
        assert!(!state.open);
    }

    #[test]
    fn test_next_from_december_rolls_year() {
        let mut state = PickerState::new(d(2024, 12, 5));
        assert!(state.next_month());
        assert_eq!(state.visible, vm(2025, 0));
    }

    #[test]
    fn test_prev_from_january_rolls_year() {
        let mut state = PickerState::new(d(2024, 1, 5));
        assert!(state.prev_month());
        assert_eq!(state.visible, vm(2023, 11));
    }

    #[test]
    fn test_navigation_leaves_selection_and_popup_alone() {
        let mut state = PickerState::new(d(2024, 3, 5));
        state.toggle();
        let cell = cell_for(&state, d(2024, 3, 10));
        state.select(&cell);
        state.toggle();

        state.next_month();
        state.next_month();
        state.prev_month();
        assert_eq!(state.selected, Some(d(2024, 3, 10)));
        assert!(state.open);
        assert_eq!(state.visible, vm(2024, 3));
    }

    #[test]
    fn test_three_prev_clicks_from_january() {
        let mut state = PickerState::new(d(2024, 1, 20));
        state.toggle();
        for _ in 0..3 {
            state.prev_month();
        }
        assert_eq!(state.visible, vm(2023, 9));
        assert!(state.open);
    }

    #[test]
    fn test_select_other_month_is_noop() {
        let mut state = PickerState::new(d(2024, 2, 1));
        state.toggle();
        let before = state.clone();
        let filler = state.grid()[0];
        assert!(filler.other_month);
        assert!(!state.select(&filler));
        assert_eq!(state, before);
    }

    #[test]
    fn test_select_in_month_sets_date_and_closes() {
        let mut state = PickerState::new(d(2024, 2, 1));
        state.toggle();
        let cell = cell_for(&state, d(2024, 2, 29));
        assert!(state.select(&cell));
        assert_eq!(state.selected, Some(d(2024, 2, 29)));
        assert!(!state.open);
        assert_eq!(state.visible, vm(2024, 1));
    }

    #[test]
    fn test_select_overwrites_previous_selection() {
        let mut state = PickerState::new(d(2024, 2, 1));
        state.select(&cell_for(&state, d(2024, 2, 3)));
        state.select(&cell_for(&state, d(2024, 2, 4)));
        assert_eq!(state.selected, Some(d(2024, 2, 4)));
        assert!(!state.is_selected(d(2024, 2, 3)));
        assert!(state.is_selected(d(2024, 2, 4)));
    }

    #[test]
    fn test_display_text_round_trip_after_select() {
        let mut state = PickerState::new(d(2024, 7, 1));
        assert_eq!(state.display_text(DEFAULT_DATE_FORMAT), "");
        state.toggle();
        state.select(&cell_for(&state, d(2024, 7, 4)));
        let text = state.display_text(DEFAULT_DATE_FORMAT);
        assert_eq!(text, "7/4/2024");
        assert_eq!(parse_display(&text, DEFAULT_DATE_FORMAT), Some(d(2024, 7, 4)));
    }

    #[test]
    fn test_header_label_follows_navigation() {
        let mut state = PickerState::new(d(2024, 12, 1));
        assert_eq!(state.header_label(), "December 2024");
        state.next_month();
        assert_eq!(state.header_label(), "January 2025");
    }

    #[test]
    fn test_grid_follows_visible_month() {
        let mut state = PickerState::new(d(2024, 1, 1));
        state.next_month();
        let in_month = state.grid().iter().filter(|c| !c.other_month).count();
        assert_eq!(in_month, 29);
    }

    #[test]
    fn test_navigation_stops_at_i32_year_limits() {
        let mut state = PickerState::new(d(2024, 1, 1));
        state.visible = vm(i32::MAX, 11);
        assert!(!state.next_month());
        assert_eq!(state.visible, vm(i32::MAX, 11));
        state.visible = vm(i32::MIN, 0);
        assert!(!state.prev_month());
        assert_eq!(state.visible, vm(i32::MIN, 0));
    }

    #[test]
    fn test_has_grid() {
        assert!(has_grid(vm(2024, 1)));
        let last = VisibleMonth::from_date(NaiveDate::MAX);
        assert!(!has_grid(last));
        assert!(has_grid(last.prev().unwrap()));
    }

    #[test]
    fn test_navigation_stops_at_calendar_edge() {
        let mut state = PickerState::new(NaiveDate::MAX);
        let before = state.visible;
        assert!(!state.next_month());
        assert_eq!(state.visible, before);
    }
}
