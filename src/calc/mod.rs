pub mod format;
pub mod grid;
pub mod month;

pub use grid::{build_grid, DayCell, WEEKDAY_LABELS};
pub use month::VisibleMonth;
