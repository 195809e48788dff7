use crate::calc::{DayCell, WEEKDAY_LABELS};
use crate::data::{PickerState, Settings};
use crate::ui::Tui;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::{debug, trace};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const FIELD_WIDTH: u16 = 30;
const FIELD_HEIGHT: u16 = 3;
const CELL_WIDTH: u16 = 4;
const NAV_WIDTH: u16 = 3;
// 7 cells plus the left and right border.
const POPUP_WIDTH: u16 = CELL_WIDTH * 7 + 2;
// Borders, header row, weekday row, six weeks.
const POPUP_HEIGHT: u16 = 2 + 1 + 1 + 6;

/// Something a click can land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Field,
    PrevMonth,
    NextMonth,
    /// Index into the grid of the visible month.
    Day(usize),
}

/// Clickable regions recorded during the last render.
#[derive(Default, Debug)]
struct HitMap {
    field: Rect,
    prev: Rect,
    next: Rect,
    days: Vec<Rect>,
}

pub struct App {
    pub state: PickerState,
    settings: Settings,
    today: NaiveDate,
    hits: HitMap,
}

impl App {
    pub fn new(settings: Settings, today: NaiveDate) -> Self {
        App {
            state: PickerState::new(today),
            settings,
            today,
            hits: HitMap::default(),
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') => true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => true,
            _ => false,
        }
    }

    /// Returns true if the click changed the widget state.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            _ => false,
        }
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> bool {
        let Some(target) = self.hit_test(column, row) else {
            trace!("click at ({column}, {row}) hit nothing");
            return false;
        };
        debug!("click on {target:?}");
        match target {
            Target::Field => self.state.toggle(),
            Target::PrevMonth => self.state.prev_month(),
            Target::NextMonth => self.state.next_month(),
            Target::Day(index) => match self.state.grid().get(index) {
                Some(cell) => self.state.select(cell),
                None => false,
            },
        }
    }

    /// Maps a terminal position to whatever the last render drew there.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);
        if self.hits.field.contains(pos) {
            return Some(Target::Field);
        }
        if !self.state.open {
            return None;
        }
        if self.hits.prev.contains(pos) {
            return Some(Target::PrevMonth);
        }
        if self.hits.next.contains(pos) {
            return Some(Target::NextMonth);
        }
        self.hits
            .days
            .iter()
            .position(|rect| rect.contains(pos))
            .map(Target::Day)
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.hits = HitMap::default();

        let field = Rect::new(area.x, area.y, FIELD_WIDTH, FIELD_HEIGHT).intersection(area);
        self.render_field(f, field);
        self.hits.field = field;

        let below = Rect::new(
            area.x,
            area.y + field.height,
            area.width,
            area.height.saturating_sub(field.height),
        );
        let mut used = field.height;
        if self.state.open {
            if below.width < POPUP_WIDTH || below.height < POPUP_HEIGHT {
                let msg = Paragraph::new("Enlarge the terminal to show the calendar.")
                    .style(Style::default().fg(Color::Red));
                f.render_widget(msg, below);
                return;
            }
            let popup = Rect::new(below.x, below.y, POPUP_WIDTH, POPUP_HEIGHT);
            self.render_popup(f, popup);
            used += POPUP_HEIGHT;
        }

        if area.height > used {
            let help = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            let text = Paragraph::new("click the field to open or close  q: quit")
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(text, help);
        }
    }

    fn render_field(&self, f: &mut Frame, area: Rect) {
        let text = self.state.display_text(&self.settings.date_format);
        let line = if text.is_empty() {
            Line::from(Span::styled(
                self.settings.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(text)
        };
        let border = if self.state.open {
            Style::default().fg(Color::Blue)
        } else {
            Style::default()
        };
        let field = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Date "),
        );
        f.render_widget(field, area);
    }

    fn render_popup(&mut self, f: &mut Frame, area: Rect) {
        f.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Header: < Month YYYY >
        let prev = Rect::new(inner.x, inner.y, NAV_WIDTH, 1);
        let next = Rect::new(inner.right() - NAV_WIDTH, inner.y, NAV_WIDTH, 1);
        let label = Rect::new(
            prev.right(),
            inner.y,
            inner.width - 2 * NAV_WIDTH,
            1,
        );
        let nav_style = Style::default().add_modifier(Modifier::BOLD);
        f.render_widget(Paragraph::new(" < ").style(nav_style), prev);
        f.render_widget(Paragraph::new(" > ").style(nav_style), next);
        f.render_widget(
            Paragraph::new(self.state.header_label())
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD)),
            label,
        );
        self.hits.prev = prev;
        self.hits.next = next;

        let weekdays: Vec<Span> = WEEKDAY_LABELS
            .iter()
            .map(|w| Span::styled(format!(" {w} "), Style::default().add_modifier(Modifier::BOLD)))
            .collect();
        f.render_widget(
            Paragraph::new(Line::from(weekdays)),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );

        let grid = self.state.grid();
        let grid_top = inner.y + 2;
        let mut lines = Vec::with_capacity(6);
        for (week, days) in grid.chunks(7).enumerate() {
            let mut spans = Vec::with_capacity(7);
            for (col, cell) in days.iter().enumerate() {
                let style = day_cell_style(
                    cell.other_month,
                    self.state.is_selected(cell.date),
                    cell.date == self.today,
                );
                spans.push(Span::styled(format!(" {:>2} ", cell.date.day()), style));
                self.hits.days.push(Rect::new(
                    inner.x + col as u16 * CELL_WIDTH,
                    grid_top + week as u16,
                    CELL_WIDTH,
                    1,
                ));
            }
            lines.push(Line::from(spans));
        }
        f.render_widget(
            Paragraph::new(lines),
            Rect::new(inner.x, grid_top, inner.width, inner.bottom() - grid_top),
        );
    }
}

/// Style for one grid cell. A selected day wins over everything else, so a
/// selection that shows up as a filler cell of a neighbouring month stays visible.
pub(crate) fn day_cell_style(other_month: bool, selected: bool, today: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else if other_month {
        Style::default().fg(Color::DarkGray)
    } else if today {
        Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Grid cell for a date, if the visible month shows it.
pub(crate) fn find_cell(grid: &[DayCell], date: NaiveDate) -> Option<&DayCell> {
    grid.iter().find(|c| c.date == date)
}

// ── App event loop ────────────────────────────────────────────────────────────

/// Draws, then blocks for input. Only redraws after a state change or resize.
pub fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|f| app.render(f))?;
            dirty = false;
        }
        match event::read()? {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
            CEvent::Mouse(mouse) => dirty |= app.handle_mouse(mouse),
            CEvent::Resize(..) => dirty = true,
            _ => {}
        }
    }
    debug!("event loop finished");
    Ok(())
}
