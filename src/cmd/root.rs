use crate::data::Settings;
use crate::ui::picker_view::{run_app, App};
use crate::ui::{reset_terminal_on_panic, restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use log::info;

pub fn run(settings: Settings) -> Result<()> {
    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        reset_terminal_on_panic();
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(settings, today);
    info!("picker started on {}", app.state.visible);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    // The selection is not persisted; hand it to the caller on stdout.
    if let Some(date) = app.state.selected {
        println!("{}", date.format("%Y-%m-%d"));
    }

    result
}
