pub mod persistence;
pub mod picker_state;
pub mod settings;

pub use persistence::Persistable;
pub use picker_state::PickerState;
pub use settings::Settings;
