//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.
//! Background work is requested through [`Effect`] values and its results
//! come back as [`AppEvent`]s.

pub mod app_state;
pub mod countdown_handler;
pub mod event;
pub mod filter_handler;
pub mod input;
pub mod log_list_handler;
pub mod machine;
pub mod macro_handler;
pub mod menu_handler;
pub mod parameter_handler;
pub mod save_handler;

// Re-export for convenience
pub use app_state::{
    AppState, CountdownState, ErrorNotice, ErrorOrigin, FilterState, Focus, Geometry,
    LogViewState, MacroWizard, MenuState, MessageKind, SaveDialog, Screen, StatusMessage,
};
pub use event::{AppEvent, Effect, LoadedEntries};
pub use machine::ViewStateMachine;
