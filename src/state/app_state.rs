//! Application state.
//!
//! [`AppState`] is the single mutable structure behind every screen. It is
//! owned by the event loop and only mutated by the state machine; rendering
//! reads it immutably. Fields are grouped by the screen that owns them.

use crate::macros::LookupFilter;
use crate::model::{CoreProtectLogEntry, ExtraParameter, LogEntry, Macro, MacroParams, MenuEntry};
use crate::source::SaveRequest;
use crate::state::event::Effect;
use std::collections::BTreeMap;

// ===== Screen / Focus =====

/// The active screen. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Log file menu with the instructions pane.
    #[default]
    Menu,
    /// Parsed entries of the active log.
    LogList,
    /// Filename prompt over the log list.
    SaveFilenameInput,
    /// Macro catalog.
    MacroList,
    /// Declared macro parameters form.
    MacroParameterInput,
    /// Extra parameter picker.
    ParameterSelection,
    /// Value prompt for the picked extra parameter.
    ParameterValueInput,
    /// Countdown seconds prompt.
    CountdownInput,
    /// Running countdown.
    CountdownDisplay,
}

impl Screen {
    /// Screens drawn with the full-width wizard form.
    pub fn is_wizard(self) -> bool {
        matches!(
            self,
            Screen::MacroParameterInput | Screen::ParameterSelection | Screen::ParameterValueInput
        )
    }

    /// Screens drawn as a modal over the two-pane layout.
    pub fn is_overlay(self) -> bool {
        matches!(
            self,
            Screen::SaveFilenameInput | Screen::CountdownInput | Screen::CountdownDisplay
        )
    }
}

/// Which pane receives character input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Menu or log list navigation.
    #[default]
    LogFileList,
    /// Filter text box.
    FilterInput,
    /// Macro list navigation.
    MacroList,
}

// ===== Geometry =====

const MIN_LEFT_PANE: u16 = 25;
const MAX_LEFT_PANE: u16 = 70;
const MIN_RIGHT_PANE: u16 = 20;

/// Terminal size and derived pane widths. Width 0 means not yet known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    /// Terminal columns.
    pub width: u16,
    /// Terminal rows.
    pub height: u16,
    /// Columns given to the left pane.
    pub left_pane_width: u16,
}

impl Geometry {
    /// Derive pane widths for a terminal size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            left_pane_width: left_pane_width(width),
        }
    }

    /// True once a real size has been reported.
    pub fn is_known(&self) -> bool {
        self.width > 0
    }

    /// Entries moved by PageUp/PageDown.
    pub fn page_size(&self) -> usize {
        usize::from(self.height.saturating_sub(6)).max(1)
    }
}

/// One third of the width, clamped to [25, 70], leaving at least 20 columns
/// on the right when that does not push the left pane below 25.
pub fn left_pane_width(width: u16) -> u16 {
    let mut target = (width / 3).clamp(MIN_LEFT_PANE, MAX_LEFT_PANE);
    if width.saturating_sub(target) < MIN_RIGHT_PANE && target > MIN_LEFT_PANE {
        target = width.saturating_sub(MIN_RIGHT_PANE).max(MIN_LEFT_PANE);
    }
    target.min(width)
}

// ===== Cursor helpers =====

/// Move a cursor up, saturating at 0.
pub fn cursor_up(cursor: &mut usize, by: usize) {
    *cursor = cursor.saturating_sub(by);
}

/// Move a cursor down, clamping to the last index.
pub fn cursor_down(cursor: &mut usize, by: usize, len: usize) {
    *cursor = cursor.saturating_add(by).min(len.saturating_sub(1));
}

/// Clamp a cursor after its list shrank.
pub fn clamp_cursor(cursor: &mut usize, len: usize) {
    *cursor = (*cursor).min(len.saturating_sub(1));
}

// ===== Messages =====

/// Tone of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Completed action.
    Success,
    /// Failed action or validation.
    Error,
    /// Neutral note.
    Info,
}

/// A one-line status shown on the owning screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Tone.
    pub kind: MessageKind,
    /// Text.
    pub text: String,
}

impl StatusMessage {
    /// Success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    /// Error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    /// Informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }
}

/// Which background operation produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// Directory rescan.
    Scan,
    /// File read or parse.
    Load,
    /// Macro execution.
    Macro,
}

/// Operation failure surfaced in the left pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    /// Producer.
    pub origin: ErrorOrigin,
    /// Display text.
    pub message: String,
}

// ===== Per-screen state =====

/// Menu entries and cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    /// Log files followed by the fixed trailing entries.
    pub entries: Vec<MenuEntry>,
    /// Selected index.
    pub cursor: usize,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            entries: MenuEntry::build(Vec::new()),
            cursor: 0,
        }
    }
}

impl MenuState {
    /// Entry under the cursor.
    pub fn selected(&self) -> Option<&MenuEntry> {
        self.entries.get(self.cursor)
    }

    /// Replace the file entries, keeping the trailing ones, and clamp the cursor.
    pub fn set_files(&mut self, files: Vec<String>) {
        self.entries = MenuEntry::build(files);
        clamp_cursor(&mut self.cursor, self.entries.len());
    }
}

/// Active filters and the in-progress filter text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// OR-combined filters.
    pub active: Vec<String>,
    /// Text being typed.
    pub input: String,
}

/// Entries of the log being viewed.
///
/// Invariant: `standard` and `coreprotect` are never both non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogViewState {
    /// Path of the log being viewed, if any.
    pub active_log: Option<String>,
    /// Standard entries (CoreProtect mode off).
    pub standard: Vec<LogEntry>,
    /// CoreProtect entries (CoreProtect mode on).
    pub coreprotect: Vec<CoreProtectLogEntry>,
    /// Selected entry.
    pub cursor: usize,
    /// A load is in flight.
    pub loading: bool,
    /// Identifier of the most recent load request.
    pub request_id: u64,
}

impl LogViewState {
    /// Drop loaded entries and reset the cursor.
    pub fn clear_entries(&mut self) {
        self.standard.clear();
        self.coreprotect.clear();
        self.cursor = 0;
    }

    /// Length of whichever list the mode displays.
    pub fn len(&self, coreprotect_mode: bool) -> usize {
        if coreprotect_mode {
            self.coreprotect.len()
        } else {
            self.standard.len()
        }
    }
}

/// Save dialog buffer and last outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDialog {
    /// Filename being typed.
    pub filename: String,
    /// Validation or completion message.
    pub message: Option<StatusMessage>,
}

/// Macro configuration in progress.
///
/// Paging buffers (`field_inputs`) and the lookup filter are kept apart and
/// only merged by [`MacroWizard::execution_params`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroWizard {
    /// Name of the selected macro.
    pub macro_name: Option<String>,
    /// Input buffer per declared parameter name.
    pub field_inputs: BTreeMap<String, String>,
    /// Field under the cursor; `parameters.len()` is the add-parameter slot.
    pub field_cursor: usize,
    /// Cursor on the parameter selection list.
    pub selection_cursor: usize,
    /// Extra parameter whose value is being entered.
    pub selected_extra: Option<ExtraParameter>,
    /// Value being typed for `selected_extra`.
    pub value_input: String,
    /// Finalized declared parameters plus plain extras.
    pub resolved: MacroParams,
    /// Lookup constraints.
    pub lookup: LookupFilter,
    /// Message for the form and selection screens.
    pub message: Option<StatusMessage>,
    /// Message for the value prompt.
    pub value_message: Option<StatusMessage>,
}

impl MacroWizard {
    /// Fresh wizard for `m` with buffers seeded from defaults.
    pub fn for_macro(m: &Macro) -> Self {
        Self {
            macro_name: Some(m.name.clone()),
            field_inputs: m
                .parameters
                .iter()
                .map(|p| (p.name.clone(), p.default.clone()))
                .collect(),
            ..Self::default()
        }
    }

    /// Value a declared parameter resolves to: its buffer, or the default when blank.
    pub fn field_value(&self, name: &str, default: &str) -> String {
        self.field_inputs
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    /// Copy declared parameter buffers into `resolved`.
    pub fn finalize(&mut self, m: &Macro) {
        for p in &m.parameters {
            let value = self.field_value(&p.name, &p.default);
            self.resolved.insert(p.name.clone(), value);
        }
    }

    /// Full parameter map handed to the macro action.
    pub fn execution_params(&self, m: &Macro) -> MacroParams {
        let mut params = self.resolved.clone();
        for p in &m.parameters {
            params.insert(p.name.clone(), self.field_value(&p.name, &p.default));
        }
        self.lookup.merge_into(&mut params);
        params
    }
}

/// Countdown prompt and timer state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownState {
    /// Seconds typed by the user.
    pub input: String,
    /// Validation message.
    pub message: Option<StatusMessage>,
    /// Seconds left while running.
    pub remaining: u32,
}

// ===== AppState =====

/// Everything needed to render any screen and respond to any input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Active screen.
    pub screen: Screen,
    /// Where modals return to.
    pub previous_screen: Screen,
    /// Pane receiving character input.
    pub focus: Focus,
    /// Route parsing through the CoreProtect parser.
    pub coreprotect_mode: bool,
    /// Terminal size.
    pub geometry: Geometry,
    /// Main menu.
    pub menu: MenuState,
    /// Filters.
    pub filters: FilterState,
    /// Loaded log.
    pub log_view: LogViewState,
    /// Last background failure.
    pub last_error: Option<ErrorNotice>,
    /// Save dialog.
    pub save: SaveDialog,
    /// Macro list cursor.
    pub macro_cursor: usize,
    /// Macro configuration.
    pub wizard: MacroWizard,
    /// Countdown.
    pub countdown: CountdownState,
}

impl AppState {
    /// Initial state: menu with only the trailing entries.
    pub fn new(coreprotect_mode: bool) -> Self {
        Self {
            coreprotect_mode,
            ..Self::default()
        }
    }

    /// Switch screens. Focus follows for the list screens.
    pub fn go_to(&mut self, screen: Screen) {
        self.screen = screen;
        match screen {
            Screen::Menu | Screen::LogList => self.focus = Focus::LogFileList,
            Screen::MacroList => self.focus = Focus::MacroList,
            _ => {}
        }
    }

    /// Record a background failure.
    pub fn set_error(&mut self, origin: ErrorOrigin, message: impl Into<String>) {
        self.last_error = Some(ErrorNotice {
            origin,
            message: message.into(),
        });
    }

    /// Clear the error if it came from `origin`.
    pub fn clear_error_from(&mut self, origin: ErrorOrigin) {
        if self.last_error.as_ref().is_some_and(|e| e.origin == origin) {
            self.last_error = None;
        }
    }

    /// Number of entries in the list the current mode displays.
    pub fn active_entry_count(&self) -> usize {
        self.log_view.len(self.coreprotect_mode)
    }

    /// Snapshot of the displayed entries for saving.
    pub fn save_request(&self) -> Option<SaveRequest> {
        let request = if self.coreprotect_mode {
            SaveRequest::CoreProtect(self.log_view.coreprotect.clone())
        } else {
            SaveRequest::Standard(self.log_view.standard.clone())
        };
        (!request.is_empty()).then_some(request)
    }

    /// Clear entries and issue a new load of the active log.
    pub fn begin_load(&mut self) -> Option<Effect> {
        let path = self.log_view.active_log.clone()?;
        self.log_view.clear_entries();
        self.log_view.loading = true;
        self.log_view.request_id += 1;
        Some(Effect::LoadLog {
            request_id: self.log_view.request_id,
            path,
            filters: self.filters.active.clone(),
            coreprotect: self.coreprotect_mode,
        })
    }

    /// Flip CoreProtect mode and drop anything parsed under the old mode.
    pub fn toggle_coreprotect(&mut self) {
        self.coreprotect_mode = !self.coreprotect_mode;
        self.log_view.clear_entries();
        self.log_view.active_log = None;
        self.log_view.loading = false;
        if self.coreprotect_mode && self.focus == Focus::FilterInput {
            self.focus = Focus::LogFileList;
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
