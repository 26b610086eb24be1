//! Domain model types (pure).
//!
//! All types in this module are plain data with constructors and accessors.

pub mod coreprotect_entry;
pub mod error;
pub mod log_entry;
pub mod macro_def;
pub mod menu;

// Re-export for convenience
pub use coreprotect_entry::{CoreProtectLogEntry, Elapsed};
pub use error::{AppError, MacroError, ReadError, SaveError, ScanError};
pub use log_entry::LogEntry;
pub use macro_def::{
    ExtraKind, ExtraParameter, Macro, MacroAction, MacroCatalog, MacroParameter, MacroParams,
};
pub use menu::MenuEntry;
