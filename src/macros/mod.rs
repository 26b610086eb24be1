//! Built-in keyboard macros.
//!
//! [`default_catalog`] assembles the macros shipped with the binary. The
//! catalog is constructed once in `main` and passed to the state machine and
//! effect runner; nothing here is global.

pub mod hello;
pub mod keyboard;
pub mod pager;

use crate::model::MacroCatalog;

pub use keyboard::{Keyboard, Keystroke, RecordingKeyboard, TranscriptKeyboard};
pub use pager::{LookupFilter, PagingConfig};

/// The macros available in the macro list, in display order.
pub fn default_catalog() -> MacroCatalog {
    MacroCatalog::new(vec![hello::definition(), pager::definition()])
}
