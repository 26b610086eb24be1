//! Minimal macro: types a fixed greeting.

use super::Keyboard;
use crate::model::{Macro, MacroError, MacroParams};
use std::sync::Arc;

/// Catalog name.
pub const NAME: &str = "Type 'Hello World'";

/// Type the greeting.
pub fn run(_params: &MacroParams, keyboard: &dyn Keyboard) -> Result<(), MacroError> {
    keyboard.type_text("hello world!")
}

/// Catalog entry.
pub fn definition() -> Macro {
    Macro {
        name: NAME.to_string(),
        description: "A macro that types 'Hello World' after a countdown.".to_string(),
        parameters: Vec::new(),
        extra_parameters: Vec::new(),
        action: Arc::new(run),
    }
}
