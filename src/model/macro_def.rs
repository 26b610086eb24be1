//! Macro catalog data.
//!
//! A [`Macro`] is a named keyboard-automation action with declared string
//! parameters. The [`MacroCatalog`] is built once at startup and shared
//! read-only by the state machine and the effect runner.

use crate::macros::Keyboard;
use crate::model::error::MacroError;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Parameter mapping handed to a macro action. Keys are parameter names.
pub type MacroParams = BTreeMap<String, String>;

/// Executable body of a macro.
pub type MacroAction = Arc<dyn Fn(&MacroParams, &dyn Keyboard) -> Result<(), MacroError> + Send + Sync>;

// ===== MacroParameter =====

/// A declared, always-present macro parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroParameter {
    /// Key in [`MacroParams`].
    pub name: String,
    /// Label shown next to the input field.
    pub description: String,
    /// Value used when the field is left empty.
    pub default: String,
}

impl MacroParameter {
    /// Convenience constructor.
    pub fn new(name: &str, description: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            default: default.to_string(),
        }
    }
}

// ===== ExtraParameter =====

/// How an addable parameter is stored once the user picks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraKind {
    /// Multi-value list of player names.
    Users,
    /// Single positive integer radius.
    Radius,
    /// Single CoreProtect time span such as `2d` or `12h`.
    Time,
    /// Direct action tag appended without a value prompt.
    Action(String),
    /// Free-form value stored under the given key.
    Plain(String),
}

/// An optional parameter offered on the parameter selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraParameter {
    /// Text shown in the selection list.
    pub label: String,
    /// Storage semantics.
    pub kind: ExtraKind,
}

impl ExtraParameter {
    /// Extra parameter with the given label.
    pub fn new(label: &str, kind: ExtraKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
        }
    }

    /// Direct action tag whose label is the tag itself.
    pub fn action(tag: &str) -> Self {
        Self::new(&format!("action: {tag}"), ExtraKind::Action(tag.to_string()))
    }
}

// ===== Macro =====

/// A catalog entry.
#[derive(Clone)]
pub struct Macro {
    /// Unique display name.
    pub name: String,
    /// One-line description for the macro list.
    pub description: String,
    /// Declared parameters, in form order.
    pub parameters: Vec<MacroParameter>,
    /// Parameters the user may add dynamically. Empty when unsupported.
    pub extra_parameters: Vec<ExtraParameter>,
    /// Action invoked when the countdown finishes.
    pub action: MacroAction,
}

impl fmt::Debug for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Macro")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("extra_parameters", &self.extra_parameters)
            .finish_non_exhaustive()
    }
}

impl Macro {
    /// Whether the wizard shows the virtual "add parameter" slot.
    pub fn supports_extra_parameters(&self) -> bool {
        !self.extra_parameters.is_empty()
    }

    /// True when the wizard can be skipped entirely.
    pub fn needs_no_input(&self) -> bool {
        self.parameters.is_empty() && self.extra_parameters.is_empty()
    }

    /// Invoke the action.
    pub fn run(&self, params: &MacroParams, keyboard: &dyn Keyboard) -> Result<(), MacroError> {
        (self.action)(params, keyboard)
    }
}

// ===== MacroCatalog =====

/// Immutable ordered list of macros.
#[derive(Debug, Clone, Default)]
pub struct MacroCatalog {
    macros: Vec<Macro>,
}

impl MacroCatalog {
    /// Build a catalog. Order is preserved for display.
    pub fn new(macros: Vec<Macro>) -> Self {
        Self { macros }
    }

    /// All macros in display order.
    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    /// Number of macros.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// True if the catalog holds no macros.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Macro at a list index.
    pub fn get(&self, index: usize) -> Option<&Macro> {
        self.macros.get(index)
    }

    /// Look up by name.
    pub fn find(&self, name: &str) -> Option<&Macro> {
        self.macros.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &str, parameters: Vec<MacroParameter>) -> Macro {
        Macro {
            name: name.to_string(),
            description: String::new(),
            parameters,
            extra_parameters: Vec::new(),
            action: Arc::new(|_, _| Ok(())),
        }
    }

    #[test]
    fn find_returns_macro_by_name() {
        let catalog = MacroCatalog::new(vec![
            noop("a", vec![]),
            noop("b", vec![MacroParameter::new("x", "x", "1")]),
        ]);
        assert_eq!(catalog.find("b").map(|m| m.parameters.len()), Some(1));
        assert!(catalog.find("c").is_none());
    }

    #[test]
    fn needs_no_input_only_without_parameters_or_extras() {
        let mut m = noop("a", vec![]);
        assert!(m.needs_no_input());
        m.extra_parameters.push(ExtraParameter::action("block"));
        assert!(!m.needs_no_input());
        assert!(m.supports_extra_parameters());
    }
}
