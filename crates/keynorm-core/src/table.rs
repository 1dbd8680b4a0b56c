// Keynorm Shortcut Table
// Canonical key string to action lookup, built from validated shortcut specs

use indexmap::IndexMap;

use crate::code_map::CodeMap;
use crate::event::KeyEvent;
use crate::normalize::canonical_key_string;
use crate::shortcut::ShortcutSpec;

/// Errors that can occur when binding a shortcut
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("shortcut '{friendly}' is bound to both '{existing}' and '{action}'")]
    Conflict {
        friendly: String,
        existing: String,
        action: String,
    },

    #[error("shortcut '{friendly}' for '{action}' can never match: code shortcuts need ctrl, alt or meta")]
    Unmatchable { friendly: String, action: String },
}

/// A shortcut bound to an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub action: String,
    pub spec: ShortcutSpec,
}

/// Lookup table from canonical key strings to bindings.
///
/// Insertion order is kept so help listings follow the config file.
#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    bindings: IndexMap<String, Binding>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a shortcut to an action.
    ///
    /// Binding the same shortcut to the same action twice is a no-op.
    pub fn insert(&mut self, action: impl Into<String>, spec: ShortcutSpec) -> Result<(), TableError> {
        let action = action.into();
        let Some(canonical) = spec.canonical_key() else {
            return Err(TableError::Unmatchable {
                friendly: spec.friendly(),
                action,
            });
        };

        if let Some(existing) = self.bindings.get(&canonical) {
            if existing.action == action {
                log::debug!("Shortcut '{}' already bound to '{}'", canonical, action);
                return Ok(());
            }
            return Err(TableError::Conflict {
                friendly: spec.friendly(),
                existing: existing.action.clone(),
                action,
            });
        }

        log::trace!("Binding '{}' -> '{}'", canonical, action);
        self.bindings.insert(canonical, Binding { action, spec });
        Ok(())
    }

    /// Action bound to a live event, if any. Bare modifier presses never match.
    pub fn lookup(&self, event: &KeyEvent) -> Option<&str> {
        if event.is_modifier_key() {
            return None;
        }
        self.get(&canonical_key_string(event))
    }

    /// Action bound to a canonical key string
    pub fn get(&self, canonical: &str) -> Option<&str> {
        self.bindings.get(canonical).map(|b| b.action.as_str())
    }

    /// All shortcuts bound to an action, in insertion order
    pub fn shortcuts_for<'a>(&'a self, action: &'a str) -> impl Iterator<Item = &'a ShortcutSpec> + 'a {
        self.bindings
            .values()
            .filter(move |b| b.action == action)
            .map(|b| &b.spec)
    }

    /// `(friendly, action)` pairs for help screens, using the builtin code map
    pub fn help_entries(&self) -> Vec<(String, &str)> {
        self.help_entries_with(CodeMap::builtin())
    }

    pub fn help_entries_with(&self, code_map: &CodeMap) -> Vec<(String, &str)> {
        self.bindings
            .values()
            .map(|b| (b.spec.friendly_with(code_map), b.action.as_str()))
            .collect()
    }

    /// Iterate over `(canonical, binding)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
