// Keynorm Modifier State
// Shift/Ctrl/Alt/Meta flags as carried by keyboard events and shortcut specs

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Logical key names reported for a bare modifier press
const MODIFIER_KEY_NAMES: &[&str] = &["Shift", "Alt", "Control", "Meta"];

/// Check if a logical key name is one of the four modifier keys.
///
/// Matching is exact: `"shift"` or `"ShiftLeft"` are not modifier names.
#[inline]
pub fn is_modifier_key_name(key: &str) -> bool {
    MODIFIER_KEY_NAMES.contains(&key)
}

/// One of the four modifier flags, named the way shortcut configs spell them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ModifierFlag {
    #[strum(serialize = "shiftKey")]
    Shift,
    #[strum(serialize = "ctrlKey")]
    Ctrl,
    #[strum(serialize = "altKey")]
    Alt,
    #[strum(serialize = "metaKey")]
    Meta,
}

impl ModifierFlag {
    /// All flags in canonical order (shift, ctrl, alt, meta)
    pub const ALL: [ModifierFlag; 4] = [
        ModifierFlag::Shift,
        ModifierFlag::Ctrl,
        ModifierFlag::Alt,
        ModifierFlag::Meta,
    ];

    /// Config field name for this flag
    pub fn field_name(self) -> &'static str {
        self.into()
    }

    /// Parse a config field name (`"ctrlKey"`) into a flag
    pub fn from_field_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

/// Held state of the four modifier keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(rename = "shiftKey", default)]
    pub shift: bool,
    #[serde(rename = "ctrlKey", default)]
    pub ctrl: bool,
    #[serde(rename = "altKey", default)]
    pub alt: bool,
    #[serde(rename = "metaKey", default)]
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// True when ctrl, alt or meta is held.
    ///
    /// Shift alone does not make a combination special: the logical key
    /// already reflects it.
    pub fn is_special(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }

    /// Whether a given flag is held
    pub fn get(&self, flag: ModifierFlag) -> bool {
        match flag {
            ModifierFlag::Shift => self.shift,
            ModifierFlag::Ctrl => self.ctrl,
            ModifierFlag::Alt => self.alt,
            ModifierFlag::Meta => self.meta,
        }
    }

    /// Set a given flag
    pub fn set(&mut self, flag: ModifierFlag, held: bool) {
        match flag {
            ModifierFlag::Shift => self.shift = held,
            ModifierFlag::Ctrl => self.ctrl = held,
            ModifierFlag::Alt => self.alt = held,
            ModifierFlag::Meta => self.meta = held,
        }
    }

    /// Compact flag suffix used in canonical key strings.
    ///
    /// One letter per held modifier, always in the order S, C, A, M.
    pub fn flags(&self) -> String {
        let mut flags = String::with_capacity(4);
        if self.shift {
            flags.push('S');
        }
        if self.ctrl {
            flags.push('C');
        }
        if self.alt {
            flags.push('A');
        }
        if self.meta {
            flags.push('M');
        }
        flags
    }
}
