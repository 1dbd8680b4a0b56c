// Keynorm Shortcut Specs
// Validation and typed form of user-authored shortcut definitions

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use strum_macros::Display;

use crate::code_map::CodeMap;
use crate::event::KeyEvent;
use crate::modifier::{ModifierFlag, Modifiers};
use crate::normalize::{canonical_code_string, canonical_key_string};
use crate::present::{friendly_code_combo, friendly_key_label};

/// Primitive type a shortcut field is expected to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
}

/// Broad classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The object does not have the fields of either allowed shape
    Shape,
    /// A field that neither shape allows
    InvalidField,
    /// A known field holding the wrong primitive type
    Type,
}

/// Errors that can occur when validating a shortcut spec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutError {
    #[error("must specify exactly one of code or key")]
    CodeOrKey,

    #[error("no modifier fields (e.g. {0}) allowed when key is specified")]
    ModifierWithKey(ModifierFlag),

    #[error("missing {0}: shiftKey, ctrlKey, altKey and metaKey are required when code is specified")]
    MissingModifier(ModifierFlag),

    #[error("invalid field {0}")]
    InvalidField(String),

    #[error("{field} must be a {expected}")]
    WrongType { field: String, expected: FieldType },
}

impl ShortcutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShortcutError::CodeOrKey
            | ShortcutError::ModifierWithKey(_)
            | ShortcutError::MissingModifier(_) => ErrorKind::Shape,
            ShortcutError::InvalidField(_) => ErrorKind::InvalidField,
            ShortcutError::WrongType { .. } => ErrorKind::Type,
        }
    }

    fn wrong_type(field: &str, expected: FieldType) -> Self {
        ShortcutError::WrongType {
            field: field.to_string(),
            expected,
        }
    }
}

/// A validated user-defined shortcut.
///
/// Two shapes are accepted:
///   1. A physical key with explicit modifier state, for combinations using
///      ctrl, alt or meta:
///      `{code, shiftKey, ctrlKey, altKey, metaKey}`
///   2. A logical key on its own: `{key}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Value")]
pub enum ShortcutSpec {
    Modified { code: String, modifiers: Modifiers },
    Plain { key: String },
}

impl ShortcutSpec {
    /// Parse a raw config object into one of the two shapes.
    ///
    /// Every field present is checked; the first violation found is returned.
    pub fn parse(raw: &Value) -> Result<Self, ShortcutError> {
        let Some(fields) = raw.as_object() else {
            // Neither code nor key can be present on a non-object
            return Err(ShortcutError::CodeOrKey);
        };

        let has_code = fields.contains_key("code");
        let has_key = fields.contains_key("key");
        if has_code == has_key {
            return Err(ShortcutError::CodeOrKey);
        }

        if has_code {
            parse_modified(fields)
        } else {
            parse_plain(fields)
        }
    }

    /// Canonical string a matching event produces, see [`canonical_key_string`].
    ///
    /// Returns `None` for a code shortcut without ctrl, alt or meta: live events
    /// in that state canonicalize to their logical key, never to a code.
    pub fn canonical_key(&self) -> Option<String> {
        match self {
            ShortcutSpec::Plain { key } => Some(key.clone()),
            ShortcutSpec::Modified { code, modifiers } if modifiers.is_special() => {
                Some(canonical_code_string(code, modifiers))
            }
            ShortcutSpec::Modified { .. } => None,
        }
    }

    /// Check whether a live event triggers this shortcut
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.canonical_key()
            .is_some_and(|canonical| canonical == canonical_key_string(event))
    }

    /// Display string using the builtin code map
    pub fn friendly(&self) -> String {
        self.friendly_with(CodeMap::builtin())
    }

    pub fn friendly_with(&self, code_map: &CodeMap) -> String {
        match self {
            ShortcutSpec::Plain { key } => friendly_key_label(key),
            ShortcutSpec::Modified { code, modifiers } => {
                friendly_code_combo(code, modifiers, code_map)
            }
        }
    }
}

fn parse_modified(fields: &Map<String, Value>) -> Result<ShortcutSpec, ShortcutError> {
    let mut code = None;
    let mut modifiers = Modifiers::NONE;

    for (name, value) in fields {
        if let Some(flag) = ModifierFlag::from_field_name(name) {
            let held = value
                .as_bool()
                .ok_or_else(|| ShortcutError::wrong_type(name, FieldType::Boolean))?;
            modifiers.set(flag, held);
        } else if name == "code" {
            let s = value
                .as_str()
                .ok_or_else(|| ShortcutError::wrong_type(name, FieldType::String))?;
            code = Some(s.to_string());
        } else {
            return Err(ShortcutError::InvalidField(name.clone()));
        }
    }

    if let Some(missing) = ModifierFlag::ALL
        .into_iter()
        .find(|flag| !fields.contains_key(flag.field_name()))
    {
        return Err(ShortcutError::MissingModifier(missing));
    }

    let code = code.ok_or(ShortcutError::CodeOrKey)?;
    Ok(ShortcutSpec::Modified { code, modifiers })
}

fn parse_plain(fields: &Map<String, Value>) -> Result<ShortcutSpec, ShortcutError> {
    let mut key = None;

    for (name, value) in fields {
        if let Some(flag) = ModifierFlag::from_field_name(name) {
            return Err(ShortcutError::ModifierWithKey(flag));
        } else if name == "key" {
            let s = value
                .as_str()
                .ok_or_else(|| ShortcutError::wrong_type(name, FieldType::String))?;
            key = Some(s.to_string());
        } else {
            return Err(ShortcutError::InvalidField(name.clone()));
        }
    }

    let key = key.ok_or(ShortcutError::CodeOrKey)?;
    Ok(ShortcutSpec::Plain { key })
}

/// Validates a user-defined shortcut object.
///
/// Only meant for shortcuts loaded from configuration, not for live events.
pub fn validate(raw: &Value) -> Result<(), ShortcutError> {
    ShortcutSpec::parse(raw).map(|_| ())
}

impl TryFrom<Value> for ShortcutSpec {
    type Error = ShortcutError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        ShortcutSpec::parse(&raw)
    }
}

impl Serialize for ShortcutSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ShortcutSpec::Plain { key } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("key", key)?;
                map.end()
            }
            ShortcutSpec::Modified { code, modifiers } => {
                let mut map = serializer.serialize_map(Some(5))?;
                map.serialize_entry("code", code)?;
                for flag in ModifierFlag::ALL {
                    map.serialize_entry(flag.field_name(), &modifiers.get(flag))?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for ShortcutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.friendly())
    }
}
