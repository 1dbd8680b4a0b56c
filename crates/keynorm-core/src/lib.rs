// Keynorm Core Library
// Keyboard event normalization and shortcut validation

pub mod code_map;
pub mod config;
pub mod event;
pub mod modifier;
pub mod normalize;
pub mod present;
pub mod shortcut;
pub mod table;

pub use code_map::{CodeMap, CodeMapEntry, CodeMapError};
pub use config::{Config, ConfigError};
pub use event::{is_modifier_key, KeyEvent};
pub use modifier::{is_modifier_key_name, ModifierFlag, Modifiers};
pub use normalize::canonical_key_string;
pub use present::{friendly_key_label, friendly_key_string, friendly_key_string_with};
pub use shortcut::{validate, ErrorKind, FieldType, ShortcutError, ShortcutSpec};
pub use table::{Binding, ShortcutTable, TableError};
