// Keynorm Config API
// Shortcut binding files (TOML or JSON) validated into a lookup table

pub mod parser;

pub use parser::{Config, ConfigError, ConfigFile, GeneralConfig, ShortcutEntries};
