// Keynorm Config Parser - TOML/JSON with Serde
// Parses shortcut bindings and rejects any file with an invalid shortcut

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::code_map::{CodeMap, CodeMapError};
use crate::shortcut::{ShortcutError, ShortcutSpec};
use crate::table::{Binding, ShortcutTable, TableError};

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Invalid shortcut #{} for '{}': {}", .index + 1, .action, .source)]
    InvalidShortcut {
        action: String,
        index: usize,
        #[source]
        source: ShortcutError,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Code map error: {0}")]
    CodeMap(#[from] CodeMapError),
}

/// Root of a shortcut config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// General settings
    #[serde(default)]
    pub general: Option<GeneralConfig>,

    /// Action name to raw shortcut objects, in file order
    #[serde(default)]
    pub shortcuts: IndexMap<String, ShortcutEntries>,
}

/// General settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Custom code map JSON file; relative paths resolve against the config file
    pub code_map: Option<PathBuf>,
}

/// Shortcuts for one action (single object or list)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ShortcutEntries {
    /// List of shortcut objects
    Multiple(Vec<Value>),

    /// Single shortcut object
    Single(Value),
}

impl ShortcutEntries {
    fn as_slice(&self) -> &[Value] {
        match self {
            ShortcutEntries::Multiple(values) => values,
            ShortcutEntries::Single(value) => std::slice::from_ref(value),
        }
    }
}

/// Validated shortcut configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Bindings in file order
    pub bindings: Vec<Binding>,
    /// Custom code map path, already resolved
    pub code_map_path: Option<PathBuf>,
    /// Path the config was loaded from
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Get the default config path (~/.config/keynorm/shortcuts.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keynorm").join("shortcuts.toml"))
    }

    /// Load a config file, picking the format from the extension (`.json` or TOML)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let file = if is_json {
            parse_json(&content)?
        } else {
            parse_toml(&content)?
        };

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut config = file.to_config(Some(base_dir))?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        parse_toml(content)?.to_config(None)
    }

    /// Parse configuration from JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        parse_json(content)?.to_config(None)
    }

    /// Build the lookup table from all bindings, in file order
    pub fn to_table(&self) -> Result<ShortcutTable, ConfigError> {
        let mut table = ShortcutTable::new();
        for binding in &self.bindings {
            table.insert(binding.action.clone(), binding.spec.clone())?;
        }
        log::debug!(
            "Shortcut table built with {} entries from {} bindings",
            table.len(),
            self.bindings.len()
        );
        Ok(table)
    }

    /// Code map to use for display: the configured one, or the builtin table
    pub fn code_map(&self) -> Result<Cow<'static, CodeMap>, ConfigError> {
        match &self.code_map_path {
            Some(path) => {
                log::debug!("Loading code map from {}", path.display());
                Ok(Cow::Owned(CodeMap::from_path(path)?))
            }
            None => Ok(Cow::Borrowed(CodeMap::builtin())),
        }
    }
}

fn parse_toml(content: &str) -> Result<ConfigFile, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))
}

fn parse_json(content: &str) -> Result<ConfigFile, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::JsonParse(e.to_string()))
}

impl ConfigFile {
    /// Validate every shortcut and convert to the internal Config.
    ///
    /// One invalid shortcut rejects the whole file.
    fn to_config(&self, base_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = self.general.as_ref().and_then(|g| g.code_map.as_ref()) {
            config.code_map_path = Some(match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            });
        }

        for (action, entries) in &self.shortcuts {
            let raw = entries.as_slice();
            if raw.is_empty() {
                log::warn!("Action '{}' has no shortcuts", action);
            }
            for (index, value) in raw.iter().enumerate() {
                let spec = ShortcutSpec::parse(value).map_err(|source| {
                    ConfigError::InvalidShortcut {
                        action: action.clone(),
                        index,
                        source,
                    }
                })?;
                log::trace!("Action '{}' shortcut {}: {:?}", action, index, spec);
                config.bindings.push(Binding {
                    action: action.clone(),
                    spec,
                });
            }
        }

        log::debug!(
            "Config parsed with {} actions and {} bindings",
            self.shortcuts.len(),
            config.bindings.len()
        );
        Ok(config)
    }
}
