//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/officemates/officemates.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `OFFICEMATES_*` prefix
//!
//! CLI flags (`--db`, `--data`) are applied on top by the command layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{NodeType, NodeTypes};

/// Database path selecting a private in-memory store.
pub const IN_MEMORY: &str = ":memory:";

/// Where the node table lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file, or `:memory:`
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }
}

/// What gets imported before a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImportConfig {
    /// JSON file with the hierarchy records
    pub data_file: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("mock_data.json"),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → field not specified, inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub database: RawDatabaseConfig,
    pub import: RawImportConfig,
    pub node_types: RawNodeTypes,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawImportConfig {
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawNodeTypes {
    pub office: Option<NodeType>,
    pub employee: Option<NodeType>,
}

/// Unified configuration for officemates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub import: ImportConfig,
    /// Type codes for offices and employees
    pub node_types: NodeTypes,
}

/// Default database location: `<XDG data dir>/officemates/officemates.db`.
fn default_database_path() -> PathBuf {
    ProjectDirs::from("", "", "officemates")
        .map(|dirs| dirs.data_dir().join("officemates.db"))
        .unwrap_or_else(|| PathBuf::from("officemates.db"))
}

/// Get the XDG config directory for officemates.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "officemates").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("officemates.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path, leaving it untouched on failure.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Integer override: absent keeps the base, unparsable is an error.
fn env_int(config: &Config, key: &str) -> Result<Option<NodeType>, ApplicationError> {
    match config.get_int(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    /// Overlay values from a raw config layer; unspecified fields keep the base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            database: DatabaseConfig {
                path: overlay
                    .database
                    .path
                    .clone()
                    .unwrap_or_else(|| self.database.path.clone()),
            },
            import: ImportConfig {
                data_file: overlay
                    .import
                    .data_file
                    .clone()
                    .unwrap_or_else(|| self.import.data_file.clone()),
            },
            node_types: NodeTypes {
                office: overlay.node_types.office.unwrap_or(self.node_types.office),
                employee: overlay
                    .node_types
                    .employee
                    .unwrap_or(self.node_types.employee),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply OFFICEMATES_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OFFICEMATES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("database.path") {
            settings.database.path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("import.data_file") {
            settings.import.data_file = PathBuf::from(val);
        }
        if let Some(val) = env_int(&config, "node_types.office")? {
            settings.node_types.office = val;
        }
        if let Some(val) = env_int(&config, "node_types.employee")? {
            settings.node_types.employee = val;
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        if !self.database.is_in_memory() {
            self.database.path = expand_path(&self.database.path);
        }
        self.import.data_file = expand_path(&self.import.data_file);
    }

    /// Apply command-line overrides (highest precedence).
    pub fn with_overrides(mut self, database: Option<&Path>, data_file: Option<&Path>) -> Self {
        if let Some(path) = database {
            self.database.path = path.to_path_buf();
        }
        if let Some(path) = data_file {
            self.import.data_file = path.to_path_buf();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_uses_known_type_codes() {
        let settings = Settings::default();
        assert_eq!(settings.node_types.office, 1);
        assert_eq!(settings.node_types.employee, 3);
        assert_eq!(settings.import.data_file, PathBuf::from("mock_data.json"));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay: RawSettings = toml::from_str("[node_types]\noffice = 7\n").unwrap();

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.node_types.office, 7);
        assert_eq!(merged.node_types.employee, 3);
        assert_eq!(merged.database, base.database);
    }

    #[test]
    fn given_memory_path_when_checking_then_is_in_memory() {
        let db = DatabaseConfig {
            path: PathBuf::from(IN_MEMORY),
        };
        assert!(db.is_in_memory());
    }
}
