//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/outliner/outliner.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `OUTLINER_*` prefix, `__` for nested keys
//!    (e.g. `OUTLINER_TREE__SHOW_IDS=true`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_env_vars;

/// How `show` renders an outline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeDisplay {
    /// Print node ids next to the text
    pub show_ids: bool,
    /// Appended to collapsed nodes that hide children
    pub collapsed_marker: String,
}

impl Default for TreeDisplay {
    fn default() -> Self {
        Self {
            show_ids: false,
            collapsed_marker: "…".into(),
        }
    }
}

/// Unified configuration for outliner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Where documents are stored (default: XDG data dir)
    pub data_dir: PathBuf,
    /// Document used when neither `--doc` nor `--shared` is given
    pub default_document: String,
    /// Write indented JSON
    pub pretty_json: bool,
    pub tree: TreeDisplay,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_document: "mypage".into(),
            pretty_json: true,
            tree: TreeDisplay::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "outliner")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.outliner"))
}

/// Get the XDG config directory for outliner.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "outliner").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("outliner.toml"))
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.default_document.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "default_document must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Load settings from the given files only, plus environment overrides.
    ///
    /// Used by `load` and by tests that must not depend on the user's global config.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())
            .map_err(config_err)?
            .set_default("default_document", defaults.default_document.clone())
            .map_err(config_err)?
            .set_default("pretty_json", defaults.pretty_json)
            .map_err(config_err)?
            .set_default("tree.show_ids", defaults.tree.show_ids)
            .map_err(config_err)?
            .set_default("tree.collapsed_marker", defaults.tree.collapsed_marker.clone())
            .map_err(config_err)?;

        if let Some(path) = global {
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("OUTLINER")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        settings.expand_paths();
        settings.validate()?;

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# outliner configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/outliner/outliner.toml
#   Explicit: outliner --config <file>
#   Env:      OUTLINER_* environment variables (OUTLINER_TREE__SHOW_IDS=true)

# Directory holding one <document>.json file per document
# data_dir = "~/.local/share/outliner"

# Document used when --doc/--shared are not given
# default_document = "mypage"

# Write indented JSON
# pretty_json = true

[tree]
# Print node ids next to their text
# show_ids = false

# Marker appended to collapsed nodes
# collapsed_marker = "…"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_expected_values() {
        let settings = Settings::default();
        assert_eq!(settings.default_document, "mypage");
        assert!(settings.pretty_json);
        assert!(!settings.tree.show_ids);
        assert!(settings.data_dir.to_string_lossy().contains("outliner"));
    }

    #[test]
    fn given_tilde_in_data_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            data_dir: PathBuf::from("~/notes"),
            ..Settings::default()
        };

        settings.expand_paths();

        assert!(!settings.data_dir.to_string_lossy().starts_with('~'));
        assert!(settings.data_dir.to_string_lossy().ends_with("notes"));
    }

    #[test]
    fn given_empty_default_document_when_validating_then_config_error() {
        let settings = Settings {
            default_document: "  ".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_sections() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("default_document"));
        assert!(toml.contains("[tree]"));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let parsed: Result<toml::Value, _> = toml::from_str(&Settings::template());
        assert!(parsed.is_ok());
    }
}
