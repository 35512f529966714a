//! Configuration management with layered loading
//!
//! Settings only affect presentation (help layout). They never supply flag values.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/flagtree/flagtree.toml`
//! 3. Explicit config file passed by the caller (e.g. `--config`)
//! 4. Environment variables: `FLAGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{CliError, CliResult};
use crate::domain::HelpStyle;

/// Raw help settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawHelpStyle {
    pub options_header: Option<String>,
    pub subcommand_prefix: Option<String>,
    pub column_gap: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub help: RawHelpStyle,
}

/// Unified configuration for flagtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Help listing layout
    pub help: HelpStyle,
}

/// Get the XDG config directory for flagtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flagtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("flagtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> CliResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| CliError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let base = &self.help;
        let raw = &overlay.help;
        Self {
            help: HelpStyle {
                options_header: raw
                    .options_header
                    .clone()
                    .unwrap_or_else(|| base.options_header.clone()),
                subcommand_prefix: raw
                    .subcommand_prefix
                    .clone()
                    .unwrap_or_else(|| base.subcommand_prefix.clone()),
                column_gap: raw.column_gap.unwrap_or(base.column_gap),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file supplied by the caller; it must exist
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            debug!("loading config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply FLAGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> CliResult<Self> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FLAGTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("help.options_header") {
            settings.help.options_header = val;
        }
        if let Ok(val) = config.get_string("help.subcommand_prefix") {
            settings.help.subcommand_prefix = val;
        }
        match config.get::<usize>("help.column_gap") {
            Ok(val) => settings.help.column_gap = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# flagtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/flagtree/flagtree.toml
#   File:   --config <path>
#   Env:    FLAGTREE_* environment variables, e.g. FLAGTREE_HELP__COLUMN_GAP=4

[help]
# Header above the flag listing
# options_header = "Options"

# Marker before each subcommand block, followed by the parent command name
# subcommand_prefix = "Subcommand on"

# Spaces between the "-s --name" column and the description
# column_gap = 2
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> CliError {
    CliError::Config {
        message: e.to_string(),
    }
}
