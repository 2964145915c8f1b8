//! User-level defaults loaded from `~/.envtag/config.toml`.
//!
//! The file is optional; if it does not exist all fields fall back to their
//! `Default` values. Command-line flags always win over these values.
mod loader;
pub use loader::{load_user_config, load_user_config_from};

use crate::operation::{RetagOptions, WriteMode};
use crate::rewrite::MatchPolicy;
use crate::utils::DEFAULT_ENV_FILE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserConfigError {
    #[error("Failed to read user config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse user config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Defaults for a retag run (`[defaults]` table in the TOML file).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// File edited when `--path` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Whether to back up before rewriting when `--bkp` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
    #[serde(default)]
    pub atomic: bool,
    #[serde(default)]
    pub first_match_only: bool,
}

/// Top-level user configuration, deserialized from `~/.envtag/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Values supplied on the command line (or through their environment variables).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub path: Option<PathBuf>,
    pub backup: Option<bool>,
    pub atomic: bool,
    pub first_only: bool,
}

impl UserConfig {
    /// Merge command-line values over these defaults.
    #[must_use]
    pub fn retag_options(&self, cli: CliOverrides) -> RetagOptions {
        let defaults = &self.defaults;
        let path = cli
            .path
            .or_else(|| defaults.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
        let backup = cli.backup.or(defaults.backup).unwrap_or(true);
        let write_mode = if cli.atomic || defaults.atomic {
            WriteMode::Atomic
        } else {
            WriteMode::Truncate
        };
        let policy = if cli.first_only || defaults.first_match_only {
            MatchPolicy::First
        } else {
            MatchPolicy::All
        };

        RetagOptions {
            path,
            backup,
            write_mode,
            policy,
        }
    }
}

/// Resolve the canonical path for the user config file.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".envtag").join("config.toml"))
}
