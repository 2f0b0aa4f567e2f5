//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! lv has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$LV_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/lv/config.toml`
//! 3. `~/.lv/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use lv_cli::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! let config = result.config;
//!
//! println!("Tool name: {}", config.tool_name());
//! println!("Linter: {:?}", config.lint_command());
//! ```

pub mod schema;

pub use schema::{CommitDefaults, GlobalConfig, LintConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::paths::LvPaths;
use crate::core::types::{CommitType, IgnoreSet};

/// Tool name used in commit messages when none is configured.
pub const DEFAULT_TOOL_NAME: &str = "lv-commit";

/// Linter invoked when none is configured.
pub const DEFAULT_LINT_COMMAND: &[&str] = &["npx", "eslint", "--format", "stylish"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules; repo config overrides global.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `paths` is provided, also loads the repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(paths: Option<&LvPaths>) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_from(&Self::global_candidates(), paths)
    }

    /// Load configuration, searching `global_candidates` in order for the
    /// global file.
    pub fn load_from(
        global_candidates: &[PathBuf],
        paths: Option<&LvPaths>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match global_candidates.iter().find(|p| p.exists()) {
            Some(path) => (read_toml::<GlobalConfig>(path)?, Some(path.clone())),
            None => (GlobalConfig::default(), None),
        };

        let (repo, repo_path) = match paths {
            Some(paths) => {
                let path = paths.repo_config_path();
                if path.exists() {
                    (Some(read_toml::<RepoConfig>(&path)?), Some(path))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        // A repo-level ignore list replaces the global one entirely.
        let repo_ignore = repo
            .as_ref()
            .and_then(|r| r.lint.as_ref())
            .and_then(|l| l.ignore.as_ref());
        let global_ignore = global.lint.as_ref().and_then(|l| l.ignore.as_ref());
        if let (Some(path), Some(_), Some(_)) = (repo_path.as_ref(), repo_ignore, global_ignore) {
            warnings.push(ConfigWarning {
                message: "repo lint.ignore replaces the global lint.ignore list".to_string(),
                path: path.clone(),
            });
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Global config locations in search order.
    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("LV_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("lv/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".lv/config.toml"));
        }
        candidates
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Whether prompts are allowed by default. Defaults to `true`.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Name appended to commit messages. Defaults to `lv-commit`.
    pub fn tool_name(&self) -> &str {
        self.global.tool_name.as_deref().unwrap_or(DEFAULT_TOOL_NAME)
    }

    /// Linter program and leading arguments.
    pub fn lint_command(&self) -> Vec<String> {
        self.lint_setting(|l| l.command.as_ref())
            .cloned()
            .unwrap_or_else(|| DEFAULT_LINT_COMMAND.iter().map(|s| s.to_string()).collect())
    }

    /// Paths excluded from linting.
    pub fn lint_ignore(&self) -> IgnoreSet {
        self.lint_setting(|l| l.ignore.as_ref())
            .map(|paths| IgnoreSet::new(paths.iter().cloned()))
            .unwrap_or_default()
    }

    /// Preselected commit type. Defaults to `feat`.
    pub fn default_commit_type(&self) -> CommitType {
        self.repo
            .as_ref()
            .and_then(|r| r.commit.as_ref())
            .and_then(|c| c.default_type)
            .unwrap_or_default()
    }

    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// Resolve a lint setting, repo first, then global.
    fn lint_setting<'a, T: ?Sized>(
        &'a self,
        get: impl Fn(&'a LintConfig) -> Option<&'a T>,
    ) -> Option<&'a T> {
        self.repo
            .as_ref()
            .and_then(|r| r.lint.as_ref())
            .and_then(&get)
            .or_else(|| self.global.lint.as_ref().and_then(&get))
    }
}

/// Read and parse a TOML config file.
fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
