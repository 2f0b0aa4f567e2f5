//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$LV_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/lv/config.toml`
//! 3. `~/.lv/config.toml` (canonical write location)
//!
//! # Repo Config
//!
//! Located at `<common_dir>/lv/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing. Commit types are checked
//! during deserialization since [`CommitType`] only accepts known tokens.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::CommitType;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// interactive = true
/// tool_name = "lv-commit"
///
/// [lint]
/// command = ["npx", "eslint", "--format", "stylish"]
/// ignore = [".gitignore", ".eslintignore"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default interactive mode
    pub interactive: Option<bool>,

    /// Name appended to commit messages as `(by <tool_name>)`
    pub tool_name: Option<String>,

    /// Linter settings
    pub lint: Option<LintConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.tool_name {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "tool_name cannot be empty".to_string(),
                ));
            }
        }

        if let Some(lint) = &self.lint {
            lint.validate()?;
        }

        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// [lint]
/// command = ["cargo", "clippy", "--quiet", "--"]
///
/// [commit]
/// default_type = "fix"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Linter settings (override global)
    pub lint: Option<LintConfig>,

    /// Commit defaults
    pub commit: Option<CommitDefaults>,
}

impl RepoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(lint) = &self.lint {
            lint.validate()?;
        }
        Ok(())
    }
}

/// Linter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Program and leading arguments; candidate paths are appended
    pub command: Option<Vec<String>>,

    /// Paths never handed to the linter
    pub ignore: Option<Vec<String>>,
}

impl LintConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(command) = &self.command {
            match command.first() {
                None => {
                    return Err(ConfigError::InvalidValue(
                        "lint.command cannot be empty".to_string(),
                    ))
                }
                Some(program) if program.trim().is_empty() => {
                    return Err(ConfigError::InvalidValue(
                        "lint.command program cannot be blank".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Commit defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CommitDefaults {
    /// Preselected entry of the commit-type menu
    pub default_type: Option<CommitType>,
}
