//! lint::traits
//!
//! The static-analysis contract consumed by the commit workflow.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from running the linter itself.
///
/// Findings are never an error; they are carried by [`LintReport`].
#[derive(Debug, Clone, Error)]
pub enum LintError {
    /// No linter command is configured.
    #[error("no lint command configured")]
    NoCommand,

    /// The linter process could not be started.
    #[error("failed to start linter '{program}': {message}")]
    Spawn { program: String, message: String },

    /// The linter exited unsuccessfully without producing a report.
    #[error("linter '{program}' failed{}: {stderr}", code.map(|c| format!(" with exit code {}", c)).unwrap_or_default())]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Tool-formatted lint output.
///
/// An empty report (ignoring whitespace) means "no findings".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport(String);

impl LintReport {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// A report with no findings.
    pub fn clean() -> Self {
        Self::default()
    }

    /// Whether the report holds no findings.
    pub fn is_clean(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The report text, verbatim.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LintReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static analysis over a list of repository-relative paths.
#[async_trait(?Send)]
pub trait Linter {
    /// Lint `files` and return the formatted report.
    async fn lint(&self, files: &[String]) -> Result<LintReport, LintError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_report_is_clean() {
        assert!(LintReport::new("\n  \n").is_clean());
        assert!(LintReport::clean().is_clean());
    }

    #[test]
    fn findings_are_not_clean() {
        let report = LintReport::new("1 problem (1 error, 0 warnings)");
        assert!(!report.is_clean());
        assert_eq!(report.as_str(), "1 problem (1 error, 0 warnings)");
    }

    #[test]
    fn failed_display_includes_exit_code() {
        let err = LintError::Failed {
            program: "eslint".to_string(),
            code: Some(2),
            stderr: "config not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "linter 'eslint' failed with exit code 2: config not found"
        );

        let err = LintError::Failed {
            program: "eslint".to_string(),
            code: None,
            stderr: "killed".to_string(),
        };
        assert_eq!(err.to_string(), "linter 'eslint' failed: killed");
    }
}
