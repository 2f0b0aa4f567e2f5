//! lint::process
//!
//! Linter adapter that spawns an external static-analysis tool.
//!
//! The configured command (for example `npx eslint --format stylish`) runs
//! in the repository work tree with the candidate paths appended. Its
//! stdout is the report. A tool that exits unsuccessfully *with* output on
//! stdout is reporting findings; one that exits unsuccessfully with nothing
//! on stdout has itself failed.
//!
//! A candidate path starting with `-` is passed as `./<path>` so the tool
//! never parses a file name as one of its options.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::traits::{LintError, LintReport, Linter};

/// Runs a linter as a child process.
#[derive(Debug, Clone)]
pub struct ProcessLinter {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl ProcessLinter {
    /// Build a linter from `command` (program followed by leading args).
    ///
    /// # Errors
    ///
    /// Returns [`LintError::NoCommand`] if `command` is empty.
    pub fn new(command: &[String], cwd: &Path) -> Result<Self, LintError> {
        let (program, args) = command.split_first().ok_or(LintError::NoCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        })
    }

    /// The command line without candidate paths, for display.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait(?Send)]
impl Linter for ProcessLinter {
    async fn lint(&self, files: &[String]) -> Result<LintReport, LintError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(files.iter().map(|file| path_arg(file)))
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| LintError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        let report = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() && report.trim().is_empty() {
            return Err(LintError::Failed {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(LintReport::new(report))
    }
}

/// A repository-relative path as a command-line operand.
fn path_arg(path: &str) -> String {
    if path.starts_with('-') {
        format!("./{}", path)
    } else {
        path.to_string()
    }
}
