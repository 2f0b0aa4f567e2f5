//! commit command - Lint pending changes, then stage and commit them
//!
//! Wires the real adapters into the commit workflow:
//!
//! - [`Git`] for status, staging and committing
//! - [`ProcessLinter`] running the configured lint command in the work tree
//! - [`TerminalPrompter`] reading answers from stdin
//!
//! The repository lock is held for the whole run so two `lv commit`
//! invocations cannot interleave their staging.

use anyhow::{Context as _, Result};
use async_trait::async_trait;

use crate::core::config::Config;
use crate::core::ops::RepoLock;
use crate::core::paths::LvPaths;
use crate::engine::workflow::DebugHooks;
use crate::engine::{
    Command, CommandDescriptor, CommandError, CommandOutput, CommitWorkflow, Context, Invocation,
    WorkflowOutcome, WorkflowSettings, WorkflowState,
};
use crate::git::Git;
use crate::lint::ProcessLinter;
use crate::ui::output;
use crate::ui::prompts::TerminalPrompter;

/// `lv commit`
#[derive(Debug, Default, Clone, Copy)]
pub struct CommitCommand;

#[async_trait(?Send)]
impl Command for CommitCommand {
    fn descriptor(&self) -> Result<CommandDescriptor, CommandError> {
        CommandDescriptor::new(
            "commit",
            "Lint pending changes, then stage and commit them with a conventional message",
            vec![],
        )
    }

    async fn action(&self, ctx: &Context, _invocation: &Invocation) -> Result<CommandOutput> {
        let verbosity = ctx.verbosity();
        let cwd = ctx
            .working_dir()
            .context("Failed to determine working directory")?;

        let git = Git::open(&cwd).context("Failed to open repository")?;
        let info = git.info()?;
        let paths = LvPaths::from_repo_info(&info);

        let loaded = Config::load(Some(&paths)).context("Failed to load configuration")?;
        for warning in &loaded.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                verbosity,
            );
        }
        let config = loaded.config;
        if let Some(path) = config.global_config_loaded_from() {
            output::debug(format!("global config: {}", path.display()), verbosity);
        }
        if let Some(path) = config.repo_config_loaded_from() {
            output::debug(format!("repo config: {}", path.display()), verbosity);
        }

        let lock = RepoLock::acquire(&paths)?;
        output::debug(format!("lock: {}", lock.path().display()), verbosity);

        let linter = ProcessLinter::new(&config.lint_command(), git.work_dir()?)?;
        output::debug(format!("lint command: {}", linter.display()), verbosity);

        let prompter = TerminalPrompter::stdin(ctx.interactive && config.interactive());
        let settings = WorkflowSettings {
            ignore: config.lint_ignore(),
            tool_name: config.tool_name().to_string(),
            default_type: config.default_commit_type(),
            verbosity,
        };
        let hooks = DebugHooks { verbosity };

        let workflow = CommitWorkflow::new(&git, &linter, &prompter, settings).with_hooks(&hooks);
        let outcome = workflow
            .run(&mut WorkflowState::new())
            .await
            .context("Commit failed")?;

        Ok(match outcome {
            WorkflowOutcome::Committed { .. } | WorkflowOutcome::NothingToCommit => {
                CommandOutput::Success
            }
            WorkflowOutcome::LintFailed { .. } => CommandOutput::Blocked {
                reason: "lint reported problems".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_is_valid() {
        let descriptor = CommitCommand.descriptor().unwrap();
        assert_eq!(descriptor.name(), "commit");
        assert!(descriptor.options().is_empty());
    }

    #[tokio::test]
    async fn outside_repository_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = Context {
            cwd: Some(temp.path().to_path_buf()),
            interactive: false,
            ..Context::default()
        };
        let app = CommitCommand.descriptor().unwrap().to_clap();
        let matches = app.clone().try_get_matches_from(["commit"]).unwrap();
        let invocation = Invocation::new("commit", matches, app);

        let err = CommitCommand.action(&ctx, &invocation).await.unwrap_err();
        assert!(err.to_string().contains("Failed to open repository"));
    }
}
