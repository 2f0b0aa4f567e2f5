//! engine::workflow
//!
//! The lint-gated commit state machine.
//!
//! # Phases
//!
//! ```text
//! Init -> StatusCollected -> Linted -> LintFailed            (terminal)
//!                                   -> LintPassed -> TypeSelected
//!                                      -> MessageEntered -> Staged -> Committed
//! ```
//!
//! Each phase awaits exactly one adapter call (or one per non-empty status
//! set when staging) before the next begins. Working-tree and index
//! mutations only happen in `Staged` and `Committed`, so a failing lint
//! gate leaves the repository untouched.
//!
//! # Failure semantics
//!
//! - A non-empty lint report is an outcome ([`WorkflowOutcome::LintFailed`]),
//!   not an error.
//! - A clean working tree stops after `StatusCollected` with
//!   [`WorkflowOutcome::NothingToCommit`]; nothing is linted or recorded.
//! - Adapter failures propagate as [`WorkflowError`].
//! - Staging attempts every non-empty set; if any set fails, the workflow
//!   stops with [`WorkflowError::StagingFailed`] and never commits.

use thiserror::Error;

use crate::core::types::{CommitType, IgnoreSet, Oid, StatusSnapshot};
use crate::git::{GitError, VersionControl};
use crate::lint::{LintError, LintReport, Linter};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{PromptError, Prompter};

const TYPE_PROMPT: &str = "Select the type of change you are committing";
const MESSAGE_PROMPT: &str = "Enter a short commit message:";

/// A workflow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Init,
    StatusCollected,
    Linted,
    LintFailed,
    LintPassed,
    TypeSelected,
    MessageEntered,
    Staged,
    Committed,
}

impl Phase {
    /// Whether the workflow stops in this phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::LintFailed | Phase::Committed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::StatusCollected => "status-collected",
            Phase::Linted => "linted",
            Phase::LintFailed => "lint-failed",
            Phase::LintPassed => "lint-passed",
            Phase::TypeSelected => "type-selected",
            Phase::MessageEntered => "message-entered",
            Phase::Staged => "staged",
            Phase::Committed => "committed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State owned by one workflow run.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    phase: Phase,
    status: Option<StatusSnapshot>,
    lint_report: Option<LintReport>,
    commit_type: Option<CommitType>,
    commit_message: Option<String>,
    commit: Option<Oid>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-select the commit type; the type prompt is then skipped.
    pub fn with_commit_type(mut self, commit_type: CommitType) -> Self {
        self.commit_type = Some(commit_type);
        self
    }

    /// Pre-fill the commit message; the message prompt is then skipped.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> Option<&StatusSnapshot> {
        self.status.as_ref()
    }

    pub fn lint_report(&self) -> Option<&LintReport> {
        self.lint_report.as_ref()
    }

    pub fn commit_type(&self) -> Option<CommitType> {
        self.commit_type
    }

    pub fn commit_message(&self) -> Option<&str> {
        self.commit_message.as_deref()
    }

    pub fn commit(&self) -> Option<&Oid> {
        self.commit.as_ref()
    }
}

/// Observers notified on every phase transition.
pub trait WorkflowHooks {
    /// Called after the workflow has entered `phase`.
    fn on_enter(&self, _phase: Phase, _state: &WorkflowState) {}

    /// Called just before the workflow leaves `phase`.
    fn on_exit(&self, _phase: Phase, _state: &WorkflowState) {}
}

/// Logs transitions as debug output.
#[derive(Debug, Clone, Copy)]
pub struct DebugHooks {
    pub verbosity: Verbosity,
}

impl WorkflowHooks for DebugHooks {
    fn on_enter(&self, phase: Phase, _state: &WorkflowState) {
        output::debug(format!("workflow: enter {}", phase), self.verbosity);
    }

    fn on_exit(&self, phase: Phase, _state: &WorkflowState) {
        output::debug(format!("workflow: exit {}", phase), self.verbosity);
    }
}

/// How a workflow run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The commit was recorded.
    Committed { oid: Oid, message: String },
    /// The lint gate blocked the commit.
    LintFailed { report: String },
    /// The working tree had no changes.
    NothingToCommit,
}

/// A status set that could not be staged.
#[derive(Debug, Clone)]
pub struct StagingFailure {
    pub set: &'static str,
    pub paths: Vec<String>,
    pub error: GitError,
}

impl std::fmt::Display for StagingFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.set, self.paths.join(", "), self.error)
    }
}

/// Errors that abort a workflow run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("version control: {0}")]
    Git(#[from] GitError),

    #[error("lint: {0}")]
    Lint(#[from] LintError),

    #[error("prompt: {0}")]
    Prompt(#[from] PromptError),

    /// One or more status sets failed to stage; nothing was committed.
    #[error("failed to stage {}", failures.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("; "))]
    StagingFailed { failures: Vec<StagingFailure> },
}

/// Settings that shape a workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub ignore: IgnoreSet,
    pub tool_name: String,
    pub default_type: CommitType,
    pub verbosity: Verbosity,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::default(),
            tool_name: crate::core::config::DEFAULT_TOOL_NAME.to_string(),
            default_type: CommitType::default(),
            verbosity: Verbosity::Normal,
        }
    }
}

/// The lint-gated commit workflow over three adapters.
pub struct CommitWorkflow<'a> {
    vcs: &'a dyn VersionControl,
    linter: &'a dyn Linter,
    prompter: &'a dyn Prompter,
    settings: WorkflowSettings,
    hooks: Option<&'a dyn WorkflowHooks>,
}

impl<'a> CommitWorkflow<'a> {
    pub fn new(
        vcs: &'a dyn VersionControl,
        linter: &'a dyn Linter,
        prompter: &'a dyn Prompter,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            vcs,
            linter,
            prompter,
            settings,
            hooks: None,
        }
    }

    /// Attach transition observers.
    pub fn with_hooks(mut self, hooks: &'a dyn WorkflowHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Drive `state` from `Init` to a terminal phase.
    pub async fn run(&self, state: &mut WorkflowState) -> Result<WorkflowOutcome, WorkflowError> {
        let verbosity = self.settings.verbosity;
        self.transition(state, Phase::Init);

        // StatusCollected
        let status = self.vcs.status().await?;
        output::info(format!("changes: {}", status.summary()), verbosity);
        let clean_tree = status.is_empty();
        state.status = Some(status);
        self.transition(state, Phase::StatusCollected);

        if clean_tree {
            output::info("nothing to commit, working tree clean", verbosity);
            self.finish(state);
            return Ok(WorkflowOutcome::NothingToCommit);
        }

        // Linted
        let candidates = state
            .status
            .as_ref()
            .map(|s| s.lint_candidates(&self.settings.ignore))
            .unwrap_or_default();
        output::debug(
            format!("lint candidates: {}", candidates.join(" ")),
            verbosity,
        );
        let report = if candidates.is_empty() {
            LintReport::clean()
        } else {
            self.linter.lint(&candidates).await?
        };
        output::print_raw(report.as_str());
        let clean = report.is_clean();
        state.lint_report = Some(report);
        self.transition(state, Phase::Linted);

        if !clean {
            self.transition(state, Phase::LintFailed);
            output::error("lint failed, fix the problems above before committing");
            let report = state
                .lint_report
                .as_ref()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default();
            self.finish(state);
            return Ok(WorkflowOutcome::LintFailed { report });
        }
        output::success("lint passed", verbosity);
        self.transition(state, Phase::LintPassed);

        // TypeSelected
        if state.commit_type.is_none() {
            let labels: Vec<String> = CommitType::ALL
                .iter()
                .map(|t| t.label().to_string())
                .collect();
            let index = self
                .prompter
                .select(TYPE_PROMPT, &labels, self.settings.default_type.index())
                .await?;
            let commit_type = CommitType::ALL.get(index).copied().ok_or_else(|| {
                PromptError::IoError(format!("selection {} is out of range", index))
            })?;
            state.commit_type = Some(commit_type);
        }
        self.transition(state, Phase::TypeSelected);

        // MessageEntered
        if state.commit_message.is_none() {
            let message = self.prompter.input(MESSAGE_PROMPT).await?;
            state.commit_message = Some(message);
        }
        self.transition(state, Phase::MessageEntered);

        // Staged
        let mut failures = Vec::new();
        if let Some(status) = state.status.as_ref() {
            for (set, paths) in status.sets() {
                if paths.is_empty() {
                    continue;
                }
                output::debug(format!("staging {}: {}", set, paths.join(" ")), verbosity);
                if let Err(error) = self.vcs.stage(paths).await {
                    output::error(format!("failed to stage {}: {}", set, error));
                    failures.push(StagingFailure {
                        set,
                        paths: paths.to_vec(),
                        error,
                    });
                }
            }
        }
        if !failures.is_empty() {
            return Err(WorkflowError::StagingFailed { failures });
        }
        self.transition(state, Phase::Staged);

        // Committed
        let commit_type = state.commit_type.unwrap_or(self.settings.default_type);
        let message = commit_type.compose(
            state.commit_message.as_deref().unwrap_or_default(),
            &self.settings.tool_name,
        );
        let oid = self.vcs.commit(&message).await?;
        output::success(format!("[{}] {}", oid.short(7), message), verbosity);
        state.commit = Some(oid.clone());
        self.transition(state, Phase::Committed);
        self.finish(state);

        Ok(WorkflowOutcome::Committed { oid, message })
    }

    fn transition(&self, state: &mut WorkflowState, next: Phase) {
        if let Some(hooks) = self.hooks {
            if state.phase != next {
                hooks.on_exit(state.phase, state);
            }
            state.phase = next;
            hooks.on_enter(next, state);
        } else {
            state.phase = next;
        }
    }

    fn finish(&self, state: &WorkflowState) {
        if let Some(hooks) = self.hooks {
            hooks.on_exit(state.phase, state);
        }
    }
}
