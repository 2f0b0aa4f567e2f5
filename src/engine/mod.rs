//! engine
//!
//! Command lifecycle and the commit workflow.
//!
//! # Architecture
//!
//! The engine sits between the CLI and the adapters:
//!
//! - [`command`] defines the [`Command`] trait every subcommand implements,
//!   plus the descriptor types the dispatcher validates at registration.
//! - [`workflow`] is the lint-gated commit state machine. It depends only on
//!   the adapter traits ([`crate::git::VersionControl`], [`crate::lint::Linter`],
//!   [`crate::ui::prompts::Prompter`]), never on concrete implementations.
//!
//! # Command Lifecycle
//!
//! ```text
//! register -> parse -> pre_action -> action -> post_action
//! ```
//!
//! # Example
//!
//! ```ignore
//! use lv_cli::engine::workflow::{CommitWorkflow, WorkflowSettings, WorkflowState};
//!
//! let workflow = CommitWorkflow::new(&git, &linter, &prompter, WorkflowSettings::default());
//! let outcome = workflow.run(&mut WorkflowState::new()).await?;
//! ```

pub mod command;
pub mod workflow;

pub use command::{
    Command, CommandDescriptor, CommandError, CommandOutput, Invocation, OptionSpec,
};
pub use workflow::{
    CommitWorkflow, Phase, WorkflowError, WorkflowHooks, WorkflowOutcome, WorkflowSettings,
    WorkflowState,
};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
        }
    }
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory commands operate from.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir(),
        }
    }
}
