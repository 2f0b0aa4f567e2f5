//! cli::dispatcher
//!
//! Subcommand registry and lifecycle driver.
//!
//! # Architecture
//!
//! The dispatcher owns the clap application. Commands are registered one
//! at a time before arguments are parsed; each registration validates the
//! command's descriptor and attaches a clap subcommand built from it.
//! Parsing seals the dispatcher, after which further registrations fail
//! with [`CommandError::InvalidDispatcher`].
//!
//! Dispatch runs a global preflight (debug banner, environment check) and
//! then the selected command's `pre_action`, `action` and `post_action`
//! with the parsed arguments.
//!
//! # Example
//!
//! ```ignore
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register(Box::new(CommitCommand))?;
//! let parsed = dispatcher.try_parse_from(["lv", "commit"])?;
//! let output = dispatcher.dispatch(&parsed).await?;
//! ```

use std::ffi::OsString;

use anyhow::{bail, Result};
use clap::{CommandFactory, FromArgMatches};

use super::args::Cli;
use crate::engine::{Command, CommandError, CommandOutput, Context, Invocation};
use crate::git::libgit2_version;
use crate::ui::output;

/// Oldest libgit2 release lv supports.
pub const MIN_LIBGIT2_VERSION: (u32, u32, u32) = (1, 0, 0);

/// Arguments parsed for one dispatch.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub context: Context,
    pub invocation: Invocation,
}

/// Registry of subcommands.
pub struct Dispatcher {
    app: clap::Command,
    commands: Vec<(String, Box<dyn Command>)>,
    sealed: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            app: Cli::command()
                .subcommand_required(true)
                .arg_required_else_help(true),
            commands: Vec::new(),
            sealed: false,
        }
    }

    /// Register a command.
    ///
    /// Nothing is registered if this returns an error.
    ///
    /// # Errors
    ///
    /// - [`CommandError::InvalidDispatcher`] if arguments were already parsed
    /// - [`CommandError::ContractViolation`] if the descriptor is invalid
    /// - [`CommandError::DuplicateCommand`] if the name is taken
    pub fn register(&mut self, command: Box<dyn Command>) -> Result<(), CommandError> {
        if self.sealed {
            return Err(CommandError::InvalidDispatcher(
                "arguments have already been parsed".to_string(),
            ));
        }

        let descriptor = command.descriptor()?;
        let name = descriptor.name().to_string();
        if self.commands.iter().any(|(existing, _)| *existing == name) {
            return Err(CommandError::DuplicateCommand { name });
        }

        let app = std::mem::take(&mut self.app);
        self.app = app.subcommand(descriptor.to_clap());
        self.commands.push((name, command));
        Ok(())
    }

    /// Names of registered commands, in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Whether arguments have been parsed.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// The clap application with every registered subcommand attached.
    pub fn app(&self) -> &clap::Command {
        &self.app
    }

    /// Parse process arguments. Seals the dispatcher.
    ///
    /// Help, version and usage errors are returned as [`clap::Error`] so
    /// the caller decides how to exit.
    pub fn try_parse_from<I, T>(&mut self, args: I) -> Result<Parsed, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.sealed = true;
        let mut matches = self.app.clone().try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches_mut(&mut matches)?;

        let (name, sub_matches) = match matches.remove_subcommand() {
            Some(sub) => sub,
            None => {
                return Err(self
                    .app
                    .clone()
                    .error(clap::error::ErrorKind::MissingSubcommand, "a command is required"))
            }
        };

        Ok(Parsed {
            context: cli.context(),
            invocation: Invocation::new(name, sub_matches, self.app.clone()),
        })
    }

    /// Run the selected command's lifecycle.
    pub async fn dispatch(&self, parsed: &Parsed) -> Result<CommandOutput> {
        let ctx = &parsed.context;
        let invocation = &parsed.invocation;

        let command = match self
            .commands
            .iter()
            .find(|(name, _)| name == invocation.command())
        {
            Some((_, command)) => command,
            None => bail!(
                "unknown command '{}' (available: {})",
                invocation.command(),
                self.command_names().join(", ")
            ),
        };

        preflight(ctx)?;

        command.pre_action(ctx, invocation).await?;
        let result = command.action(ctx, invocation).await?;
        command.post_action(ctx, invocation, &result).await?;
        Ok(result)
    }
}

/// Checks run before every command.
fn preflight(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    if verbosity.is_debug() {
        output::debug("launch debug mode", verbosity);
        output::debug(
            format!("lv version {}", env!("CARGO_PKG_VERSION")),
            verbosity,
        );
    }
    check_libgit2(libgit2_version())?;
    output::debug(
        format!("libgit2 version {}", format_version(libgit2_version())),
        verbosity,
    );
    Ok(())
}

/// Reject libgit2 releases older than [`MIN_LIBGIT2_VERSION`].
pub fn check_libgit2(version: (u32, u32, u32)) -> Result<()> {
    if version < MIN_LIBGIT2_VERSION {
        bail!(
            "lv requires libgit2 {} or newer (found {})",
            format_version(MIN_LIBGIT2_VERSION),
            format_version(version)
        );
    }
    Ok(())
}

fn format_version((major, minor, patch): (u32, u32, u32)) -> String {
    format!("{}.{}.{}", major, minor, patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;

    use crate::engine::{CommandDescriptor, OptionSpec};

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recording {
        name: &'static str,
        description: &'static str,
        log: Log,
        fail_action: bool,
    }

    impl Recording {
        fn new(name: &'static str, log: &Log) -> Box<Self> {
            Box::new(Self {
                name,
                description: "records calls",
                log: Rc::clone(log),
                fail_action: false,
            })
        }
    }

    #[async_trait(?Send)]
    impl Command for Recording {
        fn descriptor(&self) -> Result<CommandDescriptor, CommandError> {
            CommandDescriptor::new(
                self.name,
                self.description,
                vec![OptionSpec::new("-m, --mode <mode>", "mode").default_value("fast")],
            )
        }

        async fn pre_action(&self, _ctx: &Context, inv: &Invocation) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("pre {}", inv.value("mode").unwrap_or("-")));
            Ok(())
        }

        async fn action(&self, _ctx: &Context, inv: &Invocation) -> Result<CommandOutput> {
            self.log
                .borrow_mut()
                .push(format!("action {}", inv.value("mode").unwrap_or("-")));
            if self.fail_action {
                bail!("action failed");
            }
            Ok(CommandOutput::Success)
        }

        async fn post_action(
            &self,
            _ctx: &Context,
            inv: &Invocation,
            _output: &CommandOutput,
        ) -> Result<()> {
            self.log
                .borrow_mut()
                .push(format!("post {}", inv.value("mode").unwrap_or("-")));
            Ok(())
        }
    }

    mod register {
        use super::*;

        #[test]
        fn adds_subcommand() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            dispatcher.register(Recording::new("demo", &log)).unwrap();
            assert_eq!(dispatcher.command_names(), vec!["demo"]);
            assert!(dispatcher.app().find_subcommand("demo").is_some());
        }

        #[test]
        fn contract_violation_registers_nothing() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            let mut bad = Recording::new("demo", &log);
            bad.description = "";
            let err = dispatcher.register(bad).unwrap_err();
            assert!(matches!(err, CommandError::ContractViolation { .. }));
            assert!(dispatcher.command_names().is_empty());
            assert!(dispatcher.app().find_subcommand("demo").is_none());
        }

        #[test]
        fn empty_name_is_contract_violation() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            let err = dispatcher.register(Recording::new("", &log)).unwrap_err();
            assert!(matches!(err, CommandError::ContractViolation { .. }));
        }

        #[test]
        fn duplicate_rejected() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            dispatcher.register(Recording::new("demo", &log)).unwrap();
            let err = dispatcher.register(Recording::new("demo", &log)).unwrap_err();
            assert_eq!(
                err,
                CommandError::DuplicateCommand {
                    name: "demo".to_string()
                }
            );
            assert_eq!(dispatcher.command_names().len(), 1);
        }

        #[test]
        fn sealed_dispatcher_rejects_registration() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            dispatcher.register(Recording::new("demo", &log)).unwrap();
            dispatcher.try_parse_from(["lv", "demo"]).unwrap();
            assert!(dispatcher.is_sealed());

            let err = dispatcher.register(Recording::new("late", &log)).unwrap_err();
            assert!(matches!(err, CommandError::InvalidDispatcher(_)));
            assert_eq!(dispatcher.command_names(), vec!["demo"]);
        }
    }

    mod parse {
        use super::*;

        #[test]
        fn global_flags_after_subcommand() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            dispatcher.register(Recording::new("demo", &log)).unwrap();
            let parsed = dispatcher
                .try_parse_from(["lv", "demo", "--debug", "--no-interactive"])
                .unwrap();
            assert!(parsed.context.debug);
            assert!(!parsed.context.interactive);
            assert_eq!(parsed.invocation.command(), "demo");
        }

        #[test]
        fn unknown_subcommand_is_error() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            dispatcher.register(Recording::new("demo", &log)).unwrap();
            let err = dispatcher.try_parse_from(["lv", "nope"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
        }

        #[test]
        fn missing_subcommand_shows_help() {
            let mut dispatcher = Dispatcher::new();
            let err = dispatcher.try_parse_from(["lv"]).unwrap_err();
            assert_eq!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }

    mod dispatch {
        use super::*;

        #[tokio::test]
        async fn hooks_wrap_action_with_same_arguments() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            dispatcher.register(Recording::new("demo", &log)).unwrap();
            let parsed = dispatcher
                .try_parse_from(["lv", "demo", "--mode", "slow"])
                .unwrap();

            let output = dispatcher.dispatch(&parsed).await.unwrap();

            assert_eq!(output, CommandOutput::Success);
            assert_eq!(
                *log.borrow(),
                vec!["pre slow", "action slow", "post slow"]
            );
        }

        #[tokio::test]
        async fn failed_action_skips_post() {
            let log = Log::default();
            let mut dispatcher = Dispatcher::new();
            let mut failing = Recording::new("demo", &log);
            failing.fail_action = true;
            dispatcher.register(failing).unwrap();
            let parsed = dispatcher.try_parse_from(["lv", "demo"]).unwrap();

            let err = dispatcher.dispatch(&parsed).await.unwrap_err();

            assert_eq!(err.to_string(), "action failed");
            assert_eq!(*log.borrow(), vec!["pre fast", "action fast"]);
        }

        #[tokio::test]
        async fn only_selected_command_runs() {
            let first = Log::default();
            let second = Log::default();
            let mut dispatcher = Dispatcher::new();
            dispatcher.register(Recording::new("one", &first)).unwrap();
            dispatcher.register(Recording::new("two", &second)).unwrap();
            let parsed = dispatcher.try_parse_from(["lv", "two"]).unwrap();

            dispatcher.dispatch(&parsed).await.unwrap();

            assert!(first.borrow().is_empty());
            assert_eq!(second.borrow().len(), 3);
        }
    }

    mod environment {
        use super::*;

        #[test]
        fn libgit2_minimum() {
            assert!(check_libgit2((1, 0, 0)).is_ok());
            assert!(check_libgit2((1, 9, 1)).is_ok());
            let err = check_libgit2((0, 28, 5)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "lv requires libgit2 1.0.0 or newer (found 0.28.5)"
            );
        }

        #[test]
        fn linked_libgit2_is_supported() {
            assert!(check_libgit2(libgit2_version()).is_ok());
        }
    }
}
