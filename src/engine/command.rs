//! engine::command
//!
//! Command trait and descriptors for dispatcher integration.
//!
//! # Architecture
//!
//! Every subcommand implements [`Command`]. Registration with the
//! dispatcher is a separate, explicit step:
//!
//! 1. Build the command value. Construction has no side effects.
//! 2. Hand it to `Dispatcher::register`, which asks for its
//!    [`CommandDescriptor`], validates it, and wires its options into clap.
//! 3. When the subcommand is selected, the dispatcher calls
//!    [`Command::pre_action`], [`Command::action`] and
//!    [`Command::post_action`] in that order with the same [`Invocation`].
//!
//! # Invariants
//!
//! - A descriptor always has a non-empty name and description
//! - Every option pattern in a descriptor parses to a valid flag
//! - `action` is a required trait method, so a command without one does
//!   not compile
//!
//! # Example
//!
//! ```ignore
//! use lv_cli::engine::command::{Command, CommandDescriptor, CommandOutput, Invocation};
//! use lv_cli::engine::Context;
//!
//! struct Hello;
//!
//! #[async_trait::async_trait(?Send)]
//! impl Command for Hello {
//!     fn descriptor(&self) -> Result<CommandDescriptor, CommandError> {
//!         CommandDescriptor::new("hello", "Say hello", vec![])
//!     }
//!
//!     async fn action(&self, _ctx: &Context, _inv: &Invocation) -> anyhow::Result<CommandOutput> {
//!         println!("hello");
//!         Ok(CommandOutput::Success)
//!     }
//! }
//! ```

use std::collections::HashSet;

use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches};
use thiserror::Error;

use super::Context;

/// Errors from defining or registering a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command's descriptor breaks the command contract.
    #[error("command '{command}' violates the command contract: {reason}")]
    ContractViolation { command: String, reason: String },

    /// The dispatcher cannot accept the registration.
    #[error("invalid dispatcher: {0}")]
    InvalidDispatcher(String),

    /// A command with this name is already registered.
    #[error("command '{name}' is already registered")]
    DuplicateCommand { name: String },
}

impl CommandError {
    fn contract(command: &str, reason: impl Into<String>) -> Self {
        CommandError::ContractViolation {
            command: if command.is_empty() {
                "<unnamed>".to_string()
            } else {
                command.to_string()
            },
            reason: reason.into(),
        }
    }
}

/// How a command finished.
///
/// Failures are reported through `Err`; this only distinguishes a
/// completed action from one that stopped on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// The action completed.
    Success,
    /// The action stopped deliberately (for example a failing lint gate).
    Blocked { reason: String },
}

impl CommandOutput {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandOutput::Success => 0,
            CommandOutput::Blocked { .. } => 2,
        }
    }
}

/// The value a flag accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// A boolean switch with no value.
    Switch,
    /// `<name>`: a value must follow the flag.
    Required(String),
    /// `[name]`: the flag may appear without a value.
    Optional(String),
}

/// A parsed option pattern such as `-s, --shell <shell>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagPattern {
    pub short: Option<char>,
    pub long: String,
    pub value: FlagValue,
}

impl FlagPattern {
    /// Parse a flag pattern.
    ///
    /// A pattern has an optional single-character short flag, a required
    /// long flag, and optionally one `<required>` or `[optional]` value
    /// placeholder, separated by whitespace and/or commas.
    pub fn parse(pattern: &str) -> Result<Self, String> {
        let mut short = None;
        let mut long: Option<String> = None;
        let mut value = FlagValue::Switch;

        let tokens: Vec<&str> = pattern
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        for token in tokens {
            if value != FlagValue::Switch {
                return Err(format!("unexpected '{}' after value placeholder", token));
            }
            if let Some(name) = token.strip_prefix("--") {
                if long.is_some() {
                    return Err("more than one long flag".to_string());
                }
                if !is_flag_name(name) {
                    return Err(format!("invalid long flag '{}'", token));
                }
                long = Some(name.to_string());
            } else if let Some(name) = token.strip_prefix('-') {
                let mut chars = name.chars();
                let c = match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => c,
                    _ => return Err(format!("invalid short flag '{}'", token)),
                };
                if short.is_some() || long.is_some() {
                    return Err(format!("short flag '{}' must come first", token));
                }
                short = Some(c);
            } else if let Some(name) = placeholder(token, '<', '>') {
                value = FlagValue::Required(name);
            } else if let Some(name) = placeholder(token, '[', ']') {
                value = FlagValue::Optional(name);
            } else {
                return Err(format!("unrecognized token '{}'", token));
            }
        }

        let long = long.ok_or_else(|| "a long flag (--name) is required".to_string())?;
        Ok(Self { short, long, value })
    }
}

fn is_flag_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn placeholder(token: &str, open: char, close: char) -> Option<String> {
    let inner = token.strip_prefix(open)?.strip_suffix(close)?;
    if is_flag_name(inner) {
        Some(inner.to_string())
    } else {
        None
    }
}

/// A declared command option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pattern: String,
    help: String,
    default: Option<String>,
}

impl OptionSpec {
    pub fn new(pattern: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            help: help.into(),
            default: None,
        }
    }

    /// Set the value used when the flag is absent.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Build the clap argument for this option.
    ///
    /// The argument id is the long flag name.
    fn to_arg(&self, flag: &FlagPattern) -> Arg {
        let mut arg = Arg::new(flag.long.clone())
            .long(flag.long.clone())
            .help(self.help.clone());
        if let Some(c) = flag.short {
            arg = arg.short(c);
        }
        arg = match &flag.value {
            FlagValue::Switch => arg.action(ArgAction::SetTrue),
            FlagValue::Required(name) => arg
                .value_name(name.clone())
                .num_args(1)
                .action(ArgAction::Set),
            FlagValue::Optional(name) => arg
                .value_name(name.clone())
                .num_args(0..=1)
                .action(ArgAction::Set),
        };
        if let Some(default) = &self.default {
            arg = arg.default_value(default.clone());
        }
        arg
    }
}

/// A validated command identity: name, description and options.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    name: String,
    description: String,
    options: Vec<OptionSpec>,
    flags: Vec<FlagPattern>,
}

impl CommandDescriptor {
    /// Build and validate a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::ContractViolation`] if the name or
    /// description is empty, the name is not a single word, an option
    /// pattern is malformed, a switch declares a default, or two options
    /// share a flag.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<OptionSpec>,
    ) -> Result<Self, CommandError> {
        let name = name.into();
        let description = description.into();

        if name.trim().is_empty() {
            return Err(CommandError::contract(&name, "command name is required"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(CommandError::contract(
                &name,
                "command name must not contain whitespace",
            ));
        }
        if description.trim().is_empty() {
            return Err(CommandError::contract(&name, "description is required"));
        }

        let mut flags = Vec::with_capacity(options.len());
        let mut longs = HashSet::new();
        let mut shorts = HashSet::new();
        for option in &options {
            let flag = FlagPattern::parse(&option.pattern).map_err(|reason| {
                CommandError::contract(&name, format!("option '{}': {}", option.pattern, reason))
            })?;
            if flag.value == FlagValue::Switch && option.default.is_some() {
                return Err(CommandError::contract(
                    &name,
                    format!("option '{}': a switch cannot have a default", option.pattern),
                ));
            }
            if !longs.insert(flag.long.clone()) || flag.short.is_some_and(|c| !shorts.insert(c)) {
                return Err(CommandError::contract(
                    &name,
                    format!("option '{}' is declared twice", option.pattern),
                ));
            }
            flags.push(flag);
        }

        Ok(Self {
            name,
            description,
            options,
            flags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// The clap subcommand for this descriptor.
    pub fn to_clap(&self) -> clap::Command {
        self.options.iter().zip(&self.flags).fold(
            clap::Command::new(self.name.clone()).about(self.description.clone()),
            |cmd, (option, flag)| cmd.arg(option.to_arg(flag)),
        )
    }
}

/// Parsed arguments for one subcommand invocation.
///
/// Option values are looked up by their long flag name.
#[derive(Debug, Clone)]
pub struct Invocation {
    command: String,
    matches: ArgMatches,
    app: clap::Command,
}

impl Invocation {
    pub fn new(command: impl Into<String>, matches: ArgMatches, app: clap::Command) -> Self {
        Self {
            command: command.into(),
            matches,
            app,
        }
    }

    /// Name of the selected subcommand.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The raw clap matches for the subcommand.
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    /// The full application definition, including every registered command.
    pub fn app(&self) -> &clap::Command {
        &self.app
    }

    /// Value of a switch; `false` if absent or undeclared.
    pub fn flag(&self, long: &str) -> bool {
        matches!(self.matches.try_get_one::<bool>(long), Ok(Some(true)))
    }

    /// Value of a value option (or its default).
    pub fn value(&self, long: &str) -> Option<&str> {
        self.matches
            .try_get_one::<String>(long)
            .ok()
            .flatten()
            .map(String::as_str)
    }
}

/// A subcommand with a uniform lifecycle.
#[async_trait(?Send)]
pub trait Command {
    /// Identity and options. Must not have side effects.
    fn descriptor(&self) -> Result<CommandDescriptor, CommandError>;

    /// Runs immediately before [`Command::action`].
    async fn pre_action(&self, _ctx: &Context, _invocation: &Invocation) -> anyhow::Result<()> {
        Ok(())
    }

    /// The command body.
    async fn action(&self, ctx: &Context, invocation: &Invocation)
        -> anyhow::Result<CommandOutput>;

    /// Runs immediately after a successful [`Command::action`].
    async fn post_action(
        &self,
        _ctx: &Context,
        _invocation: &Invocation,
        _output: &CommandOutput,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod flag_pattern {
        use super::*;

        #[test]
        fn short_long_and_required_value() {
            let flag = FlagPattern::parse("-s, --shell <shell>").unwrap();
            assert_eq!(flag.short, Some('s'));
            assert_eq!(flag.long, "shell");
            assert_eq!(flag.value, FlagValue::Required("shell".to_string()));
        }

        #[test]
        fn long_only_switch() {
            let flag = FlagPattern::parse("--dry-run").unwrap();
            assert_eq!(flag.short, None);
            assert_eq!(flag.long, "dry-run");
            assert_eq!(flag.value, FlagValue::Switch);
        }

        #[test]
        fn optional_value() {
            let flag = FlagPattern::parse("-o --output [file]").unwrap();
            assert_eq!(flag.value, FlagValue::Optional("file".to_string()));
        }

        #[test]
        fn rejects_malformed() {
            for pattern in [
                "",
                "-s",
                "--",
                "-ab, --all",
                "--shell -s",
                "--a --b",
                "--shell <shell> extra",
                "--shell <>",
                "--shell shell",
                "-s, -t, --shell",
            ] {
                assert!(FlagPattern::parse(pattern).is_err(), "{pattern:?}");
            }
        }
    }

    mod descriptor {
        use super::*;

        #[test]
        fn valid_descriptor() {
            let d = CommandDescriptor::new(
                "completion",
                "Print shell completions",
                vec![OptionSpec::new("-s, --shell <shell>", "target shell").default_value("bash")],
            )
            .unwrap();
            assert_eq!(d.name(), "completion");
            assert_eq!(d.options().len(), 1);
            assert_eq!(d.options()[0].default(), Some("bash"));
        }

        #[test]
        fn empty_name_is_contract_violation() {
            let err = CommandDescriptor::new("", "does things", vec![]).unwrap_err();
            assert!(matches!(err, CommandError::ContractViolation { .. }));
            assert!(err.to_string().contains("<unnamed>"));
        }

        #[test]
        fn empty_description_is_contract_violation() {
            let err = CommandDescriptor::new("commit", "  ", vec![]).unwrap_err();
            assert_eq!(
                err,
                CommandError::ContractViolation {
                    command: "commit".to_string(),
                    reason: "description is required".to_string(),
                }
            );
        }

        #[test]
        fn name_with_space_rejected() {
            assert!(CommandDescriptor::new("do it", "x", vec![]).is_err());
        }

        #[test]
        fn malformed_option_rejected() {
            let err = CommandDescriptor::new("x", "y", vec![OptionSpec::new("shell", "h")])
                .unwrap_err();
            assert!(err.to_string().contains("option 'shell'"));
        }

        #[test]
        fn switch_with_default_rejected() {
            let err = CommandDescriptor::new(
                "x",
                "y",
                vec![OptionSpec::new("--force", "h").default_value("true")],
            )
            .unwrap_err();
            assert!(err.to_string().contains("cannot have a default"));
        }

        #[test]
        fn duplicate_flags_rejected() {
            let long = CommandDescriptor::new(
                "x",
                "y",
                vec![OptionSpec::new("--a", "h"), OptionSpec::new("--a", "h")],
            );
            assert!(long.is_err());

            let short = CommandDescriptor::new(
                "x",
                "y",
                vec![OptionSpec::new("-a --all", "h"), OptionSpec::new("-a --any", "h")],
            );
            assert!(short.is_err());
        }
    }

    mod invocation {
        use super::*;

        fn parse(args: &[&str]) -> Invocation {
            let descriptor = CommandDescriptor::new(
                "demo",
                "Demo command",
                vec![
                    OptionSpec::new("-s, --shell <shell>", "shell").default_value("bash"),
                    OptionSpec::new("--force", "force it"),
                    OptionSpec::new("--out [file]", "output"),
                ],
            )
            .unwrap();
            let app = descriptor.to_clap();
            let matches = app
                .clone()
                .try_get_matches_from(std::iter::once("demo").chain(args.iter().copied()))
                .unwrap();
            Invocation::new("demo", matches, app)
        }

        #[test]
        fn defaults_apply() {
            let inv = parse(&[]);
            assert_eq!(inv.value("shell"), Some("bash"));
            assert!(!inv.flag("force"));
            assert_eq!(inv.value("out"), None);
        }

        #[test]
        fn explicit_values() {
            let inv = parse(&["-s", "zsh", "--force", "--out", "x.txt"]);
            assert_eq!(inv.value("shell"), Some("zsh"));
            assert!(inv.flag("force"));
            assert_eq!(inv.value("out"), Some("x.txt"));
            assert_eq!(inv.command(), "demo");
        }

        #[test]
        fn unknown_ids_are_absent() {
            let inv = parse(&[]);
            assert!(!inv.flag("nope"));
            assert_eq!(inv.value("nope"), None);
        }
    }

    mod output {
        use super::*;

        #[test]
        fn exit_codes() {
            assert_eq!(CommandOutput::Success.exit_code(), 0);
            let blocked = CommandOutput::Blocked {
                reason: "lint".to_string(),
            };
            assert_eq!(blocked.exit_code(), 2);
        }
    }
}
