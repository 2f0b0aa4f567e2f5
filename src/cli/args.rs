//! cli::args
//!
//! Global argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version` / `-V`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug` / `-d`: Enable debug logging
//! - `--no-interactive`: Disable prompts
//! - `--quiet` / `-q`: Minimal output
//!
//! Subcommands are not part of this struct. They are attached at runtime by
//! the [`Dispatcher`](super::dispatcher::Dispatcher) from each registered
//! command's descriptor.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::engine::Context;

/// lv - an extensible CLI with a lint-gated commit command
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lv")]
#[command(version, about, long_about = None)]
#[command(override_usage = "lv <command> [options]")]
pub struct Cli {
    /// Run as if lv was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,
}

impl Cli {
    /// Determine if interactive mode is enabled.
    ///
    /// Interactive unless `--no-interactive` or `--quiet` was given or
    /// stdin is not a terminal.
    pub fn interactive(&self) -> bool {
        !(self.no_interactive || self.quiet) && std::io::stdin().is_terminal()
    }

    /// Build the execution context from the parsed flags.
    pub fn context(&self) -> Context {
        Context {
            cwd: self.cwd.clone(),
            debug: self.debug,
            quiet: self.quiet,
            interactive: self.interactive(),
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}
