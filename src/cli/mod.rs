//! cli
//!
//! Command-line interface layer for lv.
//!
//! # Responsibilities
//!
//! - Define global flags ([`args`])
//! - Register subcommands and drive their lifecycle ([`dispatcher`])
//! - Provide the built-in commands ([`commands`])
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and hands the
//! selected command to the [`crate::engine`] lifecycle. Commands run on a
//! current-thread tokio runtime because the adapters are not `Send`.

pub mod args;
pub mod commands;
pub mod dispatcher;

pub use args::{Cli, Shell};
pub use dispatcher::{Dispatcher, Parsed};

use std::process::ExitCode;

use anyhow::{Context as _, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Usage, help and
/// version output exit the process directly with clap's own codes.
pub fn run() -> Result<ExitCode> {
    let mut dispatcher = Dispatcher::new();
    commands::register_builtin(&mut dispatcher)?;

    let parsed = match dispatcher.try_parse_from(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let output = runtime.block_on(dispatcher.dispatch(&parsed))?;
    Ok(ExitCode::from(output.exit_code()))
}
