//! lv - an extensible CLI with a lint-gated commit command
//!
//! lv is a small command framework plus one concrete workflow: collect the
//! pending changes in a Git working tree, run a linter over them, and only
//! when the linter reports nothing, ask for a conventional-commit type and
//! message, then stage everything and commit.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Global flags, the dispatcher and the built-in commands
//! - [`engine`] - The `Command` lifecycle and the commit workflow state machine
//! - [`core`] - Domain types, configuration, paths and the repository lock
//! - [`git`] - Single interface for all Git operations
//! - [`lint`] - Static-analysis adapter
//! - [`ui`] - Output and prompts
//!
//! # Invariants
//!
//! 1. A non-empty lint report means nothing is staged or committed
//! 2. Renamed files are always tracked by their destination path
//! 3. A commit is only recorded after every status set staged cleanly
//! 4. Commands are registered before arguments are parsed

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod lint;
pub mod ui;
