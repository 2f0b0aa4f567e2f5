//! lint
//!
//! Static-analysis adapter.
//!
//! # Modules
//!
//! - [`traits`] - The [`Linter`] contract and [`LintReport`]
//! - [`process`] - [`ProcessLinter`], which runs a configured external tool
//! - [`mock`] - [`mock::MockLinter`] for tests
//!
//! # Design
//!
//! lv does not implement a linter. It hands a file list to one and treats
//! the tool-formatted output as opaque text: empty means the commit may
//! proceed, anything else blocks it.

pub mod mock;
pub mod process;
pub mod traits;

pub use process::ProcessLinter;
pub use traits::{LintError, LintReport, Linter};
