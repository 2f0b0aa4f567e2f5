//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts ([`prompts::Prompter`], [`prompts::TerminalPrompter`])
//! - [`output`] - Output formatting and display
//! - [`mock`] - Scripted prompter for tests
//!
//! # Design
//!
//! The UI module provides a consistent interface for user interaction.
//! All output and prompts go through this module to ensure consistent
//! formatting and proper handling of interactive vs non-interactive modes.

pub mod mock;
pub mod output;
pub mod prompts;
