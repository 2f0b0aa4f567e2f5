//! cli::commands
//!
//! Built-in command implementations.
//!
//! # Architecture
//!
//! Each command implements [`crate::engine::Command`]:
//! 1. `descriptor()` declares its name, description and options
//! 2. `action()` opens the adapters it needs and drives the engine
//! 3. Output goes through [`crate::ui::output`]
//!
//! New commands are added to [`builtin`] and picked up by the dispatcher.

mod commit;
mod completion;

pub use commit::CommitCommand;
pub use completion::{completion, CompletionCommand};

use crate::engine::{Command, CommandError};

use super::dispatcher::Dispatcher;

/// Every built-in command, in registration order.
pub fn builtin() -> Vec<Box<dyn Command>> {
    vec![Box::new(CommitCommand), Box::new(CompletionCommand)]
}

/// Register all built-in commands.
pub fn register_builtin(dispatcher: &mut Dispatcher) -> Result<(), CommandError> {
    builtin()
        .into_iter()
        .try_for_each(|command| dispatcher.register(command))
}
