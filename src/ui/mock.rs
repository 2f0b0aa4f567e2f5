//! ui::mock
//!
//! Scripted prompter for deterministic testing.
//!
//! # Example
//!
//! ```
//! use lv_cli::ui::mock::{MockPrompter, PromptCall};
//! use lv_cli::ui::prompts::Prompter;
//!
//! # tokio_test::block_on(async {
//! let prompter = MockPrompter::new().select_answer(1).input_answer("null check");
//! let choices = vec!["feat".to_string(), "fix".to_string()];
//!
//! assert_eq!(prompter.select("type", &choices, 0).await.unwrap(), 1);
//! assert_eq!(prompter.input("message").await.unwrap(), "null check");
//! assert_eq!(prompter.calls().len(), 2);
//! # });
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::prompts::{PromptError, Prompter};

/// A prompt the mock was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Select { message: String, default: usize },
    Input { message: String },
}

/// Prompter that replays scripted answers.
///
/// When a script runs dry the prompt is answered with
/// [`PromptError::Cancelled`], the same as EOF on a terminal.
#[derive(Debug, Clone, Default)]
pub struct MockPrompter {
    inner: Arc<Mutex<MockPrompterInner>>,
}

#[derive(Debug, Default)]
struct MockPrompterInner {
    selections: VecDeque<usize>,
    inputs: VecDeque<String>,
    non_interactive: bool,
    calls: Vec<PromptCall>,
}

impl MockPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompter that behaves as if `--no-interactive` were set.
    pub fn non_interactive() -> Self {
        let prompter = Self::new();
        prompter.lock().non_interactive = true;
        prompter
    }

    /// Queue an answer for the next `select`.
    pub fn select_answer(self, index: usize) -> Self {
        self.lock().selections.push_back(index);
        self
    }

    /// Queue an answer for the next `input`.
    pub fn input_answer(self, text: impl Into<String>) -> Self {
        self.lock().inputs.push_back(text.into());
        self
    }

    /// Prompts shown so far, in order.
    pub fn calls(&self) -> Vec<PromptCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockPrompterInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait(?Send)]
impl Prompter for MockPrompter {
    async fn select(
        &self,
        message: &str,
        choices: &[String],
        default: usize,
    ) -> Result<usize, PromptError> {
        let mut inner = self.lock();
        inner.calls.push(PromptCall::Select {
            message: message.to_string(),
            default,
        });
        if inner.non_interactive {
            return Err(PromptError::NotInteractive);
        }
        let index = inner.selections.pop_front().ok_or(PromptError::Cancelled)?;
        if index >= choices.len() {
            return Err(PromptError::IoError(format!(
                "scripted selection {} out of range",
                index
            )));
        }
        Ok(index)
    }

    async fn input(&self, message: &str) -> Result<String, PromptError> {
        let mut inner = self.lock();
        inner.calls.push(PromptCall::Input {
            message: message.to_string(),
        });
        if inner.non_interactive {
            return Err(PromptError::NotInteractive);
        }
        inner.inputs.pop_front().ok_or(PromptError::Cancelled)
    }
}
