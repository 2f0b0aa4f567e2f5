//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! every prompt fails with [`PromptError::NotInteractive`] so a scripted
//! invocation never blocks on stdin.
//!
//! The commit workflow depends on the [`Prompter`] trait. The terminal
//! implementation reads line-oriented answers from any async buffered
//! reader, which is stdin in production and a byte slice in tests.
//! Prompt text is written to stderr so stdout carries only results.

use std::io::Write;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Errors from prompts.
#[derive(Debug, Clone, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Single-choice and free-text prompting.
#[async_trait(?Send)]
pub trait Prompter {
    /// Ask the user to pick one of `choices`. Returns the chosen index.
    ///
    /// `default` is the index selected when the user just presses enter.
    async fn select(
        &self,
        message: &str,
        choices: &[String],
        default: usize,
    ) -> Result<usize, PromptError>;

    /// Ask the user for a non-empty line of text.
    async fn input(&self, message: &str) -> Result<String, PromptError>;
}

/// Prompter backed by a terminal.
pub struct TerminalPrompter<R = BufReader<Stdin>> {
    interactive: bool,
    reader: Mutex<R>,
}

impl TerminalPrompter {
    /// A prompter reading answers from stdin.
    pub fn stdin(interactive: bool) -> Self {
        Self::with_reader(BufReader::new(tokio::io::stdin()), interactive)
    }
}

impl<R: AsyncBufRead + Unpin> TerminalPrompter<R> {
    /// A prompter reading answers from `reader`.
    pub fn with_reader(reader: R, interactive: bool) -> Self {
        Self {
            interactive,
            reader: Mutex::new(reader),
        }
    }

    fn ensure_interactive(&self) -> Result<(), PromptError> {
        if self.interactive {
            Ok(())
        } else {
            Err(PromptError::NotInteractive)
        }
    }

    /// Read one line with the trailing newline removed. EOF is a cancel.
    async fn read_line(&self) -> Result<String, PromptError> {
        let mut line = String::new();
        let read = self
            .reader
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| PromptError::IoError(e.to_string()))?;
        if read == 0 {
            return Err(PromptError::Cancelled);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

fn show(text: &str) -> Result<(), PromptError> {
    let mut stderr = std::io::stderr();
    stderr
        .write_all(text.as_bytes())
        .and_then(|_| stderr.flush())
        .map_err(|e| PromptError::IoError(e.to_string()))
}

/// Interpret a menu answer.
///
/// Accepts a 1-based number, or the text before the first `:` of a choice
/// (so `fix` picks `fix: A bug fix`). An empty answer picks `default`.
fn parse_choice(answer: &str, choices: &[String], default: usize) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(default);
    }
    if let Ok(n) = answer.parse::<usize>() {
        return (1..=choices.len()).contains(&n).then(|| n - 1);
    }
    choices.iter().position(|choice| {
        let key = choice.split(':').next().unwrap_or(choice).trim();
        key.eq_ignore_ascii_case(answer)
    })
}

#[async_trait(?Send)]
impl<R: AsyncBufRead + Unpin> Prompter for TerminalPrompter<R> {
    async fn select(
        &self,
        message: &str,
        choices: &[String],
        default: usize,
    ) -> Result<usize, PromptError> {
        self.ensure_interactive()?;
        if choices.is_empty() {
            return Err(PromptError::IoError("no choices to select from".into()));
        }
        let default = default.min(choices.len() - 1);

        let mut menu = format!("? {}\n", message);
        for (i, choice) in choices.iter().enumerate() {
            let marker = if i == default { ">" } else { " " };
            menu.push_str(&format!("{} {:>2}) {}\n", marker, i + 1, choice));
        }
        show(&menu)?;

        loop {
            show(&format!("  answer [{}]: ", default + 1))?;
            let answer = self.read_line().await?;
            match parse_choice(&answer, choices, default) {
                Some(index) => return Ok(index),
                None => show(&format!(
                    "  please enter a number between 1 and {}\n",
                    choices.len()
                ))?,
            }
        }
    }

    async fn input(&self, message: &str) -> Result<String, PromptError> {
        self.ensure_interactive()?;
        loop {
            show(&format!("? {} ", message))?;
            let answer = self.read_line().await?;
            if !answer.trim().is_empty() {
                return Ok(answer);
            }
            show("  a value is required\n")?;
        }
    }
}
