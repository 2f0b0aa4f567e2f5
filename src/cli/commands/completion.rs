//! completion command - Generate shell completion scripts

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::ValueEnum;
use clap_complete::{generate, shells};

use crate::cli::args::Shell;
use crate::engine::{
    Command, CommandDescriptor, CommandError, CommandOutput, Context, Invocation, OptionSpec,
};

/// `lv completion --shell <shell>`
#[derive(Debug, Default, Clone, Copy)]
pub struct CompletionCommand;

#[async_trait(?Send)]
impl Command for CompletionCommand {
    fn descriptor(&self) -> Result<CommandDescriptor, CommandError> {
        CommandDescriptor::new(
            "completion",
            "Generate shell completion scripts",
            vec![OptionSpec::new(
                "-s, --shell <shell>",
                "Target shell (bash, zsh, fish, powershell, elvish)",
            )
            .default_value("bash")],
        )
    }

    async fn action(&self, _ctx: &Context, invocation: &Invocation) -> Result<CommandOutput> {
        let name = invocation.value("shell").unwrap_or("bash");
        let shell = Shell::from_str(name, true).map_err(|_| anyhow!("unsupported shell '{}'", name))?;
        let mut cmd = invocation.app().clone();
        completion(shell, &mut cmd, &mut std::io::stdout());
        Ok(CommandOutput::Success)
    }
}

/// Write the completion script for `shell` to `out`.
pub fn completion(shell: Shell, cmd: &mut clap::Command, out: &mut dyn std::io::Write) {
    let name = cmd.get_name().to_string();

    match shell {
        Shell::Bash => generate(shells::Bash, cmd, &name, out),
        Shell::Zsh => generate(shells::Zsh, cmd, &name, out),
        Shell::Fish => generate(shells::Fish, cmd, &name, out),
        Shell::PowerShell => generate(shells::PowerShell, cmd, &name, out),
        Shell::Elvish => generate(shells::Elvish, cmd, &name, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::dispatcher::Dispatcher;

    fn app() -> clap::Command {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Box::new(CompletionCommand)).unwrap();
        dispatcher.app().clone()
    }

    #[test]
    fn descriptor_is_valid() {
        let descriptor = CompletionCommand.descriptor().unwrap();
        assert_eq!(descriptor.name(), "completion");
        assert_eq!(descriptor.options()[0].default(), Some("bash"));
    }

    #[test]
    fn bash_script_mentions_binary_and_subcommand() {
        let mut out = Vec::new();
        completion(Shell::Bash, &mut app(), &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("lv"));
        assert!(script.contains("completion"));
    }

    #[test]
    fn every_shell_generates_output() {
        for shell in Shell::value_variants() {
            let mut out = Vec::new();
            completion(*shell, &mut app(), &mut out);
            assert!(!out.is_empty(), "{shell:?}");
        }
    }

    #[tokio::test]
    async fn unknown_shell_is_error() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(Box::new(CompletionCommand)).unwrap();
        let parsed = dispatcher
            .try_parse_from(["lv", "completion", "--shell", "tcsh"])
            .unwrap();
        let err = CompletionCommand
            .action(&parsed.context, &parsed.invocation)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported shell 'tcsh'");
    }
}
