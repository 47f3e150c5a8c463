//! Shell completions generation.

use clap::{Args, CommandFactory};
use clap_complete::Shell;

/// Print shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> crate::error::Result<()> {
    let mut cmd = super::Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        super::super::Cli::command().debug_assert();
    }

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let mut cmd = super::super::Cli::command();
        let mut out = Vec::new();
        clap_complete::generate(Shell::Bash, &mut cmd, "msdf", &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("generate"));
        assert!(script.contains("validate"));
    }
}
