// uetools-cli/src/cli.rs
//
// Defines the top-level command-line surface using clap.
//
// Only the global flags are parsed here. The command name and its raw
// tokens are handed to the core dispatcher, which binds them against the
// command's own argument schema.

use clap::{ArgAction, Parser, Subcommand};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "uecli",
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "uecli: Unreal Engine project automation",
    long_about = "Launches the editor and game clients with formatted logs and publishes packaged builds to a generic package registry.",
    after_help = "Run `uecli <COMMAND> --help` for the arguments of a command.",
    allow_external_subcommands = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Disable upload progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Prefix process output lines with the local time
    #[arg(long)]
    pub timestamps: bool,

    #[command(subcommand)]
    pub command: Option<CommandLine>,
}

/// A command name followed by its unparsed arguments.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    #[command(external_subcommand)]
    Run(Vec<String>),
}

impl Cli {
    /// The requested command name and the tokens that follow it.
    pub fn requested_command(&self) -> Option<(&str, &[String])> {
        match &self.command {
            Some(CommandLine::Run(tokens)) => tokens
                .split_first()
                .map(|(name, rest)| (name.as_str(), rest)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_precede_command() {
        let cli = Cli::parse_from(["uecli", "-vv", "--no-color", "client", "RTSGame", "--port", "9000"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert!(!cli.no_progress);
        let (name, tokens) = cli.requested_command().unwrap();
        assert_eq!(name, "client");
        assert_eq!(tokens, ["RTSGame", "--port", "9000"]);
    }

    #[test]
    fn command_help_is_passed_through() {
        let cli = Cli::parse_from(["uecli", "publish", "--help"]);
        let (name, tokens) = cli.requested_command().unwrap();
        assert_eq!(name, "publish");
        assert_eq!(tokens, ["--help"]);
    }

    #[test]
    fn no_command_is_allowed_at_parse_time() {
        let cli = Cli::parse_from(["uecli", "--no-progress"]);
        assert!(cli.requested_command().is_none());
        assert!(cli.no_progress);
    }
}
