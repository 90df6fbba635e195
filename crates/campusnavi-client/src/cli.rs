//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// campusnavi - Your LMS deadlines, ready for planning
#[derive(Debug, Parser)]
#[command(name = "campusnavi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CAMPUSNAVI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Link a LearnUs account from its calendar export URL
    Link {
        /// Export URL containing `userid` and `authtoken` (supports `env::` and `pass::`)
        url: String,
    },

    /// Forget the linked account
    Unlink,

    /// Fetch and show the linked account's schedule
    Schedule(ScheduleArgs),

    /// List the assistant personas
    Personas,

    /// Print a persona's system prompt
    Persona {
        /// Persona id (general, planner, menu, email, idea, local)
        id: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Output options for `schedule`.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ScheduleArgs {
    /// Output in JSON format
    #[arg(long, conflicts_with = "prompt")]
    pub json: bool,

    /// Ask for course codes the titles did not contain
    #[arg(long)]
    pub review: bool,

    /// Print the planner message for the language model
    #[arg(long)]
    pub prompt: bool,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the current configuration
    Dump,
    /// Validate the configuration file
    Validate,
    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_link() {
        let cli = Cli::try_parse_from(["campusnavi", "link", "env::LEARNUS_URL"]).unwrap();
        match cli.command {
            Some(Command::Link { url }) => assert_eq!(url, "env::LEARNUS_URL"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_schedule_flags() {
        let cli = Cli::try_parse_from(["campusnavi", "-v", "schedule", "--review", "--prompt"]).unwrap();
        assert!(cli.debug);
        match cli.command {
            Some(Command::Schedule(args)) => {
                assert!(args.review);
                assert!(args.prompt);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn json_and_prompt_conflict() {
        assert!(Cli::try_parse_from(["campusnavi", "schedule", "--json", "--prompt"]).is_err());
    }

    #[test]
    fn parses_config_action() {
        let cli = Cli::try_parse_from(["campusnavi", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }
}
