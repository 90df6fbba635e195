//! campusnavi CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use campusnavi_client::cli::{Cli, Command, ConfigAction};
use campusnavi_client::commands;
use campusnavi_client::config::ClientConfig;
use campusnavi_client::error::{ClientError, ClientResult};
use campusnavi_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(TracingConfig::cli(cli.debug || config.debug)) {
        eprintln!("warning: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            if e.suggests_relink() {
                eprintln!(
                    "hint: copy a fresh calendar export URL from LearnUs and run `campusnavi link <url>`"
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => ClientConfig::load().map_err(ClientError::Config),
    }
}

async fn run(cli: Cli, config: ClientConfig) -> ClientResult<()> {
    let mut stdout = io::stdout();

    match cli.command {
        Some(Command::Link { url }) => commands::link::link(&url, &config).await,
        Some(Command::Unlink) => commands::link::unlink(&config),
        Some(Command::Schedule(args)) => commands::schedule::schedule(&config, args).await,
        Some(Command::Personas) => commands::persona::list(&mut stdout),
        Some(Command::Persona { id }) => commands::persona::show(&id, &mut stdout),
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &mut stdout),
            ConfigAction::Validate => commands::config::validate(&config, &mut stdout),
            ConfigAction::Path => commands::config::path(&mut stdout),
        },
        None => {
            println!("campusnavi - Your LMS deadlines, ready for planning");
            println!();
            println!("Run 'campusnavi --help' for usage information.");
            println!();
            println!("Quick start:");
            println!("  1. Link your account: campusnavi link '<LearnUs calendar export URL>'");
            println!("  2. Review your schedule: campusnavi schedule --review");
            println!("  3. Build a study plan prompt: campusnavi schedule --prompt");
            Ok(())
        }
    }
}
