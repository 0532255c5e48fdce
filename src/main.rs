//! cueplay - synchronized-start video playlist player

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use cueplay::cli::{Cli, Commands};
use cueplay::logging::{self, LogTarget};
use cueplay::Config;

fn main() {
    let cli = Cli::parse();

    let log_target = match &cli.command {
        Commands::Play(_) => logging::default_log_path()
            .map(LogTarget::File)
            .unwrap_or(LogTarget::Stderr),
        _ => LogTarget::Stderr,
    };
    logging::init(log_target);
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        git_sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        built = env!("CUEPLAY_BUILD_DATE"),
        "starting cueplay"
    );

    if let Err(err) = run(cli) {
        eprintln!(
            "{}",
            cueplay::current_theme().error_text(&format!("Error: {:#}", err))
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Play(args) => commands::play::handle(&args, &config),
        Commands::Offset(args) => commands::offset::handle(&args, &config),
        Commands::List(args) => commands::list::handle(&args, &config),
        Commands::Config(command) => commands::config::handle(&command, &config),
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
