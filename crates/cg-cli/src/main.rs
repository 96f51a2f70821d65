//! CLI frontend for the CyberGuard terminal CTF levels.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use cg_session::SessionConfig;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cyberguard",
    about = "CyberGuard: capture-the-flag training in a virtual terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the campaign in this terminal
    Play {
        /// Directory of generated `level_<N>.json` scenarios for levels 4 and up
        #[arg(short, long)]
        scenarios: Option<PathBuf>,

        /// Level to start on
        #[arg(long, default_value = "1")]
        start_level: u32,

        /// Pause after a solved level before the next one loads, in milliseconds
        #[arg(long, default_value = "1500")]
        advance_delay_ms: u64,

        /// Give up on a scenario source after this many seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// Validate a directory of generated scenario files
    Check {
        /// Directory containing `level_<N>.json` files
        dir: PathBuf,
    },

    /// Show the difficulty tiers of the campaign
    Levels,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            scenarios,
            start_level,
            advance_delay_ms,
            timeout_secs,
        } => {
            let config = SessionConfig::default()
                .with_start_level(start_level)
                .with_advance_delay(Duration::from_millis(advance_delay_ms))
                .with_provider_timeout(Duration::from_secs(timeout_secs));
            commands::play::run(scenarios.as_deref(), config)
        }
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Levels => commands::levels::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
