mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::PartialProjectConfig;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("SorpPropLib CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let mut project = PartialProjectConfig::locate(cli.config.as_deref())?;
    project.apply_set_values(&cli.set_values)?;

    let result = match cli.command {
        Commands::Build(args) => {
            info!("Dispatching to 'build' command.");
            commands::build::run(args, &project)
        }
        Commands::Manual(args) => {
            info!("Dispatching to 'manual' command.");
            commands::manual::run(args, &project)
        }
        Commands::Content(args) => {
            info!("Dispatching to 'content' command.");
            commands::content::run(args, &project)
        }
        Commands::Calc(args) => {
            info!("Dispatching to 'calc' command.");
            commands::calc::run(args, &project)
        }
        Commands::Invert(args) => {
            info!("Dispatching to 'invert' command.");
            commands::invert::run(args, &project)
        }
    };

    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
