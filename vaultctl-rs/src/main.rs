//! vaultctl CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use vaultctl::cli::args::{Cli, Commands};
use vaultctl::cli::output::Output;
use vaultctl::cli::{init, list, mount};
use vaultctl::config::Config;
use vaultctl::error::{VaultError, exit_code};
use vaultctl::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keep the handle alive so buffered records are flushed on exit.
    let _logger = match init_logging(cli.verbose, cli.quiet) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), VaultError> {
    let config = Config::load(cli.config.as_deref())?;
    log::debug!("vault_root={}", config.vault_root.display());

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Init(args) => init::run(&config, args, &output)?,
        Commands::Mount(args) => mount::mount(&config, args, &output)?,
        Commands::Unmount(args) => mount::unmount(&config, args, &output)?,
        Commands::List(args) => list::run(&config, args, &output)?,
    }
    Ok(())
}
