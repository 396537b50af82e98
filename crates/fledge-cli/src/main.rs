//! # Fledge CLI
//!
//! Build, install, tag and scaffold Flutter projects.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, parse CLI arguments (clap handles `--help` / `--version`).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults, files, env).
//! 4. Build the [`OutputManager`] and install the Ctrl-C handler.
//! 5. Dispatch to the command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Success (including a declined tag prompt) |
//! |  1   | Failed external step / internal error     |
//! |  2   | User / input error                        |
//! |  3   | Resource not found                        |
//! |  4   | Configuration error                       |
//! | 130  | Interrupted                               |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

const INTERRUPTED_EXIT: i32 = 130;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too.
            let _ = e.print();
            return ExitCode::from(e.exit_code().clamp(0, 255) as u8);
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, cli.global.verbose > 0);
        }
    };

    let output = OutputManager::new(&cli.global, &config);

    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("\nProcess interrupted. Exiting...");
        std::process::exit(INTERRUPTED_EXIT);
    }) {
        debug!(error = %e, "Could not install Ctrl-C handler");
    }

    let verbose = cli.global.verbose > 0;
    match run(cli.command, &config, &output) {
        Ok(()) => {
            info!("Fledge completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

#[instrument(skip_all)]
fn run(command: Commands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match command {
        Commands::Uninstall => {
            commands::timed(output, || commands::install::uninstall(config, output))
        }
        Commands::Tag(args) => commands::timed(output, || commands::tag::execute(args, config, output)),
        Commands::Page(args) => {
            commands::timed(output, || commands::page::execute(args, config, output))
        }
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
        build => {
            let recipe = build.recipe().ok_or_else(|| CliError::InvalidInput {
                message: format!("{build:?} is not a build command"),
                source: None,
            })?;
            commands::timed(output, || commands::build::execute(recipe, config, output))
        }
    }
}

/// Log, print and map an error to its exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
