use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::{load_config, Config};
use commands::{CommandContext, CommandError};
use dispatch::{ConfiguredCommand, ConfiguredDispatch, StandaloneCommand, StandaloneDispatch};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "TABDECK_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    // Config and completions must work even with a broken config file
    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        let ctx = CommandContext::from_cli(cli, &Config::default());
        return dispatch.execute(&ctx);
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);

    match ConfiguredDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &config),
        None => Ok(()),
    }
}

/// Installs a stderr tracing subscriber.
///
/// `TABDECK_LOG` takes any `EnvFilter` directive; without it the level
/// follows `--verbose` / `--quiet`.
fn init_logging(cli: &Cli) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!cli.no_color);
    if let Err(e) = subscriber.try_init() {
        eprintln!("Failed to init tracing subscriber: {e}");
    }
}

fn default_log_level(cli: &Cli) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Source(_) => "SOURCE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) => 1,
        CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Source(_) => 4,
        CommandError::Config(_) => 5,
    }
}
