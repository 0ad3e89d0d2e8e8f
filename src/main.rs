//! Hatecheck - hate-speech detection CLI
//!
//! Preprocesses noisy code-mixed Hinglish/English text, classifies it, and
//! meters predictions per registered user.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use hatecheck_core::error::HatecheckError;
use hatecheck_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return reject_arguments(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "arguments parsed");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&cli, &e),
    }
}

/// Print a command failure in the requested format and pick the exit status
fn report(cli: &Cli, error: &HatecheckError) -> ExitCode {
    match cli.format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
    exit_status(error)
}

/// Handle an argument error from clap.
///
/// No `Cli` exists yet, so a JSON envelope is only produced when the raw
/// arguments ask for `--format json`. Help and version always print normally.
fn reject_arguments(err: clap::Error) -> ExitCode {
    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    if informational || !json_requested(env::args().skip(1)) {
        err.exit();
    }

    let error = usage_error(&err);
    eprintln!("{}", error.to_json());
    exit_status(&error)
}

fn usage_error(err: &clap::Error) -> HatecheckError {
    match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => HatecheckError::UsageError(err.to_string()),
        _ => HatecheckError::Other(err.to_string()),
    }
}

fn exit_status(error: &HatecheckError) -> ExitCode {
    ExitCode::from(error.exit_code() as u8)
}

/// True when the arguments contain `--format json` or `--format=json`
fn json_requested<I>(args: I) -> bool
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let value = match arg.strip_prefix("--format") {
            Some("") => args.next(),
            Some(rest) => rest.strip_prefix('=').map(str::to_string),
            None => continue,
        };
        if value.as_deref() == Some("json") {
            return true;
        }
    }
    false
}
