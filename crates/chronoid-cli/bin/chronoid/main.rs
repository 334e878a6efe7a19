mod cli;
mod run;

use crate::cli::CLI;
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUCCESS: u8 = 0;
const FAILURE: u8 = 1;

fn main() -> ExitCode {
    // stdout carries the identifiers, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    match execute(std::env::args_os(), &mut stdout, &mut stderr) {
        Ok(code) => ExitCode::from(code),
        // neither stream is writable, nothing left to report to
        Err(_) => ExitCode::FAILURE,
    }
}

/// Parses `args` and runs the command, returning the process exit status.
///
/// `--help` and `--version` go to `out` and succeed; every other argument
/// error and every failed command goes to `err` and exits with 1.
fn execute<I, T>(args: I, out: &mut impl Write, err: &mut impl Write) -> std::io::Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = match CLI::try_parse_from(args) {
        Ok(config) => config,
        Err(parse_err) if !parse_err.use_stderr() => {
            write!(out, "{}", parse_err.render())?;
            return Ok(SUCCESS);
        }
        Err(parse_err) => {
            write!(err, "{}", parse_err.render())?;
            return Ok(FAILURE);
        }
    };

    debug!(scheme = %config.scheme, epoch_ms = config.epoch_ms, "starting chronoid");

    match run::run(&config, out) {
        Ok(()) => Ok(SUCCESS),
        Err(run_err) => {
            writeln!(err, "error: {run_err:#}")?;
            Ok(FAILURE)
        }
    }
}
