//! sdpcal - SDP8x6 differential-pressure calibration

mod args;

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sdpcal_core::ProcessClock;
use tracing_subscriber::filter::LevelFilter;

use crate::args::Cli;

fn setup_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    // Also installs the `log` bridge, so records from the core reach stderr
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = cli.into_config();
    let clock = ProcessClock::new();

    sdpcal_core::run(&config, &clock, out).context("calibration run failed")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// Parse `args`, run, and map the outcome to a process exit status
fn exit_status<I, T, W>(args: I, out: &mut W) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let _ = e.print();
            return if e.use_stderr() { EXIT_FAILURE } else { EXIT_SUCCESS };
        }
    };
    setup_logging(cli.verbose);

    match run(cli, out) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_FAILURE
        }
    }
}

fn main() -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ExitCode::from(exit_status(std::env::args_os(), &mut out))
}
