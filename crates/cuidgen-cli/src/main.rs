//! `cuidgen`: generate and check CUID2-style identifiers from the shell.

mod cli;

use clap::Parser;
use cli::commands::{check, generate};
use cli::config::{CliArgs, RunConfig};
use cli::telemetry::init_telemetry;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = RunConfig::try_from(args)?;

    init_telemetry()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let code = match config {
        RunConfig::New(config) => {
            generate(&config, &mut out)?;
            ExitCode::SUCCESS
        }
        RunConfig::Check(config) => {
            if check(&config, &mut out)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };
    out.flush()?;
    Ok(code)
}
