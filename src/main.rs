// SPDX-License-Identifier: MIT

use clap::Parser;
use spinsum::cli::{self, Args};
use spinsum::telemetry::init_tracing;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli::execute(&args, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("spinsum: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
