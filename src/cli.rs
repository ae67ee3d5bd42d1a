// SPDX-License-Identifier: MIT

//! Command surface: argument model and a single end-to-end run.

use crate::error::{Result, SumError};
use crate::input::{self, Fill};
use crate::reduce::{sequential_sum, Coordinator, Reduction};
use crate::timing::{self, TimingReport};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::io::Write;
use tracing::info;

/// Sums N pseudo-random bytes with K threads merging under a spinlock and
/// reports the elapsed time.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of elements to sum
    #[arg(value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub len: usize,

    /// Number of concurrent workers
    #[arg(value_name = "K", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub workers: usize,

    /// How the input array is filled
    #[arg(long, value_enum, env = "SPINSUM_FILL", default_value_t = Fill::Random)]
    pub fill: Fill,

    /// Seed for the random fill; drawn at startup and reported when absent
    #[arg(long, env = "SPINSUM_SEED")]
    pub seed: Option<u64>,

    /// Check the concurrent total against the expected total
    #[arg(long)]
    pub verify: bool,

    /// Print the computed total after the timing report
    #[arg(long)]
    pub print_total: bool,
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub reduction: Reduction<i64>,
    pub report: TimingReport,
    pub seed: u64,
}

/// Performs one full run and writes the report to `out`.
///
/// Arguments are validated before anything is allocated, and nothing is
/// written to `out` unless the reduction succeeds.
pub fn execute(args: &Args, out: &mut impl Write) -> Result<Outcome> {
    if args.len == 0 {
        return Err(SumError::InvalidArgument("N must be at least 1".into()));
    }
    let coordinator = Coordinator::for_len(args.len, args.workers)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        len = args.len,
        workers = args.workers,
        fill = ?args.fill,
        seed,
        "starting run"
    );
    let values = input::generate(args.len, args.fill, seed)?;

    let expected = if args.verify {
        Some(
            args.fill
                .expected_total(values.len())
                .unwrap_or_else(|| sequential_sum(&values)),
        )
    } else {
        None
    };

    let (reduction, elapsed) = timing::measure(|| coordinator.reduce(&values));
    let reduction = reduction?;
    let report = TimingReport::new(elapsed);

    if let Some(expected) = expected {
        if expected != reduction.total {
            return Err(SumError::VerificationMismatch {
                expected: expected.to_string(),
                actual: reduction.total.to_string(),
            });
        }
    }

    info!(
        elapsed_secs = report.elapsed().as_secs_f64(),
        total = reduction.total,
        "run complete"
    );

    let lines = ReportLines {
        report: &report,
        seed: (args.fill == Fill::Random).then_some(seed),
        total: args.print_total.then_some(reduction.total),
    };
    write_report(out, &lines).map_err(|err| SumError::Report(err.to_string()))?;

    Ok(Outcome {
        reduction,
        report,
        seed,
    })
}

/// Lines written to stdout after a successful run.
struct ReportLines<'a> {
    report: &'a TimingReport,
    /// Present for random fills so the input can be regenerated.
    seed: Option<u64>,
    total: Option<i64>,
}

fn write_report(out: &mut impl Write, lines: &ReportLines<'_>) -> std::io::Result<()> {
    writeln!(out, "{}", lines.report)?;
    if let Some(seed) = lines.seed {
        writeln!(out, "Seed: {seed}")?;
    }
    if let Some(total) = lines.total {
        writeln!(out, "Sum: {total}")?;
    }
    out.flush()
}
