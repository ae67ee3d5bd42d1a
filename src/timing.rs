// SPDX-License-Identifier: MIT

//! Elapsed-time measurement and the report line external drivers scrape.
//!
//! A driver finds [`LABEL`] in standard output and reads exactly
//! [`FIELD_WIDTH`] characters after it as a decimal number of seconds. Both
//! constants are part of that contract.

use std::fmt;
use std::time::{Duration, Instant};

/// Literal label preceding the elapsed-time field.
pub const LABEL: &str = "CPU time spent: ";

/// Width in characters of the elapsed-time field.
pub const FIELD_WIDTH: usize = 8;

/// Decimal places used while the integer part is a single digit.
pub const MAX_PRECISION: usize = 6;

/// Runs `f` and returns its result together with the wall-clock time it took.
///
/// Only `f` is measured; anything the caller does before or after is not.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start_time = Instant::now();
    let value = f();
    (value, start_time.elapsed())
}

/// Elapsed time of one run, printable in the fixed report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingReport {
    elapsed: Duration,
}

impl TimingReport {
    pub fn new(elapsed: Duration) -> Self {
        TimingReport { elapsed }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LABEL}{}", format_seconds(self.elapsed.as_secs_f64()))
    }
}

/// Formats `seconds` right-aligned in exactly [`FIELD_WIDTH`] characters.
///
/// Uses [`MAX_PRECISION`] decimals below ten seconds and gives up one decimal
/// per extra integer digit, so the field keeps its width up to 10^8 seconds.
pub fn format_seconds(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mut precision = MAX_PRECISION;
    loop {
        let field = format!(
            "{:>width$.precision$}",
            seconds,
            width = FIELD_WIDTH,
            precision = precision
        );
        if field.len() <= FIELD_WIDTH || precision == 0 {
            return field;
        }
        precision -= 1;
    }
}

/// Parses the field following [`LABEL`] out of captured output, the way an
/// external driver does.
pub fn parse_report(output: &str) -> Option<f64> {
    let start = output.find(LABEL)? + LABEL.len();
    let field = output.get(start..start + FIELD_WIDTH)?;
    field.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_second_uses_six_decimals() {
        assert_eq!(format_seconds(0.0123456), "0.012346");
        assert_eq!(format_seconds(0.0), "0.000000");
    }

    #[test]
    fn test_field_width_is_fixed() {
        for seconds in [0.5, 9.25, 9.9999999, 12.5, 345.678, 98765.4321, 1234567.0] {
            assert_eq!(format_seconds(seconds).len(), FIELD_WIDTH, "{seconds}");
        }
        assert_eq!(format_seconds(12.5), "12.50000");
        assert_eq!(format_seconds(9.9999999), "10.00000");
        assert_eq!(format_seconds(1234567.0), " 1234567");
    }

    #[test]
    fn test_report_line() {
        let report = TimingReport::new(Duration::from_micros(1_500_250));
        assert_eq!(report.to_string(), "CPU time spent: 1.500250");
    }

    #[test]
    fn test_parse_report_reads_fixed_field() {
        let output = "Sum: 42\nCPU time spent: 0.250000\n";
        assert_eq!(parse_report(output), Some(0.25));
        assert_eq!(parse_report("no timing here"), None);
    }

    #[test]
    fn test_measure_returns_value() {
        let (value, elapsed) = measure(|| 40 + 2);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(1));
    }
}
