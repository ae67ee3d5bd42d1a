// SPDX-License-Identifier: MIT

//! Deterministic generation of the input array.

use crate::error::{Result, SumError};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest value a generated element takes.
pub const MIN_VALUE: i8 = -100;
/// Largest value a generated element takes.
pub const MAX_VALUE: i8 = 100;

/// Number of distinct values in `MIN_VALUE..=MAX_VALUE`.
const CYCLE: usize = (MAX_VALUE as i16 - MIN_VALUE as i16 + 1) as usize;

/// How the input array is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Fill {
    /// Every element is 1.
    Ones,
    /// Element `i` is `(i mod 201) - 100`.
    Cyclic,
    /// Uniform in `[-100, 100]`, reproducible from the seed.
    Random,
}

impl Fill {
    /// Closed-form total of `len` elements, when one exists.
    pub fn expected_total(self, len: usize) -> Option<i64> {
        match self {
            Fill::Ones => Some(len as i64),
            Fill::Cyclic => {
                // Each full cycle sums to zero.
                let tail = (len % CYCLE) as i64;
                Some(tail * (tail - 1) / 2 + tail * MIN_VALUE as i64)
            }
            Fill::Random => None,
        }
    }
}

/// Allocates and fills an array of `len` elements.
///
/// # Errors
/// `Allocation` if the array cannot be reserved.
pub fn generate(len: usize, fill: Fill, seed: u64) -> Result<Vec<i8>> {
    let mut values: Vec<i8> = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| SumError::Allocation { len })?;

    match fill {
        Fill::Ones => values.resize(len, 1),
        Fill::Cyclic => {
            values.extend((0..len).map(|i| ((i % CYCLE) as i16 + MIN_VALUE as i16) as i8))
        }
        Fill::Random => {
            let mut rng = StdRng::seed_from_u64(seed);
            values.extend((0..len).map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE)));
        }
    }

    tracing::debug!(len, ?fill, seed, "generated input array");
    Ok(values)
}
