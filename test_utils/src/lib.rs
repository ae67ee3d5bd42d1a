// SPDX-License-Identifier: MIT

pub mod fixtures;
pub mod ranges;
