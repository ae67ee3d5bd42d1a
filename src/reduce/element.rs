// SPDX-License-Identifier: MIT

use std::fmt::{Debug, Display};
use std::ops::Add;

/// Accumulator type a reduction produces.
pub trait Total: Copy + Default + Send + Add<Output = Self> + PartialEq + Debug + Display {}

impl<T> Total for T where T: Copy + Default + Send + Add<Output = T> + PartialEq + Debug + Display {}

/// Element of an input array.
///
/// Each element widens into a `Total` wide enough to hold the sum of a large
/// array of such elements (`i8` sums into `i64`, `f32` into `f64`, ...).
pub trait Element: Copy + Sync {
    type Total: Total;

    fn widen(self) -> Self::Total;
}

macro_rules! impl_element {
    ($($elem:ty => $total:ty),* $(,)?) => {
        $(
            impl Element for $elem {
                type Total = $total;

                #[inline]
                fn widen(self) -> $total {
                    self as $total
                }
            }
        )*
    };
}

impl_element!(
    i8 => i64,
    i16 => i64,
    i32 => i64,
    i64 => i64,
    u8 => u64,
    u16 => u64,
    u32 => u64,
    u64 => u64,
    f32 => f64,
    f64 => f64,
);

/// Left-to-right sum of `values`, starting from the additive identity.
pub fn sequential_sum<E: Element>(values: &[E]) -> E::Total {
    values
        .iter()
        .fold(E::Total::default(), |acc, &value| acc + value.widen())
}
