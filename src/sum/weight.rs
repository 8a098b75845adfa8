//! Weight bound for summed lists

use num_traits::{One, Zero};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Numeric bound for weights stored in a [`SumList`](crate::SumList)
///
/// Covers the built-in machine integers and `num_bigint::BigInt` through the
/// blanket implementation. Weights only ever move through addition and
/// subtraction of smaller-or-equal amounts, so unsigned types work too.
pub trait Weight:
    Clone
    + Ord
    + Zero
    + One
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
{
}

impl<T> Weight for T where
    T: Clone
        + Ord
        + Zero
        + One
        + Add<Output = Self>
        + AddAssign
        + Sub<Output = Self>
        + SubAssign
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn assert_weight<T: Weight>() {}

    #[test]
    fn test_blanket_coverage() {
        assert_weight::<i32>();
        assert_weight::<i64>();
        assert_weight::<i128>();
        assert_weight::<u64>();
        assert_weight::<BigInt>();
    }
}
