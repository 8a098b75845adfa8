//! # Bitsum: Packed Bit Lists and Sum-Indexed Collections
//!
//! This crate provides two performance-focused collection families built on a
//! shared realloc-optimized vector core.
//!
//! ## Key Features
//!
//! - **Packed Bit Lists**: `u64`-word bit storage with bulk range copy, fill,
//!   search and comparison priced near the word-count minimum
//! - **Aliasing-Safe Range Copies**: in-place overlapping bit moves with
//!   memmove-style direction selection
//! - **Sum-Indexed Lists**: strictly positive weights with O(log n) prefix
//!   sums, point updates and cumulative-sum search over a Fenwick tree
//! - **Arbitrary Precision**: the same weighted list instantiated for
//!   `num_bigint::BigInt` as [`BigSumList`]
//! - **Fast Containers**: realloc-based [`FastVec`] backing both families
//!
//! ## Quick Start
//!
//! ```rust
//! use bitsum::{BitList, SumList};
//!
//! // Packed bit storage with bulk range operations
//! let mut bits = BitList::with_size(320, false)?;
//! bits.set_all(true, 72, 20)?;
//! let window = bits.get_range(72, 20)?;
//! bits.set_range(123, &window)?;
//! assert_eq!(bits.get_small_range(123, 20)?, (1u64 << 20) - 1);
//!
//! // Weighted list indexed by cumulative sum
//! let mut weights = SumList::from_values([5i64, 3, 7])?;
//! assert_eq!(weights.left_values_sum(2)?, (8, Some(&7)));
//! assert_eq!(weights.index_of_not_greater_sum(&9)?, (2, 8));
//! weights.update(1, 10)?;
//! assert_eq!(weights.values_sum(), &22);
//! # Ok::<(), bitsum::BitsumError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod bits;
pub mod containers;
pub mod error;
pub mod sum;

// Re-export core types
pub use bits::{BitList, BITS_PER_WORD};
pub use containers::FastVec;
pub use error::{BitsumError, Result};
pub use sum::{BigSumList, SumList, Weight};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing bitsum v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        init();
        assert!(VERSION.len() > 0);
    }

    #[test]
    fn test_version_info() {
        assert!(VERSION.len() > 0);
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_core_types_reachable() {
        let mut bits = BitList::new();
        bits.push(true).unwrap();
        assert_eq!(bits.len(), 1);

        let list: SumList<i64> = SumList::new();
        assert!(list.is_empty());

        let vec: FastVec<u8> = FastVec::new();
        assert!(vec.is_empty());
    }
}
