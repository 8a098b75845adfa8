//! Packed bit storage
//!
//! Word-packed bit collections with bulk range operations priced near the
//! word-count minimum.

mod bit_list;

pub use bit_list::{BitList, BITS_PER_WORD};
