//! Cumulative-sum indexed collections
//!
//! Weighted lists answering prefix-sum and sum-to-index queries in O(log n)
//! through a Fenwick tree kept in lockstep with the stored values.

mod fenwick;
mod sum_list;
mod weight;

pub use sum_list::{BigSumList, SumList};
pub use weight::Weight;
