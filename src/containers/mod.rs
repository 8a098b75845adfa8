//! Supporting container types
//!
//! Both collection subsystems sit on top of [`FastVec`], a realloc-based
//! growable buffer with amortized doubling measured in elements. The packed
//! bit vector stores its words in one, the weighted list its values.

mod fast_vec;

pub use fast_vec::FastVec;
