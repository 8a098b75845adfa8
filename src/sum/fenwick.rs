//! Fenwick tree over generic weights
//!
//! One-indexed binary indexed tree storing partial sums. Slot `j` covers the
//! `lsb(j)` values ending at `j`, so prefix sums, point updates and
//! cumulative-sum search all walk O(log n) slots.

use crate::sum::weight::Weight;

/// Lowest set bit of a one-based slot index.
#[inline]
fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// Partial-sum index backing [`SumList`](crate::SumList)
///
/// Slot 0 is a zero sentinel so the update and query chains need no index
/// arithmetic special cases.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick<V> {
    tree: Vec<V>,
}

impl<V: Weight> Fenwick<V> {
    pub fn new() -> Self {
        Self {
            tree: vec![V::zero()],
        }
    }

    /// Build in O(n): seed slots with the raw values, then push each slot's
    /// sum into its parent once.
    pub fn from_values(values: &[V]) -> Self {
        let n = values.len();
        let mut tree = Vec::with_capacity(n + 1);
        tree.push(V::zero());
        tree.extend(values.iter().cloned());
        for j in 1..=n {
            let parent = j + lsb(j);
            if parent <= n {
                let carry = tree[j].clone();
                tree[parent] += carry;
            }
        }
        Self { tree }
    }

    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Sum of the first `count` values.
    pub fn prefix_sum(&self, count: usize) -> V {
        debug_assert!(count <= self.len());
        let mut acc = V::zero();
        let mut j = count;
        while j > 0 {
            acc += self.tree[j].clone();
            j -= lsb(j);
        }
        acc
    }

    /// Add `delta` to the value at zero-based `index`.
    pub fn add(&mut self, index: usize, delta: &V) {
        let mut j = index + 1;
        while j < self.tree.len() {
            self.tree[j] += delta.clone();
            j += lsb(j);
        }
    }

    /// Subtract `delta` from the value at zero-based `index`
    ///
    /// Kept separate from [`Fenwick::add`] so unsigned weights never pass
    /// through a negative intermediate.
    pub fn sub(&mut self, index: usize, delta: &V) {
        let mut j = index + 1;
        while j < self.tree.len() {
            self.tree[j] -= delta.clone();
            j += lsb(j);
        }
    }

    /// Extend the tree by one value at the tail in O(log n)
    ///
    /// The new slot `j` covers `(j - lsb(j), j]`, recoverable from two
    /// existing prefix sums plus the value itself.
    pub fn append(&mut self, value: V) {
        let j = self.tree.len();
        let covered_from = j - lsb(j);
        let mut slot = value;
        if covered_from < j - 1 {
            slot += self.prefix_sum(j - 1) - self.prefix_sum(covered_from);
        }
        self.tree.push(slot);
    }

    /// Largest `pos` with `prefix_sum(pos) <= target`, paired with that
    /// prefix sum
    ///
    /// Power-of-two descent: try to extend the accepted prefix by ever
    /// smaller spans, keeping the running sum at most `target`. With all
    /// values strictly positive the answer is unique; `pos == len` when the
    /// target reaches the grand total.
    pub fn search_not_greater(&self, target: &V) -> (usize, V) {
        let n = self.len();
        let mut pos = 0usize;
        let mut acc = V::zero();
        let mut step = n.next_power_of_two();
        while step > 0 {
            let next = pos + step;
            if next <= n {
                let cand = acc.clone() + self.tree[next].clone();
                if cand <= *target {
                    acc = cand;
                    pos = next;
                }
            }
            step >>= 1;
        }
        (pos, acc)
    }
}
