//! Weighted list with logarithmic cumulative-sum queries

use crate::containers::FastVec;
use crate::error::{check_bounds, check_range, BitsumError, Result};
use crate::sum::fenwick::Fenwick;
use crate::sum::weight::Weight;
use num_bigint::BigInt;
use std::fmt;

/// Weighted list over arbitrary-precision integers.
pub type BigSumList = SumList<BigInt>;

/// A list of strictly positive weights indexed by cumulative sum
///
/// Each element carries a weight greater than zero. Alongside positional
/// access the list answers prefix-sum queries and the inverse lookup, finding
/// the element a given cumulative sum falls into, both in O(log n) via a
/// Fenwick tree kept in lockstep with the values. Point updates touch only
/// the logarithmic update chain; structural edits in the interior rebuild
/// the tree in O(n), while appends extend it in O(log n).
///
/// Setting an element to a non-positive weight removes it, so the positivity
/// invariant holds after every operation.
///
/// # Examples
///
/// ```rust
/// use bitsum::SumList;
///
/// let mut list = SumList::from_values([5i64, 3, 7])?;
/// assert_eq!(list.values_sum(), &15);
/// assert_eq!(list.left_values_sum(2)?, (8, Some(&7)));
/// assert_eq!(list.index_of_not_greater_sum(&9)?, (2, 8));
/// # Ok::<(), bitsum::BitsumError>(())
/// ```
pub struct SumList<V: Weight> {
    values: FastVec<V>,
    tree: Fenwick<V>,
    total: V,
}

impl<V: Weight> SumList<V> {
    /// Create a new empty list
    pub fn new() -> Self {
        Self {
            values: FastVec::new(),
            tree: Fenwick::new(),
            total: V::zero(),
        }
    }

    /// Create a list from an iterable of weights
    ///
    /// Every weight must be strictly positive.
    pub fn from_values<I: IntoIterator<Item = V>>(values: I) -> Result<Self> {
        let mut stored = FastVec::new();
        let mut total = V::zero();
        for v in values {
            Self::check_positive(&v)?;
            total += v.clone();
            stored.push(v)?;
        }
        let tree = Fenwick::from_values(&stored);
        Ok(Self {
            values: stored,
            tree,
            total,
        })
    }

    fn check_positive(value: &V) -> Result<()> {
        if *value <= V::zero() {
            return Err(BitsumError::invalid_argument(
                "weights must be strictly positive",
            ));
        }
        Ok(())
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the weight at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.values.as_slice().get(index)
    }

    /// Sum of all weights, cached so the query is O(1)
    #[inline]
    pub fn values_sum(&self) -> &V {
        &self.total
    }

    /// Append a weight in O(log n)
    ///
    /// The fallible array push happens before the tree and cached total are
    /// touched, so a failed append leaves the list unchanged.
    pub fn add(&mut self, value: V) -> Result<()> {
        Self::check_positive(&value)?;
        self.values.push(value.clone())?;
        self.tree.append(value.clone());
        self.total += value;
        Ok(())
    }

    /// Insert a weight at `index`, shifting later elements right
    ///
    /// Interior inserts rebuild the tree in O(n); `index == len` degrades to
    /// [`SumList::add`].
    pub fn insert(&mut self, index: usize, value: V) -> Result<()> {
        if index > self.values.len() {
            return Err(BitsumError::out_of_bounds(index, self.values.len()));
        }
        if index == self.values.len() {
            return self.add(value);
        }
        Self::check_positive(&value)?;
        self.values.insert(index, value.clone())?;
        self.tree = Fenwick::from_values(&self.values);
        self.total += value;
        Ok(())
    }

    /// Set the weight at `index`
    ///
    /// A non-positive `value` removes the element instead, shrinking the
    /// list. Positive updates touch only the O(log n) tree chain.
    pub fn update(&mut self, index: usize, value: V) -> Result<()> {
        check_bounds(index, self.values.len())?;
        if value <= V::zero() {
            self.remove_at(index)?;
            return Ok(());
        }
        let old = self.values[index].clone();
        if value > old {
            let delta = value.clone() - old;
            self.tree.add(index, &delta);
            self.total += delta;
        } else if value < old {
            let delta = old - value.clone();
            self.tree.sub(index, &delta);
            self.total -= delta;
        }
        self.values[index] = value;
        Ok(())
    }

    /// Increase the weight at `index` by one
    pub fn increase(&mut self, index: usize) -> Result<()> {
        check_bounds(index, self.values.len())?;
        self.tree.add(index, &V::one());
        self.total += V::one();
        self.values[index] += V::one();
        Ok(())
    }

    /// Decrease the weight at `index` by one, removing the element when the
    /// weight would hit zero
    pub fn decrease(&mut self, index: usize) -> Result<()> {
        check_bounds(index, self.values.len())?;
        if self.values[index] <= V::one() {
            self.remove_at(index)?;
            return Ok(());
        }
        self.tree.sub(index, &V::one());
        self.total -= V::one();
        self.values[index] -= V::one();
        Ok(())
    }

    /// Prefix sum of the weights before `index`, paired with the weight at
    /// `index`
    ///
    /// `index == len` is a valid query position one past the end: it yields
    /// the grand total with no paired weight.
    pub fn left_values_sum(&self, index: usize) -> Result<(V, Option<&V>)> {
        if index > self.values.len() {
            return Err(BitsumError::out_of_bounds(index, self.values.len()));
        }
        let sum = if index == self.values.len() {
            self.total.clone()
        } else {
            self.tree.prefix_sum(index)
        };
        Ok((sum, self.values.as_slice().get(index)))
    }

    /// Largest index whose prefix sum does not exceed `target`, paired with
    /// that prefix sum
    ///
    /// This is the inverse of [`SumList::left_values_sum`]: the returned
    /// index is the element the cumulative position `target` falls into.
    /// Yields `(len, total)` once `target` reaches the grand total; a
    /// negative target is rejected.
    pub fn index_of_not_greater_sum(&self, target: &V) -> Result<(usize, V)> {
        if *target < V::zero() {
            return Err(BitsumError::invalid_argument(
                "cumulative sum target may not be negative",
            ));
        }
        Ok(self.tree.search_not_greater(target))
    }

    /// Remove and return the weight at `index`, shifting later elements left
    pub fn remove_at(&mut self, index: usize) -> Result<V> {
        check_bounds(index, self.values.len())?;
        let value = self.values.remove(index)?;
        self.total -= value.clone();
        self.tree = Fenwick::from_values(&self.values);
        Ok(value)
    }

    /// Remove the weights in `[start, start + length)`
    pub fn remove_range(&mut self, start: usize, length: usize) -> Result<()> {
        check_range(start, length, self.values.len())?;
        let mut removed = V::zero();
        for v in &self.values.as_slice()[start..start + length] {
            removed += v.clone();
        }
        self.values.remove_range(start, length)?;
        self.total -= removed;
        self.tree = Fenwick::from_values(&self.values);
        Ok(())
    }

    /// Remove all elements
    pub fn clear(&mut self) {
        self.values.clear();
        self.tree = Fenwick::new();
        self.total = V::zero();
    }

    /// Iterate over the weights
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.as_slice().iter()
    }

    /// Copy the weights out into a standard vector
    pub fn to_vec(&self) -> Vec<V> {
        self.values.as_slice().to_vec()
    }
}

impl<V: Weight> Default for SumList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Weight> Clone for SumList<V> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            tree: self.tree.clone(),
            total: self.total.clone(),
        }
    }
}

impl<V: Weight> PartialEq for SumList<V> {
    fn eq(&self, other: &Self) -> bool {
        self.values.as_slice() == other.values.as_slice()
    }
}

impl<V: Weight> Eq for SumList<V> {}

impl<V: Weight + fmt::Debug> fmt::Debug for SumList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SumList")
            .field("values", &self.values.as_slice())
            .field("total", &self.total)
            .finish()
    }
}

impl<'a, V: Weight> IntoIterator for &'a SumList<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<V: Weight + serde::Serialize> serde::Serialize for SumList<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.values.as_slice().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, V: Weight + serde::Deserialize<'de>> serde::Deserialize<'de> for SumList<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<V>::deserialize(deserializer)?;
        SumList::from_values(values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_prefix(values: &[i64], count: usize) -> i64 {
        values[..count].iter().sum()
    }

    #[test]
    fn test_new_empty() {
        let list: SumList<i64> = SumList::new();
        assert!(list.is_empty());
        assert_eq!(list.values_sum(), &0);
        assert_eq!(list.left_values_sum(0).unwrap(), (0, None));
        assert_eq!(list.index_of_not_greater_sum(&10).unwrap(), (0, 0));
    }

    #[test]
    fn test_from_values_rejects_non_positive() {
        assert!(SumList::from_values([3i64, 0, 5]).is_err());
        assert!(SumList::from_values([3i64, -1]).is_err());
        assert!(SumList::from_values([3i64, 1, 5]).is_ok());
    }

    #[test]
    fn test_prefix_sums() {
        let raw = [5i64, 1, 9, 2, 2, 7, 3];
        let list = SumList::from_values(raw).unwrap();
        assert_eq!(list.values_sum(), &29);
        for i in 0..raw.len() {
            assert_eq!(
                list.left_values_sum(i).unwrap(),
                (naive_prefix(&raw, i), Some(&raw[i]))
            );
        }
        assert_eq!(list.left_values_sum(raw.len()).unwrap(), (29, None));
        assert!(list.left_values_sum(raw.len() + 1).is_err());
    }

    #[test]
    fn test_index_of_not_greater_sum() {
        let list = SumList::from_values([5i64, 3, 7]).unwrap();
        assert_eq!(list.index_of_not_greater_sum(&0).unwrap(), (0, 0));
        assert_eq!(list.index_of_not_greater_sum(&4).unwrap(), (0, 0));
        assert_eq!(list.index_of_not_greater_sum(&5).unwrap(), (1, 5));
        assert_eq!(list.index_of_not_greater_sum(&14).unwrap(), (2, 8));
        assert_eq!(list.index_of_not_greater_sum(&15).unwrap(), (3, 15));
        assert_eq!(list.index_of_not_greater_sum(&99).unwrap(), (3, 15));
        assert!(list.index_of_not_greater_sum(&-1).is_err());
    }

    #[test]
    fn test_update_point() {
        let mut list = SumList::from_values([5i64, 3, 7]).unwrap();
        list.update(1, 10).unwrap();
        assert_eq!(list.get(1), Some(&10));
        assert_eq!(list.values_sum(), &22);
        assert_eq!(list.left_values_sum(2).unwrap(), (15, Some(&7)));

        list.update(1, 2).unwrap();
        assert_eq!(list.values_sum(), &14);
        assert!(list.update(3, 1).is_err());
    }

    #[test]
    fn test_update_non_positive_removes() {
        let mut list = SumList::from_values([5i64, 3, 7]).unwrap();
        list.update(1, 0).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_vec(), vec![5, 7]);
        assert_eq!(list.values_sum(), &12);
        assert_eq!(list.left_values_sum(1).unwrap(), (5, Some(&7)));

        list.update(0, -3).unwrap();
        assert_eq!(list.to_vec(), vec![7]);
    }

    #[test]
    fn test_increase_decrease() {
        let mut list = SumList::from_values([2i64, 1]).unwrap();
        list.increase(0).unwrap();
        assert_eq!(list.to_vec(), vec![3, 1]);
        assert_eq!(list.values_sum(), &4);

        list.decrease(0).unwrap();
        assert_eq!(list.to_vec(), vec![2, 1]);

        // Hitting zero removes the element.
        list.decrease(1).unwrap();
        assert_eq!(list.to_vec(), vec![2]);
        assert_eq!(list.values_sum(), &2);
    }

    #[test]
    fn test_add_insert_remove() {
        let mut list: SumList<i64> = SumList::new();
        list.add(4).unwrap();
        list.add(6).unwrap();
        list.insert(1, 2).unwrap();
        assert_eq!(list.to_vec(), vec![4, 2, 6]);
        assert_eq!(list.values_sum(), &12);
        assert_eq!(list.left_values_sum(2).unwrap(), (6, Some(&6)));

        assert_eq!(list.remove_at(0).unwrap(), 4);
        assert_eq!(list.to_vec(), vec![2, 6]);
        assert_eq!(list.values_sum(), &8);

        assert!(list.add(0).is_err());
        assert!(list.insert(5, 1).is_err());
        assert!(list.remove_at(2).is_err());
    }

    #[test]
    fn test_remove_range() {
        let mut list = SumList::from_values([1i64, 2, 3, 4, 5]).unwrap();
        list.remove_range(1, 3).unwrap();
        assert_eq!(list.to_vec(), vec![1, 5]);
        assert_eq!(list.values_sum(), &6);
        assert_eq!(list.index_of_not_greater_sum(&1).unwrap(), (1, 1));

        assert!(list.remove_range(1, 2).is_err());
    }

    #[test]
    fn test_tree_tracks_values_through_mixed_edits() {
        let mut list: SumList<i64> = SumList::new();
        let mut oracle: Vec<i64> = Vec::new();
        let script: &[(usize, i64)] = &[
            (0, 10),
            (1, 3),
            (1, 8),
            (3, 2),
            (2, 40),
            (0, 1),
            (4, 6),
            (2, 15),
        ];
        for &(at, v) in script {
            list.insert(at, v).unwrap();
            oracle.insert(at, v);
        }
        list.update(3, 9).unwrap();
        oracle[3] = 9;
        list.remove_at(5).unwrap();
        oracle.remove(5);

        assert_eq!(list.to_vec(), oracle);
        assert_eq!(*list.values_sum(), oracle.iter().sum::<i64>());
        for i in 0..=oracle.len() {
            assert_eq!(list.left_values_sum(i).unwrap().0, naive_prefix(&oracle, i));
        }
    }

    #[test]
    fn test_failed_mutations_leave_state_untouched() {
        let mut list = SumList::from_values([5i64, 3, 7]).unwrap();
        let snapshot = list.clone();

        assert!(list.add(0).is_err());
        assert!(list.add(-4).is_err());
        assert!(list.insert(1, 0).is_err());
        assert!(list.insert(9, 2).is_err());
        assert!(list.update(7, 1).is_err());
        assert!(list.remove_at(3).is_err());
        assert!(list.remove_range(2, 5).is_err());

        // Tree and cached total still agree with the untouched value array.
        assert_eq!(list, snapshot);
        assert_eq!(list.values_sum(), &15);
        for i in 0..=list.len() {
            assert_eq!(
                list.left_values_sum(i).unwrap().0,
                [5i64, 3, 7][..i].iter().sum::<i64>()
            );
        }
        assert_eq!(list.index_of_not_greater_sum(&8).unwrap(), (2, 8));
    }

    #[test]
    fn test_clear() {
        let mut list = SumList::from_values([1i64, 2, 3]).unwrap();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.values_sum(), &0);
        assert_eq!(list.index_of_not_greater_sum(&5).unwrap(), (0, 0));
    }

    #[test]
    fn test_equality_on_values_only() {
        let a = SumList::from_values([1i64, 2, 3]).unwrap();
        let mut b: SumList<i64> = SumList::new();
        for v in [1i64, 2, 3] {
            b.add(v).unwrap();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_big_sum_list() {
        let mut list = BigSumList::new();
        let huge: BigInt = BigInt::from(u128::MAX) * 1000;
        list.add(huge.clone()).unwrap();
        list.add(BigInt::from(1)).unwrap();
        assert_eq!(*list.values_sum(), huge.clone() + 1);
        assert_eq!(
            list.index_of_not_greater_sum(&huge).unwrap(),
            (1, huge.clone())
        );
        assert!(list.add(BigInt::from(-5)).is_err());
    }

    #[test]
    fn test_iterators() {
        let list = SumList::from_values([4i64, 5]).unwrap();
        let via_iter: Vec<i64> = list.iter().cloned().collect();
        let via_into: Vec<i64> = (&list).into_iter().cloned().collect();
        assert_eq!(via_iter, vec![4, 5]);
        assert_eq!(via_into, via_iter);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let list = SumList::from_values([5i64, 3, 7]).unwrap();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, "[5,3,7]");
        let back: SumList<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
        assert_eq!(back.values_sum(), &15);

        assert!(serde_json::from_str::<SumList<i64>>("[5,0,7]").is_err());
    }
}
