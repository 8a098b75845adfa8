//! Packed bit list with bulk range operations
//!
//! Stores bits in `u64` words, least significant bit first, and prices bulk
//! operations near the word-count minimum: range copies, fills, searches and
//! comparisons all walk whole words and only drop to single bits inside the
//! boundary word where something interesting happens.

use crate::containers::FastVec;
use crate::error::{check_bounds, check_range, BitsumError, Result};
use std::fmt;

/// Bits per storage word.
pub const BITS_PER_WORD: usize = 64;

const BITS_PER_BYTE: usize = 8;

#[inline]
fn word_count(bits: usize) -> usize {
    (bits + BITS_PER_WORD - 1) / BITS_PER_WORD
}

/// Mask covering the low `n` bits, `n <= 64`.
#[inline]
fn low_mask(n: usize) -> u64 {
    if n >= BITS_PER_WORD {
        !0
    } else {
        (1u64 << n) - 1
    }
}

/// Read `n` bits (`1..=64`) starting at bit `pos`, right-aligned and
/// zero-padded. May touch two adjacent words.
#[inline]
fn read_bits(words: &[u64], pos: usize, n: usize) -> u64 {
    debug_assert!(n >= 1 && n <= BITS_PER_WORD);
    let w = pos / BITS_PER_WORD;
    let b = pos % BITS_PER_WORD;
    let mut out = words[w] >> b;
    if b + n > BITS_PER_WORD {
        out |= words[w + 1] << (BITS_PER_WORD - b);
    }
    out & low_mask(n)
}

/// Write the low `n` bits (`1..=64`) of `value` at bit `pos`, preserving the
/// surrounding bits. May touch two adjacent words.
#[inline]
fn write_bits(words: &mut [u64], pos: usize, n: usize, value: u64) {
    debug_assert!(n >= 1 && n <= BITS_PER_WORD);
    let w = pos / BITS_PER_WORD;
    let b = pos % BITS_PER_WORD;
    let value = value & low_mask(n);
    let lo = (BITS_PER_WORD - b).min(n);
    let mask = low_mask(lo) << b;
    words[w] = (words[w] & !mask) | ((value << b) & mask);
    if n > lo {
        let mask = low_mask(n - lo);
        words[w + 1] = (words[w + 1] & !mask) | ((value >> lo) & mask);
    }
}

/// Copy `len` bits between two distinct buffers. Each destination word is
/// reconstructed from at most two source words.
fn copy_bits(src: &[u64], src_start: usize, dst: &mut [u64], dst_start: usize, len: usize) {
    let mut copied = 0;
    while copied < len {
        let d = dst_start + copied;
        let chunk = (BITS_PER_WORD - d % BITS_PER_WORD).min(len - copied);
        let v = read_bits(src, src_start + copied, chunk);
        write_bits(dst, d, chunk, v);
        copied += chunk;
    }
}

/// Copy `len` bits inside one buffer, correct for any overlap.
///
/// Direction selection follows the memmove rule on bit-granular data: when
/// the destination starts above the source the copy runs from the high end
/// downward, otherwise from the low end upward, so every read happens before
/// the write that would clobber it.
fn copy_bits_within(words: &mut [u64], src_start: usize, dst_start: usize, len: usize) {
    if len == 0 || src_start == dst_start {
        return;
    }
    if dst_start < src_start {
        let mut copied = 0;
        while copied < len {
            let d = dst_start + copied;
            let chunk = (BITS_PER_WORD - d % BITS_PER_WORD).min(len - copied);
            let v = read_bits(words, src_start + copied, chunk);
            write_bits(words, d, chunk, v);
            copied += chunk;
        }
    } else {
        let mut remaining = len;
        while remaining > 0 {
            let d_end = dst_start + remaining;
            let word_start = (d_end - 1) / BITS_PER_WORD * BITS_PER_WORD;
            let chunk = (d_end - word_start).min(remaining);
            let d = d_end - chunk;
            let v = read_bits(words, src_start + (d - dst_start), chunk);
            write_bits(words, d, chunk, v);
            remaining -= chunk;
        }
    }
}

/// A growable packed bit vector
///
/// `BitList` stores bits in `u64` words for at most one bit of memory
/// overhead per element, grows by amortized doubling on append, and never
/// shrinks its backing buffer on removal. Ranges returned by read operations
/// are independent copies, never views into the source.
///
/// Bits beyond [`BitList::len`] in the last partial word are unspecified and
/// never observable through the public API.
///
/// # Examples
///
/// ```rust
/// use bitsum::BitList;
///
/// let mut bits = BitList::new();
/// bits.push(true)?;
/// bits.push(false)?;
/// bits.push(true)?;
///
/// assert_eq!(bits.get(0), Some(true));
/// assert_eq!(bits.get(1), Some(false));
/// assert_eq!(bits.len(), 3);
/// # Ok::<(), bitsum::BitsumError>(())
/// ```
pub struct BitList {
    words: FastVec<u64>,
    len: usize,
}

impl BitList {
    /// Create a new empty bit list
    #[inline]
    pub fn new() -> Self {
        Self {
            words: FastVec::new(),
            len: 0,
        }
    }

    /// Create a bit list with the specified capacity in bits
    pub fn with_capacity(bits: usize) -> Result<Self> {
        Ok(Self {
            words: FastVec::with_capacity(word_count(bits))?,
            len: 0,
        })
    }

    /// Create a bit list of `len` bits, all set to `fill`
    pub fn with_size(len: usize, fill: bool) -> Result<Self> {
        let pattern = if fill { !0u64 } else { 0 };
        Ok(Self {
            words: FastVec::with_size(word_count(len), pattern)?,
            len,
        })
    }

    /// Create a bit list from a slice of booleans
    pub fn from_bools(values: &[bool]) -> Result<Self> {
        let mut list = Self::with_size(values.len(), false)?;
        for (i, &v) in values.iter().enumerate() {
            if v {
                list.words[i / BITS_PER_WORD] |= 1u64 << (i % BITS_PER_WORD);
            }
        }
        Ok(list)
    }

    /// Create a bit list from bytes, eight bits per byte, least significant
    /// bit first
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut list = Self::with_size(bytes.len() * BITS_PER_BYTE, false)?;
        for (i, &byte) in bytes.iter().enumerate() {
            let w = i / BITS_PER_BYTE;
            let shift = (i % BITS_PER_BYTE) * BITS_PER_BYTE;
            list.words[w] |= (byte as u64) << shift;
        }
        Ok(list)
    }

    /// Create a bit list from whole words; length is `64 * values.len()`
    pub fn from_words(values: &[u64]) -> Result<Self> {
        Ok(Self {
            words: FastVec::from_slice(values)?,
            len: values.len() * BITS_PER_WORD,
        })
    }

    /// Create a bit list of exactly `len` bits backed by `values`
    ///
    /// Missing words are zero-filled; surplus bits beyond `len` are ignored.
    pub fn from_words_len(len: usize, values: &[u64]) -> Result<Self> {
        let needed = word_count(len);
        let mut words = FastVec::with_capacity(needed)?;
        words.extend_from_slice(&values[..values.len().min(needed)])?;
        words.resize(needed, 0)?;
        Ok(Self { words, len })
    }

    /// Number of logically valid bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the bit list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capacity in bits
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.capacity() * BITS_PER_WORD
    }

    /// Get the bit at `index`, or `None` when out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.words[index / BITS_PER_WORD] >> (index % BITS_PER_WORD)) & 1 == 1)
    }

    /// Get the bit at `index` without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < self.len()`
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        (unsafe { self.words.get_unchecked(index / BITS_PER_WORD) } >> (index % BITS_PER_WORD)) & 1
            == 1
    }

    /// Set the bit at `index`
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        check_bounds(index, self.len)?;
        unsafe { self.set_unchecked(index, value) };
        Ok(())
    }

    /// Set the bit at `index` without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < self.len()`
    #[inline]
    pub unsafe fn set_unchecked(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.len);
        let w = unsafe { self.words.get_unchecked_mut(index / BITS_PER_WORD) };
        if value {
            *w |= 1u64 << (index % BITS_PER_WORD);
        } else {
            *w &= !(1u64 << (index % BITS_PER_WORD));
        }
    }

    /// Append one bit
    pub fn push(&mut self, value: bool) -> Result<()> {
        if self.len % BITS_PER_WORD == 0 {
            self.words.push(0)?;
        }
        self.len += 1;
        unsafe { self.set_unchecked(self.len - 1, value) };
        Ok(())
    }

    /// Remove and return the last bit
    pub fn pop(&mut self) -> Option<bool> {
        if self.len == 0 {
            return None;
        }
        let value = unsafe { self.get_unchecked(self.len - 1) };
        self.len -= 1;
        self.words.truncate(word_count(self.len));
        Some(value)
    }

    /// Overwrite the bit at `index`, or append when `index == len`
    ///
    /// Any larger index is out of range.
    pub fn set_or_add(&mut self, index: usize, value: bool) -> Result<()> {
        if index == self.len {
            self.push(value)
        } else {
            self.set(index, value)
        }
    }

    /// Grow the word storage to hold `bits` bits, zero-filling new words.
    fn grow_words_for(&mut self, bits: usize) -> Result<()> {
        let needed = word_count(bits);
        if needed > self.words.len() {
            self.words.resize(needed, 0)?;
        }
        Ok(())
    }

    /// Return an independently owned copy of bits `[start, start + length)`
    pub fn get_range(&self, start: usize, length: usize) -> Result<BitList> {
        check_range(start, length, self.len)?;
        let mut out = BitList::with_size(length, false)?;
        copy_bits(&self.words, start, &mut out.words, 0, length);
        Ok(out)
    }

    /// Overwrite `source.len()` bits starting at `index` with `source`
    ///
    /// Never shifts elements; the written range must fit within the current
    /// length. For a source that aliases `self`, use
    /// [`BitList::copy_range_within`] instead (the borrow checker enforces
    /// the distinction).
    pub fn set_range(&mut self, index: usize, source: &BitList) -> Result<()> {
        check_range(index, source.len, self.len)?;
        copy_bits(&source.words, 0, &mut self.words, index, source.len);
        Ok(())
    }

    /// Generic-sequence twin of [`BitList::set_range`]; observable results
    /// are identical
    pub fn set_range_bools(&mut self, index: usize, source: &[bool]) -> Result<()> {
        check_range(index, source.len(), self.len)?;
        for (i, &v) in source.iter().enumerate() {
            unsafe { self.set_unchecked(index + i, v) };
        }
        Ok(())
    }

    /// Copy `length` bits from `[src_start, ..)` of `self` to
    /// `[dest_start, ..)` of `destination`
    ///
    /// The destination may grow: its length extends to `dest_start + length`
    /// when the copy runs past its current end, provided `dest_start` itself
    /// is within bounds.
    pub fn copy_range_to(
        &self,
        src_start: usize,
        destination: &mut BitList,
        dest_start: usize,
        length: usize,
    ) -> Result<()> {
        check_range(src_start, length, self.len)?;
        if dest_start > destination.len {
            return Err(BitsumError::out_of_bounds(dest_start, destination.len));
        }
        let dest_end = dest_start + length;
        if dest_end > destination.len {
            destination.grow_words_for(dest_end)?;
            destination.len = dest_end;
        }
        copy_bits(&self.words, src_start, &mut destination.words, dest_start, length);
        Ok(())
    }

    /// Copy `length` bits from `[src_start, ..)` to `[dest_start, ..)` within
    /// this list, correctly for any overlap of the two ranges
    pub fn copy_range_within(
        &mut self,
        src_start: usize,
        dest_start: usize,
        length: usize,
    ) -> Result<()> {
        check_range(src_start, length, self.len)?;
        check_range(dest_start, length, self.len)?;
        copy_bits_within(&mut self.words, src_start, dest_start, length);
        Ok(())
    }

    /// Return bits `[start, start + length)` right-aligned and zero-padded
    /// in a single word, `length <= 64`
    ///
    /// Cheap comparisons and hashing over short ranges without allocating a
    /// list.
    pub fn get_small_range(&self, start: usize, length: usize) -> Result<u64> {
        check_range(start, length, self.len)?;
        if length == 0 {
            return Ok(0);
        }
        if length > BITS_PER_WORD {
            return Err(BitsumError::invalid_argument(format!(
                "get_small_range packs into one word, so the range may hold at most {} bits",
                BITS_PER_WORD
            )));
        }
        Ok(read_bits(&self.words, start, length))
    }

    /// Set bits `[start, start + length)` to a constant
    ///
    /// Whole words in the middle of the run are filled in one store each;
    /// only the boundary words are masked.
    pub fn set_all(&mut self, value: bool, start: usize, length: usize) -> Result<()> {
        check_range(start, length, self.len)?;
        self.set_all_internal(value, start, length);
        Ok(())
    }

    fn set_all_internal(&mut self, value: bool, start: usize, length: usize) {
        if length == 0 {
            return;
        }
        let sw = start / BITS_PER_WORD;
        let sb = start % BITS_PER_WORD;
        let last = start + length - 1;
        let ew = last / BITS_PER_WORD;
        let eb = last % BITS_PER_WORD;
        if sw == ew {
            let mask = low_mask(length) << sb;
            if value {
                self.words[sw] |= mask;
            } else {
                self.words[sw] &= !mask;
            }
            return;
        }
        let start_mask = !0u64 << sb;
        let end_mask = low_mask(eb + 1);
        let fill = if value { !0u64 } else { 0 };
        if value {
            self.words[sw] |= start_mask;
            self.words[ew] |= end_mask;
        } else {
            self.words[sw] &= !start_mask;
            self.words[ew] &= !end_mask;
        }
        for w in &mut self.words.as_mut_slice()[sw + 1..ew] {
            *w = fill;
        }
    }

    /// Set every bit to a constant
    pub fn fill(&mut self, value: bool) {
        let len = self.len;
        self.set_all_internal(value, 0, len);
    }

    /// Append `count` copies of a constant bit
    pub fn add_series(&mut self, value: bool, count: usize) -> Result<()> {
        let old_len = self.len;
        self.grow_words_for(old_len + count)?;
        self.len = old_len + count;
        self.set_all_internal(value, old_len, count);
        Ok(())
    }

    /// Append `count` bits computed from their prospective index
    pub fn add_series_with<F>(&mut self, count: usize, mut f: F) -> Result<()>
    where
        F: FnMut(usize) -> bool,
    {
        let old_len = self.len;
        self.grow_words_for(old_len + count)?;
        self.len = old_len + count;
        for i in 0..count {
            unsafe { self.set_unchecked(old_len + i, f(i)) };
        }
        Ok(())
    }

    /// Append all bits of another list
    pub fn extend_from_list(&mut self, source: &BitList) -> Result<()> {
        let at = self.len;
        self.insert(at, source)
    }

    /// Append bits from a slice of booleans
    pub fn extend_from_bools(&mut self, values: &[bool]) -> Result<()> {
        let old_len = self.len;
        self.grow_words_for(old_len + values.len())?;
        self.len = old_len + values.len();
        self.set_all_internal(false, old_len, values.len());
        for (i, &v) in values.iter().enumerate() {
            if v {
                unsafe { self.set_unchecked(old_len + i, true) };
            }
        }
        Ok(())
    }

    /// Append bits unpacked from bytes, least significant bit first
    pub fn extend_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let unpacked = BitList::from_bytes(bytes)?;
        self.extend_from_list(&unpacked)
    }

    /// Append whole words, 64 bits each
    pub fn extend_from_words(&mut self, values: &[u64]) -> Result<()> {
        let unpacked = BitList::from_words(values)?;
        self.extend_from_list(&unpacked)
    }

    /// Insert all bits of `source` at `index`, shifting later bits right
    pub fn insert(&mut self, index: usize, source: &BitList) -> Result<()> {
        if index > self.len {
            return Err(BitsumError::out_of_bounds(index, self.len));
        }
        let add = source.len;
        if add == 0 {
            return Ok(());
        }
        let old_len = self.len;
        self.grow_words_for(old_len + add)?;
        self.len = old_len + add;
        copy_bits_within(&mut self.words, index, index + add, old_len - index);
        copy_bits(&source.words, 0, &mut self.words, index, add);
        Ok(())
    }

    /// Insert bits from a boolean slice at `index`
    pub fn insert_bools(&mut self, index: usize, values: &[bool]) -> Result<()> {
        let unpacked = BitList::from_bools(values)?;
        self.insert(index, &unpacked)
    }

    /// Insert a single bit at `index`
    pub fn insert_bit(&mut self, index: usize, value: bool) -> Result<()> {
        if index > self.len {
            return Err(BitsumError::out_of_bounds(index, self.len));
        }
        let old_len = self.len;
        self.grow_words_for(old_len + 1)?;
        self.len = old_len + 1;
        copy_bits_within(&mut self.words, index, index + 1, old_len - index);
        unsafe { self.set_unchecked(index, value) };
        Ok(())
    }

    /// Remove and return the bit at `index`, shifting later bits left
    pub fn remove_at(&mut self, index: usize) -> Result<bool> {
        check_bounds(index, self.len)?;
        let value = unsafe { self.get_unchecked(index) };
        copy_bits_within(&mut self.words, index + 1, index, self.len - index - 1);
        self.len -= 1;
        self.words.truncate(word_count(self.len));
        Ok(value)
    }

    /// Remove bits `[start, start + length)`, shifting later bits left
    pub fn remove_range(&mut self, start: usize, length: usize) -> Result<()> {
        check_range(start, length, self.len)?;
        copy_bits_within(
            &mut self.words,
            start + length,
            start,
            self.len - start - length,
        );
        self.len -= length;
        self.words.truncate(word_count(self.len));
        Ok(())
    }

    /// Reverse the whole list in place
    pub fn reverse(&mut self) {
        let len = self.len;
        // Bounds are trivially valid for the full range.
        let _ = self.reverse_range(0, len);
    }

    /// Reverse bits `[start, start + length)` in place
    pub fn reverse_range(&mut self, start: usize, length: usize) -> Result<()> {
        check_range(start, length, self.len)?;
        let mut i = start;
        let mut j = start + length;
        while i + 1 < j {
            j -= 1;
            let a = unsafe { self.get_unchecked(i) };
            let b = unsafe { self.get_unchecked(j) };
            unsafe {
                self.set_unchecked(i, b);
                self.set_unchecked(j, a);
            }
            i += 1;
        }
        Ok(())
    }

    /// Index of the first occurrence of `value`
    pub fn index_of(&self, value: bool) -> Option<usize> {
        self.find_first(value, 0, self.len)
    }

    /// Index of the first occurrence of `value` within
    /// `[start, start + length)`
    ///
    /// Words that cannot contain a match are skipped whole.
    pub fn index_of_in(&self, value: bool, start: usize, length: usize) -> Result<Option<usize>> {
        check_range(start, length, self.len)?;
        Ok(self.find_first(value, start, length))
    }

    fn find_first(&self, value: bool, start: usize, length: usize) -> Option<usize> {
        let end = start + length;
        let mut pos = start;
        while pos < end {
            let chunk = (BITS_PER_WORD - pos % BITS_PER_WORD).min(end - pos);
            let mut w = read_bits(&self.words, pos, chunk);
            if !value {
                w = !w & low_mask(chunk);
            }
            if w != 0 {
                return Some(pos + w.trailing_zeros() as usize);
            }
            pos += chunk;
        }
        None
    }

    /// Index of the last occurrence of `value`
    pub fn last_index_of(&self, value: bool) -> Option<usize> {
        self.find_last(value, 0, self.len)
    }

    /// Index of the last occurrence of `value` within
    /// `[start, start + length)`
    pub fn last_index_of_in(
        &self,
        value: bool,
        start: usize,
        length: usize,
    ) -> Result<Option<usize>> {
        check_range(start, length, self.len)?;
        Ok(self.find_last(value, start, length))
    }

    fn find_last(&self, value: bool, start: usize, length: usize) -> Option<usize> {
        let mut remaining = length;
        while remaining > 0 {
            let end = start + remaining;
            let word_start = (end - 1) / BITS_PER_WORD * BITS_PER_WORD;
            let chunk = (end - word_start).min(remaining);
            let pos = end - chunk;
            let mut w = read_bits(&self.words, pos, chunk);
            if !value {
                w = !w & low_mask(chunk);
            }
            if w != 0 {
                return Some(pos + (BITS_PER_WORD - 1 - w.leading_zeros() as usize));
            }
            remaining -= chunk;
        }
        None
    }

    /// Check whether any bit equals `value`
    pub fn contains(&self, value: bool) -> bool {
        self.index_of(value).is_some()
    }

    /// Index of the first occurrence of `pattern` as a contiguous
    /// sub-sequence
    ///
    /// An empty pattern matches at index 0.
    pub fn index_of_list(&self, pattern: &BitList) -> Option<usize> {
        if pattern.len > self.len {
            return None;
        }
        (0..=self.len - pattern.len)
            .find(|&at| self.matches_at(at, pattern))
    }

    /// Index of the last occurrence of `pattern` as a contiguous sub-sequence
    pub fn last_index_of_list(&self, pattern: &BitList) -> Option<usize> {
        if pattern.len > self.len {
            return None;
        }
        (0..=self.len - pattern.len)
            .rev()
            .find(|&at| self.matches_at(at, pattern))
    }

    /// Check whether `pattern` occurs as a contiguous sub-sequence
    pub fn contains_list(&self, pattern: &BitList) -> bool {
        self.index_of_list(pattern).is_some()
    }

    fn matches_at(&self, at: usize, pattern: &BitList) -> bool {
        compare_chunks(&self.words, at, &pattern.words, 0, pattern.len) == pattern.len
    }

    /// Length of the common prefix of `self` and `other`
    ///
    /// Returns the index of the first differing bit, or the length of the
    /// shorter operand when the overlap is fully equal. Whole words are
    /// compared at a time; single bits are inspected only inside the word
    /// where a difference is detected.
    pub fn compare(&self, other: &BitList) -> usize {
        let len = self.len.min(other.len);
        compare_chunks(&self.words, 0, &other.words, 0, len)
    }

    /// Length of the common prefix of two explicit regions
    ///
    /// Returns `length` when the regions are fully equal; the result is
    /// relative to the region starts.
    pub fn compare_ranges(
        &self,
        start: usize,
        other: &BitList,
        other_start: usize,
        length: usize,
    ) -> Result<usize> {
        check_range(start, length, self.len)?;
        check_range(other_start, length, other.len)?;
        Ok(compare_chunks(
            &self.words,
            start,
            &other.words,
            other_start,
            length,
        ))
    }

    /// Bitwise AND with another list of the same length
    pub fn and_assign(&mut self, other: &BitList) -> Result<()> {
        self.check_same_length(other)?;
        for (w, o) in self.words.as_mut_slice().iter_mut().zip(other.words.iter()) {
            *w &= *o;
        }
        Ok(())
    }

    /// Bitwise OR with another list of the same length
    pub fn or_assign(&mut self, other: &BitList) -> Result<()> {
        self.check_same_length(other)?;
        for (w, o) in self.words.as_mut_slice().iter_mut().zip(other.words.iter()) {
            *w |= *o;
        }
        Ok(())
    }

    /// Bitwise XOR with another list of the same length
    pub fn xor_assign(&mut self, other: &BitList) -> Result<()> {
        self.check_same_length(other)?;
        for (w, o) in self.words.as_mut_slice().iter_mut().zip(other.words.iter()) {
            *w ^= *o;
        }
        Ok(())
    }

    /// Invert every bit in place
    pub fn not_assign(&mut self) {
        for w in self.words.as_mut_slice() {
            *w = !*w;
        }
    }

    fn check_same_length(&self, other: &BitList) -> Result<()> {
        if self.len != other.len {
            return Err(BitsumError::invalid_argument(format!(
                "bitwise operations require equal lengths, got {} and {}",
                self.len, other.len
            )));
        }
        Ok(())
    }

    /// Copy padded to `target` bits, fill split evenly between both ends
    /// (the odd extra bit goes right)
    ///
    /// Returns an unchanged copy when already at or above `target`.
    pub fn pad(&self, target: usize, fill: bool) -> Result<BitList> {
        if target <= self.len {
            return Ok(self.clone());
        }
        let left = (target - self.len) >> 1;
        let mut out = BitList::with_capacity(target)?;
        out.add_series(fill, left)?;
        out.extend_from_list(self)?;
        let right = target - out.len;
        out.add_series(fill, right)?;
        Ok(out)
    }

    /// Copy padded to `target` bits with fill prepended
    pub fn pad_left(&self, target: usize, fill: bool) -> Result<BitList> {
        if target <= self.len {
            return Ok(self.clone());
        }
        let mut out = BitList::with_capacity(target)?;
        out.add_series(fill, target - self.len)?;
        out.extend_from_list(self)?;
        Ok(out)
    }

    /// Copy padded to `target` bits with fill appended
    pub fn pad_right(&self, target: usize, fill: bool) -> Result<BitList> {
        if target <= self.len {
            return Ok(self.clone());
        }
        let mut out = self.clone();
        out.add_series(fill, target - self.len)?;
        Ok(out)
    }

    /// Count the set bits
    pub fn count_ones(&self) -> usize {
        let whole = self.len / BITS_PER_WORD;
        let mut count: usize = self.words.as_slice()[..whole]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum();
        let rem = self.len % BITS_PER_WORD;
        if rem > 0 {
            count += (self.words[whole] & low_mask(rem)).count_ones() as usize;
        }
        count
    }

    /// Count the clear bits
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// Remove all bits, keeping the allocation
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }

    /// Release unused capacity
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.words.shrink_to_fit()
    }

    /// Copy out the storage words, trailing garbage masked to zero
    pub fn to_words(&self) -> Vec<u64> {
        let mut out: Vec<u64> = self.words.as_slice()[..word_count(self.len)].to_vec();
        let rem = self.len % BITS_PER_WORD;
        if rem > 0 {
            if let Some(last) = out.last_mut() {
                *last &= low_mask(rem);
            }
        }
        out
    }

    /// Pack the bits into bytes, eight per byte, least significant bit first
    ///
    /// The final partial byte, if any, is zero-padded high.
    pub fn to_bytes(&self) -> Vec<u8> {
        let nbytes = (self.len + BITS_PER_BYTE - 1) / BITS_PER_BYTE;
        let mut out = Vec::with_capacity(nbytes);
        for i in 0..nbytes {
            let pos = i * BITS_PER_BYTE;
            let n = BITS_PER_BYTE.min(self.len - pos);
            out.push(read_bits(&self.words, pos, n) as u8);
        }
        out
    }

    /// Iterate over the bits
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| unsafe { self.get_unchecked(i) })
    }
}

/// Chunked common-prefix length over raw word buffers; bounds already
/// validated by callers.
fn compare_chunks(
    a: &[u64],
    a_start: usize,
    b: &[u64],
    b_start: usize,
    length: usize,
) -> usize {
    let mut matched = 0;
    while matched < length {
        let chunk = BITS_PER_WORD.min(length - matched);
        let wa = read_bits(a, a_start + matched, chunk);
        let wb = read_bits(b, b_start + matched, chunk);
        let diff = wa ^ wb;
        if diff != 0 {
            return matched + diff.trailing_zeros() as usize;
        }
        matched += chunk;
    }
    length
}

impl Default for BitList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BitList {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            len: self.len,
        }
    }
}

impl PartialEq for BitList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.compare(other) == self.len
    }
}

impl Eq for BitList {}

impl FromIterator<bool> for BitList {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut list = BitList::new();
        for v in iter {
            list.push(v).expect("allocation for collected bit list");
        }
        list
    }
}

impl fmt::Debug for BitList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitList {{ len: {}, bits: [", self.len)?;
        for i in 0..self.len.min(BITS_PER_WORD) {
            write!(f, "{}", if self.get(i) == Some(true) { '1' } else { '0' })?;
        }
        if self.len > BITS_PER_WORD {
            write!(f, "...")?;
        }
        write!(f, "] }}")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BitList {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.len, self.to_words()).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BitList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (len, words) = <(usize, Vec<u64>)>::deserialize(deserializer)?;
        BitList::from_words_len(len, &words).map_err(serde::de::Error::custom)
    }
}
