//! FastVec: growable buffer using realloc for growth
//!
//! Backing store for both collection subsystems. Unlike `std::Vec`, growth
//! goes through `realloc`, which can often extend in place instead of
//! allocating and copying. Capacity is monotonic: removal never shrinks the
//! buffer; `shrink_to_fit` is the explicit trim.

use crate::error::{BitsumError, Result};
use std::alloc::{self, Layout};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice;

/// Growable buffer with realloc-based amortized doubling
///
/// # Examples
///
/// ```rust
/// use bitsum::FastVec;
///
/// let mut vec = FastVec::new();
/// vec.push(42u64)?;
/// vec.push(84)?;
/// assert_eq!(vec.len(), 2);
/// assert_eq!(vec[0], 42);
/// # Ok::<(), bitsum::BitsumError>(())
/// ```
pub struct FastVec<T> {
    data: Option<NonNull<T>>,
    len: usize,
    cap: usize,
}

impl<T> FastVec<T> {
    /// Create a new empty vector
    #[inline]
    pub fn new() -> Self {
        Self {
            data: None,
            len: 0,
            cap: 0,
        }
    }

    /// Create a vector with the specified capacity
    pub fn with_capacity(cap: usize) -> Result<Self> {
        let mut vec = Self::new();
        if cap > 0 {
            vec.grow_to(cap)?;
        }
        Ok(vec)
    }

    /// Create a vector of `size` copies of `value`
    pub fn with_size(size: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(size)?;
        vec.resize(size, value)?;
        Ok(vec)
    }

    /// Create a vector by copying a slice
    pub fn from_slice(values: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(values.len())?;
        vec.extend_from_slice(values)?;
        Ok(vec)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the vector is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current capacity in elements
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    fn base(&self) -> *const T {
        match self.data {
            Some(p) => p.as_ptr(),
            None => ptr::null(),
        }
    }

    #[inline]
    fn base_mut(&mut self) -> *mut T {
        match self.data {
            Some(p) => p.as_ptr(),
            None => ptr::null_mut(),
        }
    }

    /// View the contents as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.len == 0 {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.base(), self.len) }
        }
    }

    /// View the contents as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.len == 0 {
            &mut []
        } else {
            unsafe { slice::from_raw_parts_mut(self.base_mut(), self.len) }
        }
    }

    /// Reserve space for at least `additional` more elements
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or_else(|| BitsumError::out_of_memory(usize::MAX))?;
        self.ensure_capacity(required)
    }

    /// Ensure the vector has at least the specified capacity
    pub fn ensure_capacity(&mut self, min_cap: usize) -> Result<()> {
        if min_cap <= self.cap {
            return Ok(());
        }
        // Amortized doubling, measured in elements.
        self.grow_to(min_cap.max(self.cap.saturating_mul(2)))
    }

    fn grow_to(&mut self, new_cap: usize) -> Result<()> {
        debug_assert!(new_cap > self.cap);
        let new_layout = Layout::array::<T>(new_cap)
            .map_err(|_| BitsumError::out_of_memory(new_cap.saturating_mul(mem::size_of::<T>())))?;

        let new_data = match self.data {
            Some(p) if self.cap > 0 => {
                let old_layout = Layout::array::<T>(self.cap).unwrap();
                unsafe {
                    alloc::realloc(p.as_ptr() as *mut u8, old_layout, new_layout.size()) as *mut T
                }
            }
            _ => unsafe { alloc::alloc(new_layout) as *mut T },
        };

        let new_data =
            NonNull::new(new_data).ok_or_else(|| BitsumError::out_of_memory(new_layout.size()))?;
        self.data = Some(new_data);
        self.cap = new_cap;
        Ok(())
    }

    /// Push an element to the end
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.len == self.cap {
            self.ensure_capacity(self.len + 1)?;
        }
        unsafe {
            ptr::write(self.base_mut().add(self.len), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Pop an element from the end
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { ptr::read(self.base().add(self.len)) })
    }

    /// Insert an element at `index`, shifting later elements right
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(BitsumError::out_of_bounds(index, self.len));
        }
        if self.len == self.cap {
            self.ensure_capacity(self.len + 1)?;
        }
        unsafe {
            let p = self.base_mut().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements left
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(BitsumError::out_of_bounds(index, self.len));
        }
        unsafe {
            let p = self.base_mut().add(index);
            let value = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Remove `length` elements starting at `start`, shifting later elements left
    pub fn remove_range(&mut self, start: usize, length: usize) -> Result<()> {
        crate::error::check_range(start, length, self.len)?;
        if length == 0 {
            return Ok(());
        }
        unsafe {
            let p = self.base_mut().add(start);
            for i in 0..length {
                ptr::drop_in_place(p.add(i));
            }
            ptr::copy(p.add(length), p, self.len - start - length);
        }
        self.len -= length;
        Ok(())
    }

    /// Resize to `new_len`, filling with clones of `value` when growing
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        if new_len > self.len {
            self.ensure_capacity(new_len)?;
            for i in self.len..new_len {
                unsafe {
                    ptr::write(self.base_mut().add(i), value.clone());
                }
            }
            self.len = new_len;
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Shorten the vector to `new_len`, dropping excess elements
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        for i in new_len..self.len {
            unsafe {
                ptr::drop_in_place(self.base_mut().add(i));
            }
        }
        self.len = new_len;
    }

    /// Remove all elements, keeping the allocation
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Append clones of all elements of `values`
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()>
    where
        T: Clone,
    {
        self.reserve(values.len())?;
        for value in values {
            unsafe {
                ptr::write(self.base_mut().add(self.len), value.clone());
            }
            self.len += 1;
        }
        Ok(())
    }

    /// Release unused capacity
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.len == self.cap {
            return Ok(());
        }
        if self.len == 0 {
            self.release();
            return Ok(());
        }
        let new_layout = Layout::array::<T>(self.len)
            .map_err(|_| BitsumError::out_of_memory(self.len * mem::size_of::<T>()))?;
        let data = self.data.expect("non-empty vector owns a buffer");
        let old_layout = Layout::array::<T>(self.cap).unwrap();
        let new_data = unsafe {
            alloc::realloc(data.as_ptr() as *mut u8, old_layout, new_layout.size()) as *mut T
        };
        let new_data =
            NonNull::new(new_data).ok_or_else(|| BitsumError::out_of_memory(new_layout.size()))?;
        self.data = Some(new_data);
        self.cap = self.len;
        Ok(())
    }

    fn release(&mut self) {
        if let Some(p) = self.data {
            if self.cap > 0 {
                unsafe {
                    let layout = Layout::array::<T>(self.cap).unwrap();
                    alloc::dealloc(p.as_ptr() as *mut u8, layout);
                }
            }
        }
        self.data = None;
        self.cap = 0;
    }

    /// Get a reference without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < self.len()`
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.base().add(index) }
    }

    /// Get a mutable reference without bounds checking
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < self.len()`
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.base_mut().add(index) }
    }
}

impl<T> Default for FastVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for FastVec<T> {
    fn drop(&mut self) {
        self.clear();
        self.release();
    }
}

impl<T> Deref for FastVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for FastVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for FastVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for FastVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for FastVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for FastVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for FastVec<T> {}

impl<T: Clone> Clone for FastVec<T> {
    fn clone(&self) -> Self {
        let mut new_vec = Self::new();
        new_vec
            .extend_from_slice(self.as_slice())
            .expect("allocation for clone");
        new_vec
    }
}

// Safety: FastVec<T> owns its buffer exclusively, so it inherits T's
// thread-safety the same way Vec<T> does.
unsafe impl<T: Send> Send for FastVec<T> {}
unsafe impl<T: Sync> Sync for FastVec<T> {}
