use std::borrow::Borrow;
use std::ops::{Deref, DerefMut, Index, IndexMut};

use bytemuck::AnyBitPattern;
use contig_common::Result;

use crate::raw_vec::RawVec;

/// An owning growable vector on the plain heap strategy.
///
/// `NativeVec` wraps a single [`RawVec`] configured with the plain heap
/// allocator and the default growth factor, and ties the block's release to
/// its own lifetime: dropping the vector frees the block, exactly once.
/// There is no disposal flag to check and no way to tear the block down
/// twice — ownership moves with the value, and [`RawVec::free`] resets the
/// buffer to its empty state, so even an explicit [`free`] followed by drop
/// releases nothing twice.
///
/// Cloning allocates a fresh block and copies the elements into it; two
/// clones never share a block.
///
/// [`free`]: NativeVec::free
pub struct NativeVec<T> {
    buf: RawVec<T>,
}

impl<T> NativeVec<T> {
    /// Creates an empty vector. No memory is allocated until elements
    /// arrive.
    pub fn new() -> NativeVec<T> {
        NativeVec { buf: RawVec::new() }
    }

    /// Creates an empty vector with `capacity` elements preallocated.
    pub fn with_capacity(capacity: usize) -> Result<NativeVec<T>> {
        Ok(NativeVec {
            buf: RawVec::with_capacity(capacity)?,
        })
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of elements the vector can hold without
    /// reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Ensures the capacity is at least `min_capacity`; see
    /// [`RawVec::reserve`].
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        self.buf.reserve(min_capacity)
    }

    /// Sets the length, growing the block if needed; newly exposed content
    /// is unspecified. See [`RawVec::resize`].
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        self.buf.resize(new_len)
    }

    /// Sets the length like [`resize`](NativeVec::resize), zero-filling any
    /// newly exposed range.
    pub fn resize_zeroed(&mut self, new_len: usize) -> Result<()> {
        self.buf.resize_zeroed(new_len)
    }

    /// Reallocates the block down to exactly the current length.
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.buf.shrink_to_fit()
    }

    /// Empties the vector without touching the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Releases the owned block now instead of at drop.
    ///
    /// The vector remains usable and empty; a later drop finds nothing left
    /// to release.
    pub fn free(&mut self) {
        self.buf.free();
    }
}

impl<T: AnyBitPattern> NativeVec<T> {
    /// Creates a vector holding a copy of `values`, preallocating exactly
    /// `values.len()` elements and appending them in one bulk copy.
    pub fn from_slice(values: &[T]) -> Result<NativeVec<T>> {
        let mut vec = NativeVec::with_capacity(values.len())?;
        vec.extend_from_slice(values)?;
        Ok(vec)
    }

    /// Appends one element.
    pub fn push(&mut self, value: T) -> Result<()> {
        self.buf.push(value)
    }

    /// Appends all elements of `values`, growing at most once.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()> {
        self.buf.extend_from_slice(values)
    }

    /// Bulk-copies all elements into the front of `dest`; see
    /// [`RawVec::copy_to`].
    pub fn copy_to(&self, dest: &mut [T]) -> Result<()> {
        self.buf.copy_to(dest)
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    /// Returns the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    /// Returns a reference to the element at `index`, or `None` if out of
    /// bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf.get_mut(index)
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buf.iter()
    }

    /// Returns an iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }
}

impl<T> Drop for NativeVec<T> {
    fn drop(&mut self) {
        self.buf.free();
    }
}

impl<T> Default for NativeVec<T> {
    fn default() -> Self {
        NativeVec::new()
    }
}

impl<T: AnyBitPattern> Clone for NativeVec<T> {
    fn clone(&self) -> NativeVec<T> {
        NativeVec::from_slice(self.as_slice()).expect("alloc")
    }
}

impl<T: AnyBitPattern> From<&[T]> for NativeVec<T> {
    fn from(values: &[T]) -> Self {
        NativeVec::from_slice(values).expect("alloc")
    }
}

impl<T: AnyBitPattern> Extend<T> for NativeVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        if low > 0 {
            let _ = self.reserve(self.len().saturating_add(low));
        }
        for value in iter {
            self.push(value).expect("alloc");
        }
    }
}

impl<T: AnyBitPattern> FromIterator<T> for NativeVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = NativeVec::new();
        vec.extend(iter);
        vec
    }
}

impl<T: AnyBitPattern> Deref for NativeVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: AnyBitPattern> DerefMut for NativeVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: AnyBitPattern> Index<usize> for NativeVec<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.buf[index]
    }
}

impl<T: AnyBitPattern> IndexMut<usize> for NativeVec<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.buf[index]
    }
}

impl<T: AnyBitPattern> AsRef<[T]> for NativeVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: AnyBitPattern> Borrow<[T]> for NativeVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T: AnyBitPattern> IntoIterator for &'a NativeVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: AnyBitPattern> IntoIterator for &'a mut NativeVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: AnyBitPattern + PartialEq> PartialEq for NativeVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: AnyBitPattern + Eq> Eq for NativeVec<T> {}

impl<T: AnyBitPattern + std::fmt::Debug> std::fmt::Debug for NativeVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NativeVec").field(&self.as_slice()).finish()
    }
}
