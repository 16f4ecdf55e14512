//! Allocation strategies backed by the Rust global allocator.

use std::alloc;
use std::ptr::NonNull;

use contig_common::{Error, Result};

use crate::BlockAllocator;

/// The plain heap strategy: blocks come from the Rust global allocator with
/// the element type's natural alignment.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

unsafe impl BlockAllocator for HeapAllocator {
    unsafe fn allocate<T>(&self, count: usize) -> Result<NonNull<T>> {
        let layout = crate::array_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast()).ok_or_else(|| Error::memory_exhausted(layout.size()))
    }

    unsafe fn reallocate<T>(
        &self,
        block: NonNull<T>,
        old_count: usize,
        new_count: usize,
    ) -> Result<NonNull<T>> {
        let old_layout = crate::array_layout::<T>(old_count)?;
        let new_layout = crate::array_layout::<T>(new_count)?;
        if old_layout.size() == 0 {
            return unsafe { self.allocate(new_count) };
        }
        if new_layout.size() == 0 {
            unsafe { self.free(block, old_count) };
            return Ok(NonNull::dangling());
        }
        let ptr = unsafe { alloc::realloc(block.as_ptr().cast(), old_layout, new_layout.size()) };
        NonNull::new(ptr.cast()).ok_or_else(|| Error::memory_exhausted(new_layout.size()))
    }

    unsafe fn free<T>(&self, block: NonNull<T>, count: usize) {
        let Ok(layout) = alloc::Layout::array::<T>(count) else {
            return;
        };
        if layout.size() != 0 {
            unsafe { alloc::dealloc(block.as_ptr().cast(), layout) };
        }
    }
}

/// The aligned heap strategy: every block is aligned to a caller-chosen
/// power-of-two byte boundary (at least the element type's own alignment).
///
/// The alignment is fixed per allocator value; blocks must be resized and
/// released through an allocator configured with the same alignment.
#[derive(Clone, Copy, Debug)]
pub struct AlignedHeapAllocator {
    alignment: usize,
}

impl AlignedHeapAllocator {
    /// The alignment used by [`AlignedHeapAllocator::default`].
    pub const DEFAULT_ALIGNMENT: usize = 32;

    /// Creates a strategy aligning every block to `alignment` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two.
    pub fn new(alignment: usize) -> AlignedHeapAllocator {
        assert!(
            alignment.is_power_of_two(),
            "alignment must be a power of two, got {alignment}"
        );
        AlignedHeapAllocator { alignment }
    }

    /// Returns the configured block alignment in bytes.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }
}

impl Default for AlignedHeapAllocator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALIGNMENT)
    }
}

unsafe impl BlockAllocator for AlignedHeapAllocator {
    unsafe fn allocate<T>(&self, count: usize) -> Result<NonNull<T>> {
        let layout = crate::aligned_array_layout::<T>(count, self.alignment)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast()).ok_or_else(|| Error::memory_exhausted(layout.size()))
    }

    unsafe fn reallocate<T>(
        &self,
        block: NonNull<T>,
        old_count: usize,
        new_count: usize,
    ) -> Result<NonNull<T>> {
        let old_layout = crate::aligned_array_layout::<T>(old_count, self.alignment)?;
        let new_layout = crate::aligned_array_layout::<T>(new_count, self.alignment)?;
        if old_layout.size() == 0 {
            return unsafe { self.allocate(new_count) };
        }
        if new_layout.size() == 0 {
            unsafe { self.free(block, old_count) };
            return Ok(NonNull::dangling());
        }
        // `realloc` keeps the alignment of the layout it is handed.
        let ptr = unsafe { alloc::realloc(block.as_ptr().cast(), old_layout, new_layout.size()) };
        NonNull::new(ptr.cast()).ok_or_else(|| Error::memory_exhausted(new_layout.size()))
    }

    unsafe fn free<T>(&self, block: NonNull<T>, count: usize) {
        let Ok(layout) = crate::aligned_array_layout::<T>(count, self.alignment) else {
            return;
        };
        if layout.size() != 0 {
            unsafe { alloc::dealloc(block.as_ptr().cast(), layout) };
        }
    }
}
