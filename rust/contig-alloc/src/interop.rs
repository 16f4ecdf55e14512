//! An allocation strategy backed by the C heap.

use std::ptr::NonNull;

use contig_common::{Error, Result};

use crate::BlockAllocator;

/// The interop heap strategy: blocks come from `malloc`/`realloc` and are
/// released with `free`.
///
/// Use this variant when a block's ownership may cross a foreign-function
/// boundary: any code linked against the C runtime can release the block
/// with plain `free`, without knowing this library's allocator types.
///
/// Element types must not require more alignment than the C allocator's
/// fundamental guarantee ([`CAllocator::FUNDAMENTAL_ALIGNMENT`]); this is
/// asserted in debug builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct CAllocator;

impl CAllocator {
    /// The strongest alignment `malloc` is required to honor
    /// (`alignof(max_align_t)` on mainstream platforms).
    pub const FUNDAMENTAL_ALIGNMENT: usize = 16;
}

unsafe impl BlockAllocator for CAllocator {
    unsafe fn allocate<T>(&self, count: usize) -> Result<NonNull<T>> {
        debug_assert!(align_of::<T>() <= Self::FUNDAMENTAL_ALIGNMENT);
        let layout = crate::array_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        let ptr = unsafe { libc::malloc(layout.size()) };
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
        let ptr = unsafe { libc::realloc(block.as_ptr().cast(), new_layout.size()) };
        NonNull::new(ptr.cast()).ok_or_else(|| Error::memory_exhausted(new_layout.size()))
    }

    unsafe fn free<T>(&self, block: NonNull<T>, count: usize) {
        if size_of::<T>() == 0 || count == 0 {
            return;
        }
        unsafe { libc::free(block.as_ptr().cast()) };
    }
}
