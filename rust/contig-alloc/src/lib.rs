//! Pluggable allocation strategies over element-typed memory blocks.
//!
//! A [`BlockAllocator`] hands out, resizes and releases raw blocks sized in
//! element units. The strategy is selected at compile time as a type
//! parameter of the consuming buffer, so allocation calls carry no runtime
//! dispatch. Three interchangeable variants are provided:
//!
//! - [`HeapAllocator`] — the Rust global allocator.
//! - [`AlignedHeapAllocator`] — the global allocator with an explicit
//!   power-of-two alignment on every block.
//! - [`CAllocator`] — the C heap (`malloc`/`realloc`/`free`), for blocks
//!   that foreign code may release on its own.

use std::alloc::Layout;
use std::ptr::NonNull;

use contig_common::{Error, Result};

pub mod heap;
pub mod interop;

#[cfg(test)]
mod tests;

pub use heap::{AlignedHeapAllocator, HeapAllocator};
pub use interop::CAllocator;

/// A compile-time allocation strategy over raw, element-typed memory blocks.
///
/// Implementations are stateless (or carry a single configuration field),
/// are cheap to copy, and retain nothing between calls. Blocks are sized in
/// element counts; the byte size of a block is `count * size_of::<T>()`.
///
/// Zero-byte requests (a zero count, or a zero-sized element type) never
/// reach the system allocator: `allocate` returns a dangling sentinel and
/// `free` of such a block is a no-op.
///
/// # Safety
///
/// Implementations must return blocks valid for reads and writes of `count`
/// elements, and `reallocate` must preserve the bytes of the first
/// `min(old_count, new_count)` elements. Callers must release every block
/// through the same allocator value (or an identically configured one), with
/// the element count it was last (re)allocated with. Releasing a block twice,
/// or releasing a pointer the allocator did not hand out, is undefined
/// behavior.
pub unsafe trait BlockAllocator {
    /// Allocates a fresh block sized for `count` elements of `T`.
    ///
    /// The contents of the block are uninitialized.
    ///
    /// # Errors
    ///
    /// `CapacityOverflow` if the byte size overflows the address space,
    /// `MemoryExhausted` if the underlying allocator cannot satisfy the
    /// request.
    ///
    /// # Safety
    ///
    /// The returned block must later be released via [`free`] (or resized
    /// via [`reallocate`]) on this same allocator variant.
    ///
    /// [`free`]: BlockAllocator::free
    /// [`reallocate`]: BlockAllocator::reallocate
    unsafe fn allocate<T>(&self, count: usize) -> Result<NonNull<T>>;

    /// Resizes `block` from `old_count` to `new_count` elements, preserving
    /// the bytes of the first `min(old_count, new_count)` elements.
    ///
    /// The returned pointer may equal `block` or may be a new address; on
    /// success the old address must be treated as invalid. On failure the
    /// original block remains valid and untouched.
    ///
    /// # Safety
    ///
    /// `block` must have been obtained from this allocator variant with a
    /// count of `old_count`.
    unsafe fn reallocate<T>(
        &self,
        block: NonNull<T>,
        old_count: usize,
        new_count: usize,
    ) -> Result<NonNull<T>>;

    /// Releases `block`.
    ///
    /// # Safety
    ///
    /// `block` must have been obtained from this allocator variant with a
    /// count of `count`, and must not have been released already.
    unsafe fn free<T>(&self, block: NonNull<T>, count: usize);
}

/// Computes the layout of a block holding `count` elements of `T`.
pub(crate) fn array_layout<T>(count: usize) -> Result<Layout> {
    Layout::array::<T>(count).map_err(|_| Error::capacity_overflow())
}

/// Computes the layout of a block holding `count` elements of `T`, aligned
/// to at least `alignment` bytes.
pub(crate) fn aligned_array_layout<T>(count: usize, alignment: usize) -> Result<Layout> {
    debug_assert!(alignment.is_power_of_two());
    let base = array_layout::<T>(count)?;
    let align = alignment.max(align_of::<T>());
    Layout::from_size_align(base.size(), align).map_err(|_| Error::capacity_overflow())
}
