use std::ptr::NonNull;

use crate::{AlignedHeapAllocator, BlockAllocator, CAllocator, HeapAllocator};

fn fill(block: NonNull<u64>, count: usize) {
    for i in 0..count {
        unsafe { block.as_ptr().add(i).write(i as u64) };
    }
}

fn check_prefix(block: NonNull<u64>, count: usize) {
    for i in 0..count {
        assert_eq!(unsafe { block.as_ptr().add(i).read() }, i as u64);
    }
}

fn roundtrip(alloc: impl BlockAllocator) {
    unsafe {
        let block = alloc.allocate::<u64>(16).expect("allocate");
        fill(block, 16);
        check_prefix(block, 16);

        let block = alloc.reallocate(block, 16, 64).expect("grow");
        check_prefix(block, 16);
        fill(block, 64);

        let block = alloc.reallocate(block, 64, 8).expect("shrink");
        check_prefix(block, 8);

        alloc.free(block, 8);
    }
}

#[test]
fn test_heap_roundtrip() {
    roundtrip(HeapAllocator);
}

#[test]
fn test_aligned_roundtrip() {
    roundtrip(AlignedHeapAllocator::default());
    roundtrip(AlignedHeapAllocator::new(256));
}

#[test]
fn test_c_roundtrip() {
    roundtrip(CAllocator);
}

#[test]
fn test_aligned_blocks_honor_alignment() {
    let alloc = AlignedHeapAllocator::new(64);
    unsafe {
        let block = alloc.allocate::<u8>(10).expect("allocate");
        assert!((block.as_ptr() as usize).is_multiple_of(64));
        let block = alloc.reallocate(block, 10, 1000).expect("reallocate");
        assert!((block.as_ptr() as usize).is_multiple_of(64));
        alloc.free(block, 1000);
    }
}

#[test]
fn test_default_alignment_is_32() {
    assert_eq!(AlignedHeapAllocator::default().alignment(), 32);
    unsafe {
        let block = AlignedHeapAllocator::default()
            .allocate::<u8>(3)
            .expect("allocate");
        assert!((block.as_ptr() as usize).is_multiple_of(32));
        AlignedHeapAllocator::default().free(block, 3);
    }
}

#[test]
fn test_zero_count_yields_sentinel() {
    unsafe {
        let block = HeapAllocator.allocate::<u64>(0).expect("allocate");
        assert_eq!(block, NonNull::dangling());
        // Releasing the sentinel is a no-op.
        HeapAllocator.free(block, 0);
    }
}

#[test]
fn test_zero_sized_elements_yield_sentinel() {
    unsafe {
        let block = HeapAllocator.allocate::<()>(128).expect("allocate");
        assert_eq!(block, NonNull::<()>::dangling());
        HeapAllocator.free(block, 128);
    }
}

#[test]
fn test_realloc_from_sentinel_allocates() {
    unsafe {
        let block = HeapAllocator.allocate::<u64>(0).expect("allocate");
        let block = HeapAllocator.reallocate(block, 0, 4).expect("reallocate");
        fill(block, 4);
        check_prefix(block, 4);
        HeapAllocator.free(block, 4);
    }
}

#[test]
fn test_realloc_to_zero_frees() {
    unsafe {
        let block = CAllocator.allocate::<u64>(4).expect("allocate");
        let block = CAllocator.reallocate(block, 4, 0).expect("reallocate");
        assert_eq!(block, NonNull::dangling());
    }
}

#[test]
fn test_c_blocks_are_freeable_by_foreign_code() {
    unsafe {
        let block = CAllocator.allocate::<u32>(8).expect("allocate");
        block.as_ptr().write(0xDEAD_BEEF);
        // A consumer that only knows the C runtime can release the block.
        libc::free(block.as_ptr().cast());
    }
}
