//! The pluggable allocator every engine borrows for the duration of a call.
//!
//! Engines never allocate through anything else: rows, diagonals and decoded
//! codepoints all come from a `MemoryAllocator`, and are handed back before the
//! call returns. See `scratch` for the RAII wrappers that guarantee this.
use std::{
    alloc::Layout,
    ptr::NonNull,
    sync::atomic::{AtomicUsize, Ordering},
};

pub trait MemoryAllocator {
    /// Allocate a block for `layout`, which has non-zero size.
    /// Returns `None` when no memory is available.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Release a block.
    ///
    /// # Safety
    /// `ptr` must have been returned by `allocate` on this allocator with the
    /// same `layout`, and must not be used afterwards.
    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: MemoryAllocator + ?Sized> MemoryAllocator for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }
    #[inline]
    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).free(ptr, layout)
    }
}

/// Forwards to the process allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalAllocator;

impl MemoryAllocator for GlobalAllocator {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() > 0);
        // SAFETY: the layout has non-zero size.
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout)
    }
}

/// Wraps an allocator and keeps statistics on its use.
///
/// Optionally refuses any request that would push the number of live bytes
/// over `limit`, which makes allocation failures reproducible in tests.
#[derive(Debug, Default)]
pub struct CountingAllocator<A = GlobalAllocator> {
    inner: A,
    limit: Option<usize>,
    live_blocks: AtomicUsize,
    live_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
    total_blocks: AtomicUsize,
    failures: AtomicUsize,
}

impl CountingAllocator<GlobalAllocator> {
    pub fn new() -> Self {
        Self::wrap(GlobalAllocator)
    }

    /// Fail every allocation that would exceed `limit` live bytes.
    pub fn with_limit(limit: usize) -> Self {
        let mut a = Self::new();
        a.limit = Some(limit);
        a
    }
}

impl<A: MemoryAllocator> CountingAllocator<A> {
    pub fn wrap(inner: A) -> Self {
        Self {
            inner,
            limit: None,
            live_blocks: AtomicUsize::new(0),
            live_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
            total_blocks: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    /// Blocks allocated and not yet freed.
    pub fn live_blocks(&self) -> usize {
        self.live_blocks.load(Ordering::Relaxed)
    }
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Relaxed)
    }
    /// The largest number of bytes that was ever live at once.
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }
    /// Number of successful allocations.
    pub fn total_blocks(&self) -> usize {
        self.total_blocks.load(Ordering::Relaxed)
    }
    /// Number of refused allocations.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

impl<A: MemoryAllocator> MemoryAllocator for CountingAllocator<A> {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let live = self.live_bytes.load(Ordering::Relaxed);
        if self.limit.is_some_and(|limit| live + layout.size() > limit) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            return None;
        }
        let Some(ptr) = self.inner.allocate(layout) else {
            self.failures.fetch_add(1, Ordering::Relaxed);
            return None;
        };
        let live = self.live_bytes.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
        self.peak_bytes.fetch_max(live, Ordering::Relaxed);
        self.live_blocks.fetch_add(1, Ordering::Relaxed);
        self.total_blocks.fetch_add(1, Ordering::Relaxed);
        Some(ptr)
    }

    unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live_bytes.fetch_sub(layout.size(), Ordering::Relaxed);
        self.live_blocks.fetch_sub(1, Ordering::Relaxed);
        self.inner.free(ptr, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting() {
        let a = CountingAllocator::new();
        let layout = Layout::array::<u64>(16).unwrap();
        let p = a.allocate(layout).unwrap();
        assert_eq!(a.live_blocks(), 1);
        assert_eq!(a.live_bytes(), 128);
        unsafe { a.free(p, layout) };
        assert_eq!(a.live_blocks(), 0);
        assert_eq!(a.live_bytes(), 0);
        assert_eq!(a.peak_bytes(), 128);
        assert_eq!(a.total_blocks(), 1);
    }

    #[test]
    fn limit() {
        let a = CountingAllocator::with_limit(100);
        let small = Layout::array::<u8>(60).unwrap();
        let p = a.allocate(small).unwrap();
        assert!(a.allocate(small).is_none());
        assert_eq!(a.failures(), 1);
        unsafe { a.free(p, small) };
        let q = a.allocate(small).unwrap();
        unsafe { a.free(q, small) };
        assert_eq!(a.live_blocks(), 0);
    }
}
