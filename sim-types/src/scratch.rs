//! Scoped scratch memory.
//!
//! A `Scratch` owns one block obtained from a `MemoryAllocator` and returns it
//! in `Drop`, so every exit path of an engine (normal return, early exit on the
//! bound, `?` on a second failed allocation) releases what it acquired.
use std::{
    alloc::Layout,
    mem::size_of,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use crate::{alloc::MemoryAllocator, AllocError};

pub struct Scratch<'a, T: Copy, A: MemoryAllocator + ?Sized> {
    ptr: NonNull<T>,
    len: usize,
    alloc: &'a A,
}

impl<'a, T: Copy, A: MemoryAllocator + ?Sized> Scratch<'a, T, A> {
    /// Allocate `len` elements, each initialized to `value`.
    ///
    /// An empty buffer does not touch the allocator.
    pub fn filled(alloc: &'a A, len: usize, value: T) -> Result<Self, AllocError> {
        if len == 0 || size_of::<T>() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len,
                alloc,
            });
        }
        let layout = Layout::array::<T>(len).map_err(|_| AllocError { bytes: usize::MAX })?;
        let Some(raw) = alloc.allocate(layout) else {
            log::warn!("scratch allocation of {} bytes failed", layout.size());
            return Err(AllocError {
                bytes: layout.size(),
            });
        };
        let ptr = raw.cast::<T>();
        for i in 0..len {
            // SAFETY: `i < len` and the block holds `len` elements of `T`.
            unsafe { ptr.as_ptr().add(i).write(value) };
        }
        Ok(Self { ptr, len, alloc })
    }

    fn layout(&self) -> Option<Layout> {
        if self.len == 0 || size_of::<T>() == 0 {
            None
        } else {
            Layout::array::<T>(self.len).ok()
        }
    }
}

impl<T: Copy, A: MemoryAllocator + ?Sized> Deref for Scratch<'_, T, A> {
    type Target = [T];
    #[inline(always)]
    fn deref(&self) -> &[T] {
        // SAFETY: `ptr` is either dangling with `len == 0`, or points to `len`
        // initialized elements owned by `self`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy, A: MemoryAllocator + ?Sized> DerefMut for Scratch<'_, T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy, A: MemoryAllocator + ?Sized> Drop for Scratch<'_, T, A> {
    fn drop(&mut self) {
        if let Some(layout) = self.layout() {
            // SAFETY: the block was obtained from `alloc` with this layout.
            unsafe { self.alloc.free(self.ptr.cast(), layout) };
        }
    }
}

/// `R` equally sized rows (or diagonals) carved out of a single `Scratch`.
///
/// `rotate` cycles the roles of the rows by permuting indices; row contents
/// never move.
pub struct Rows<'a, T: Copy, A: MemoryAllocator + ?Sized, const R: usize> {
    buf: Scratch<'a, T, A>,
    width: usize,
    order: [usize; R],
}

impl<'a, T: Copy, A: MemoryAllocator + ?Sized, const R: usize> Rows<'a, T, A, R> {
    pub fn new(alloc: &'a A, width: usize, value: T) -> Result<Self, AllocError> {
        assert!(width > 0, "rows must hold at least one cell");
        let len = width.checked_mul(R).ok_or(AllocError { bytes: usize::MAX })?;
        Ok(Self {
            buf: Scratch::filled(alloc, len, value)?,
            width,
            order: std::array::from_fn(|k| k),
        })
    }

    /// The row currently in role `k`.
    #[inline(always)]
    pub fn row(&self, k: usize) -> &[T] {
        let start = self.order[k] * self.width;
        &self.buf[start..start + self.width]
    }

    #[inline(always)]
    pub fn row_mut(&mut self, k: usize) -> &mut [T] {
        let start = self.order[k] * self.width;
        &mut self.buf[start..start + self.width]
    }

    /// All rows at once, ordered by role.
    #[inline(always)]
    pub fn split(&mut self) -> [&mut [T]; R] {
        let order = self.order;
        let mut parts: [Option<&mut [T]>; R] = std::array::from_fn(|_| None);
        for (part, chunk) in parts.iter_mut().zip(self.buf.chunks_exact_mut(self.width)) {
            *part = Some(chunk);
        }
        std::array::from_fn(|k| {
            parts[order[k]]
                .take()
                .expect("every region is handed out exactly once")
        })
    }

    /// Role `k` moves to row `k-1`; row 0 becomes the last one.
    #[inline(always)]
    pub fn rotate(&mut self) {
        self.order.rotate_left(1);
    }
}
