use core::alloc::Layout;
use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

#[cfg(feature = "alloc")]
use alloc::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};

use const_default::ConstDefault;

use crate::error::StorageError;

use super::utils::layout_aligned_bytes;
use super::ByteStorage;

/// A source of raw memory for buffers.
///
/// Requests are described by a [`Layout`] carrying the byte size and
/// alignment of the block.
pub trait RawAlloc: fmt::Debug {
    /// Try to allocate a block of memory satisfying `layout`. The returned
    /// slice may be larger than requested.
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError>;

    /// Release a block of memory produced by this allocator.
    ///
    /// # Safety
    /// The value `ptr` must represent an allocation produced by this
    /// allocator, and `layout` must be the layout which was requested for it.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        (**self).try_alloc(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }
}

/// Conversion of a value into the allocator handle held by a buffer.
pub trait RawAllocIn: Sized {
    /// The allocator type produced
    type RawAlloc: RawAlloc;

    /// Convert this value into an allocator handle.
    fn into_raw_alloc(self) -> Self::RawAlloc;
}

impl<A: RawAlloc> RawAllocIn for A {
    type RawAlloc = A;

    #[inline]
    fn into_raw_alloc(self) -> Self::RawAlloc {
        self
    }
}

impl<'a, T, const N: usize> RawAllocIn for &'a mut ByteStorage<T, N> {
    type RawAlloc = FixedAlloc<'a>;

    #[inline]
    fn into_raw_alloc(self) -> Self::RawAlloc {
        FixedAlloc::new(self)
    }
}

/// The global memory allocator.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Global;

impl ConstDefault for Global {
    const DEFAULT: Self = Global;
}

#[cfg(feature = "alloc")]
impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        let ptr = if layout.size() == 0 {
            // SAFETY: layout alignments are guaranteed to be non-zero.
            unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
        } else {
            let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
                return Err(StorageError::AllocError);
            };
            ptr
        };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            raw_dealloc(ptr.as_ptr(), layout);
        }
    }
}

#[cfg(not(feature = "alloc"))]
// Without the `alloc` feature there is no global heap; `Global` remains
// available as the default allocator type but refuses every request.
impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, _layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        Err(StorageError::Unsupported)
    }

    #[inline]
    unsafe fn release(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

/// An allocator serving a single block from caller-provided [`ByteStorage`].
///
/// Only one block may be outstanding at a time: a buffer backed by this
/// allocator must reserve its full capacity up front, as growing requires a
/// second block while the first is still in use.
#[derive(Debug)]
pub struct FixedAlloc<'a> {
    start: NonNull<u8>,
    len: usize,
    in_use: Cell<bool>,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> FixedAlloc<'a> {
    /// Create an allocator over the bytes of `storage`.
    pub fn new<T, const N: usize>(storage: &'a mut ByteStorage<T, N>) -> Self {
        let bytes = storage.as_uninit_slice();
        Self {
            start: NonNull::from(bytes).cast(),
            len: N,
            in_use: Cell::new(false),
            _marker: PhantomData,
        }
    }

    /// Check whether the block is currently handed out.
    #[inline]
    pub fn is_in_use(&self) -> bool {
        self.in_use.get()
    }
}

impl RawAlloc for FixedAlloc<'_> {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        if self.in_use.get() {
            return Err(StorageError::CapacityLimit);
        }
        let block = layout_aligned_bytes(self.start, self.len, layout)?;
        self.in_use.set(true);
        Ok(block)
    }

    #[inline]
    unsafe fn release(&self, _ptr: NonNull<u8>, _layout: Layout) {
        self.in_use.set(false);
    }
}
