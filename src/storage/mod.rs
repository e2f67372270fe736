//! Memory sources for buffers.

use core::fmt;
use core::mem::{ManuallyDrop, MaybeUninit};

pub(crate) mod alloc;

pub(crate) mod utils;

#[cfg(feature = "allocator-api2")]
mod api;

#[cfg(feature = "zeroize")]
mod zero;

pub use self::alloc::{FixedAlloc, Global, RawAlloc, RawAllocIn};

#[cfg(feature = "allocator-api2")]
pub use self::api::ApiAlloc;

#[cfg(feature = "zeroize")]
pub use self::zero::ZeroizingAlloc;

/// A block of `N` uninitialized bytes aligned for values of type `T`,
/// usable as the backing memory of a [`FixedAlloc`].
#[repr(C)]
pub union ByteStorage<T, const N: usize> {
    _align: [ManuallyDrop<T>; 0],
    data: [MaybeUninit<u8>; N],
}

impl<T, const N: usize> ByteStorage<T, N> {
    /// Create a new, uninitialized block.
    pub const fn new() -> Self {
        Self {
            data: [MaybeUninit::uninit(); N],
        }
    }

    pub(crate) fn as_uninit_slice(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: every bit pattern is valid for `MaybeUninit<u8>`
        unsafe { &mut self.data }
    }
}

impl<T, const N: usize> Default for ByteStorage<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for ByteStorage<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStorage").finish_non_exhaustive()
    }
}

/// Create a block of `N` uninitialized bytes.
pub const fn byte_storage<const N: usize>() -> ByteStorage<u8, N> {
    ByteStorage::<u8, N>::new()
}

/// Create a block of `N` uninitialized bytes aligned for values of type `T`.
pub const fn aligned_byte_storage<T, const N: usize>() -> ByteStorage<T, N> {
    ByteStorage::<T, N>::new()
}
