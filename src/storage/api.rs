use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

use allocator_api2::alloc::Allocator;
use const_default::ConstDefault;

use crate::error::StorageError;

use super::alloc::RawAlloc;

/// An adapter allowing any [`Allocator`] to serve buffer storage.
#[derive(Default, Clone, Copy)]
pub struct ApiAlloc<A>(pub A);

impl<A: Allocator> RawAlloc for ApiAlloc<A> {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.0
            .allocate(layout)
            .map_err(|_| StorageError::AllocError)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.0.deallocate(ptr, layout)
    }
}

impl<A: ConstDefault> ConstDefault for ApiAlloc<A> {
    const DEFAULT: Self = ApiAlloc(A::DEFAULT);
}

impl<A> fmt::Debug for ApiAlloc<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiAlloc").finish_non_exhaustive()
    }
}
