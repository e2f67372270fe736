use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::StorageError;

#[inline]
pub fn array_layout<T>(count: usize) -> Result<Layout, StorageError> {
    Layout::array::<T>(count).map_err(StorageError::LayoutError)
}

/// Find the largest aligned region of `len` bytes starting at `start` which
/// satisfies `layout`.
#[inline]
pub fn layout_aligned_bytes(
    start: NonNull<u8>,
    len: usize,
    layout: Layout,
) -> Result<NonNull<[u8]>, StorageError> {
    let offset = start.as_ptr().align_offset(layout.align());
    let max_cap = len.saturating_sub(offset);
    if max_cap < layout.size() || offset > len {
        Err(StorageError::CapacityLimit)
    } else {
        // SAFETY: `offset` is within the bounds of the region, so the result
        // is non-null.
        let head = unsafe { NonNull::new_unchecked(start.as_ptr().add(offset)) };
        Ok(NonNull::slice_from_raw_parts(head, max_cap))
    }
}

pub const fn min_non_zero_cap<T>() -> usize {
    if core::mem::size_of::<T>() == 1 {
        8
    } else if core::mem::size_of::<T>() <= 1024 {
        4
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::MaybeUninit;

    #[test]
    fn check_min_cap() {
        assert_eq!(min_non_zero_cap::<u8>(), 8);
        assert_eq!(min_non_zero_cap::<usize>(), 4);
        assert_eq!(min_non_zero_cap::<[u8; 1025]>(), 1);
    }

    #[test]
    fn check_array_layout() {
        assert_eq!(array_layout::<u32>(4).unwrap().size(), 16);
        assert!(matches!(
            array_layout::<u32>(usize::MAX),
            Err(StorageError::LayoutError(_))
        ));
    }

    #[test]
    fn check_aligned_bytes() {
        let mut buf = [MaybeUninit::<u64>::uninit(); 4];
        let start = NonNull::new(buf.as_mut_ptr().cast::<u8>()).unwrap();
        let region = layout_aligned_bytes(start, 32, Layout::new::<[u64; 2]>()).unwrap();
        assert_eq!(region.len(), 32);
        // skip one byte so that realignment is required
        let skewed = NonNull::new(unsafe { start.as_ptr().add(1) }).unwrap();
        let region = layout_aligned_bytes(skewed, 31, Layout::new::<u64>()).unwrap();
        assert_eq!(region.len(), 24);
        assert_eq!(
            layout_aligned_bytes(skewed, 31, Layout::new::<[u64; 4]>()),
            Err(StorageError::CapacityLimit)
        );
    }
}
