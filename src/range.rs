//! Element-range operations.
//!
//! Each operation works on `count` slots starting at a raw slot pointer and
//! is implemented once per [`Kind`] by the [`Plain`] and [`Complex`]
//! strategies. The free functions in this module select the strategy from
//! the element type's [`Classify::KIND`].
//!
//! Moving a value leaves its source slot logically uninitialized. The
//! direction of a move matters when the source and destination overlap:
//! [`move_forward`] processes slots from low to high index and is only
//! correct when the destination does not start after the source, while
//! [`move_backward`] processes slots from high to low index and is required
//! for shifting elements towards the end of a buffer.

use core::mem;
use core::ptr::{self, slice_from_raw_parts_mut};

use crate::classify::{Classify, Kind};

/// Per-kind implementations of the element-range operations.
pub trait RangeOps<T> {
    /// Run the destructor of each value in `[first, first + count)`.
    ///
    /// # Safety
    /// Every slot in the range must hold an initialized value. The slots are
    /// logically uninitialized afterwards.
    unsafe fn destroy(first: *mut T, count: usize);

    /// Write a clone of `value` into each slot of `[first, first + count)`.
    ///
    /// If a clone panics, the values already written are destroyed before
    /// the panic continues.
    ///
    /// # Safety
    /// The slots must be valid for writes and must not hold live values,
    /// which would be overwritten without being dropped.
    unsafe fn fill(first: *mut T, count: usize, value: &T)
    where
        T: Clone;

    /// Move `count` values from `src` to `dest`, lowest index first.
    ///
    /// # Safety
    /// The source slots must hold initialized values and the destination
    /// slots must be valid for writes. If the ranges overlap, `dest` must
    /// not be greater than `src`.
    unsafe fn move_forward(dest: *mut T, src: *const T, count: usize);

    /// Move `count` values from `src` to `dest`, highest index first.
    ///
    /// # Safety
    /// The source slots must hold initialized values and the destination
    /// slots must be valid for writes. If the ranges overlap, `dest` must
    /// not be less than `src`.
    unsafe fn move_backward(dest: *mut T, src: *const T, count: usize);
}

/// Range operations for types without drop glue.
///
/// Values are moved in bulk and never destroyed. Using this strategy for a
/// [`Kind::Complex`] type leaks values instead of dropping them.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Plain;

impl<T> RangeOps<T> for Plain {
    #[inline(always)]
    unsafe fn destroy(_first: *mut T, _count: usize) {}

    #[inline]
    unsafe fn fill(first: *mut T, count: usize, value: &T)
    where
        T: Clone,
    {
        // nothing to release if a clone panics part way through
        for idx in 0..count {
            unsafe { first.add(idx).write(value.clone()) };
        }
    }

    #[inline]
    unsafe fn move_forward(dest: *mut T, src: *const T, count: usize) {
        unsafe { ptr::copy(src, dest, count) };
    }

    #[inline]
    unsafe fn move_backward(dest: *mut T, src: *const T, count: usize) {
        unsafe { ptr::copy(src, dest, count) };
    }
}

/// Range operations for types with drop glue.
///
/// Values are moved one at a time in the requested direction, and every
/// destroyed value has its destructor run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Complex;

impl<T> RangeOps<T> for Complex {
    #[inline]
    unsafe fn destroy(first: *mut T, count: usize) {
        if count > 0 {
            unsafe { ptr::drop_in_place(slice_from_raw_parts_mut(first, count)) };
        }
    }

    unsafe fn fill(first: *mut T, count: usize, value: &T)
    where
        T: Clone,
    {
        let mut guard = FillGuard { first, written: 0 };
        while guard.written < count {
            unsafe { first.add(guard.written).write(value.clone()) };
            guard.written += 1;
        }
        mem::forget(guard);
    }

    #[inline]
    unsafe fn move_forward(dest: *mut T, src: *const T, count: usize) {
        for idx in 0..count {
            unsafe { dest.add(idx).write(src.add(idx).read()) };
        }
    }

    #[inline]
    unsafe fn move_backward(dest: *mut T, src: *const T, count: usize) {
        for idx in (0..count).rev() {
            unsafe { dest.add(idx).write(src.add(idx).read()) };
        }
    }
}

// Destroys the values written so far by an interrupted fill.
struct FillGuard<T> {
    first: *mut T,
    written: usize,
}

impl<T> Drop for FillGuard<T> {
    fn drop(&mut self) {
        unsafe { <Complex as RangeOps<T>>::destroy(self.first, self.written) };
    }
}

/// Destroy `count` values starting at `first` using the strategy for `T`.
///
/// # Safety
/// See [`RangeOps::destroy`].
#[inline]
pub unsafe fn destroy_range<T>(first: *mut T, count: usize) {
    match <T as Classify>::KIND {
        Kind::Plain => unsafe { <Plain as RangeOps<T>>::destroy(first, count) },
        Kind::Complex => unsafe { <Complex as RangeOps<T>>::destroy(first, count) },
    }
}

/// Fill `count` uninitialized slots starting at `first` with clones of
/// `value`, using the strategy for `T`.
///
/// # Safety
/// See [`RangeOps::fill`].
#[inline]
pub unsafe fn fill_range<T: Clone>(first: *mut T, count: usize, value: &T) {
    match <T as Classify>::KIND {
        Kind::Plain => unsafe { <Plain as RangeOps<T>>::fill(first, count, value) },
        Kind::Complex => unsafe { <Complex as RangeOps<T>>::fill(first, count, value) },
    }
}

/// Move `count` values from `src` to `dest` lowest index first, using the
/// strategy for `T`.
///
/// # Safety
/// See [`RangeOps::move_forward`].
#[inline]
pub unsafe fn move_forward<T>(dest: *mut T, src: *const T, count: usize) {
    match <T as Classify>::KIND {
        Kind::Plain => unsafe { <Plain as RangeOps<T>>::move_forward(dest, src, count) },
        Kind::Complex => unsafe { <Complex as RangeOps<T>>::move_forward(dest, src, count) },
    }
}

/// Move `count` values from `src` to `dest` highest index first, using the
/// strategy for `T`.
///
/// # Safety
/// See [`RangeOps::move_backward`].
#[inline]
pub unsafe fn move_backward<T>(dest: *mut T, src: *const T, count: usize) {
    match <T as Classify>::KIND {
        Kind::Plain => unsafe { <Plain as RangeOps<T>>::move_backward(dest, src, count) },
        Kind::Complex => unsafe { <Complex as RangeOps<T>>::move_backward(dest, src, count) },
    }
}
