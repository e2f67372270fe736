//! The raw growable element buffer.

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, align_of, size_of, ManuallyDrop};
use core::ops::{Bound, Range, RangeBounds};
use core::ptr::{self, NonNull};
use core::slice;

use const_default::ConstDefault;

use crate::error::{index_panic, StorageError};
use crate::grow::{Grow, GrowByHalf};
use crate::range::{destroy_range, fill_range, move_backward, move_forward};
use crate::storage::utils::array_layout;
use crate::storage::{Global, RawAlloc, RawAllocIn};
use crate::swap::Swap;

use self::erase::Backshift;
use self::insert::Inserter;

mod erase;
mod insert;

#[inline]
fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
        Bound::Excluded(i) => *i,
    };
    Range { start, end }
}

/// A raw, growable, contiguous buffer of `T`.
///
/// The buffer owns a single allocation obtained from `A` and tracks three
/// cursors: the start of the block, the number of live elements, and the
/// number of slots in the block. Slots `[0, len)` hold live values and slots
/// `[len, capacity)` are uninitialized. Shrinking operations destroy values
/// but never release capacity; only [`Buffer::try_reserve`] and the
/// operations built on it allocate.
///
/// Per-element work is dispatched at compile time on the element's
/// [`Kind`](crate::Kind), so values without drop glue are shifted in bulk
/// and never visited on destruction.
pub struct Buffer<T, A: RawAlloc = Global, G: Grow = GrowByHalf> {
    data: NonNull<T>,
    len: usize,
    cap: usize,
    alloc: A,
    _marker: PhantomData<(T, G)>,
}

impl<T, A: RawAlloc + ConstDefault, G: Grow> Buffer<T, A, G> {
    /// Constructs a new, empty `Buffer`.
    ///
    /// The buffer will not allocate until capacity is reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "alloc")] {
    /// use flex_buffer::Buffer;
    ///
    /// let buf = Buffer::<u32>::new();
    /// assert_eq!(buf.capacity(), 0);
    /// # }
    /// ```
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc: A::DEFAULT,
            _marker: PhantomData,
        }
    }

    /// Constructs a new buffer with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a new buffer with room for at least `capacity`
    /// elements.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        let mut buf = Self::new();
        buf.try_reserve(capacity)?;
        Ok(buf)
    }
}

impl<T, A: RawAlloc, G: Grow> Buffer<T, A, G> {
    /// Constructs a new, empty `Buffer` drawing its storage from `alloc_in`.
    ///
    /// No allocation is made.
    pub fn new_in<I>(alloc_in: I) -> Self
    where
        I: RawAllocIn<RawAlloc = A>,
    {
        Self {
            data: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc: alloc_in.into_raw_alloc(),
            _marker: PhantomData,
        }
    }

    /// Constructs a new buffer drawing its storage from `alloc_in`, with
    /// room for at least `capacity` elements.
    pub fn with_capacity_in<I>(capacity: usize, alloc_in: I) -> Self
    where
        I: RawAllocIn<RawAlloc = A>,
    {
        match Self::try_with_capacity_in(capacity, alloc_in) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Try to construct a new buffer drawing its storage from `alloc_in`,
    /// with room for at least `capacity` elements.
    pub fn try_with_capacity_in<I>(capacity: usize, alloc_in: I) -> Result<Self, StorageError>
    where
        I: RawAllocIn<RawAlloc = A>,
    {
        let mut buf = Self::new_in(alloc_in);
        buf.try_reserve(capacity)?;
        Ok(buf)
    }

    /// Reassemble a buffer from the parts produced by
    /// [`Buffer::into_raw_parts`].
    ///
    /// # Safety
    /// `data` must point to a block of `capacity` slots allocated by `alloc`
    /// with the layout of `[T; capacity]` (or be dangling when `capacity` is
    /// zero), and the first `length` slots must hold initialized values.
    #[inline]
    pub unsafe fn from_raw_parts_in(
        data: NonNull<T>,
        length: usize,
        capacity: usize,
        alloc: A,
    ) -> Self {
        Self {
            data,
            len: length,
            cap: if size_of::<T>() == 0 { 0 } else { capacity },
            alloc,
            _marker: PhantomData,
        }
    }

    /// Decompose the buffer into its data pointer, length, allocated
    /// capacity and allocator, transferring ownership of the block to the
    /// caller.
    ///
    /// The returned capacity is zero when no block is held.
    #[inline]
    pub fn into_raw_parts(self) -> (NonNull<T>, usize, usize, A) {
        let me = ManuallyDrop::new(self);
        // SAFETY: the allocator is read exactly once and `me` is never dropped
        let alloc = unsafe { ptr::read(&me.alloc) };
        (me.data, me.len, me.cap, alloc)
    }

    /// Get a reference to the allocator of this buffer.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Get a pointer to the first slot of the buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Get a mutable pointer to the first slot of the buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// Access the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    /// Access the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }

    /// The number of slots in the buffer. Zero-sized types report
    /// `usize::MAX` and never allocate.
    #[inline]
    pub fn capacity(&self) -> usize {
        if size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// The number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the buffer holds no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ensure the buffer has room for at least `capacity` elements in total,
    /// panicking if the storage cannot be obtained.
    #[inline]
    pub fn reserve(&mut self, capacity: usize) {
        match self.try_reserve(capacity) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Ensure the buffer has room for at least `capacity` elements in total.
    ///
    /// When the current capacity is sufficient this does nothing. Otherwise
    /// a block for exactly `capacity` elements is allocated, the live
    /// elements are moved into it in order, and the previous block is
    /// released. If the allocation fails the buffer is left unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), StorageError> {
        if self.capacity() >= capacity {
            return Ok(());
        }
        self.reallocate(capacity)
    }

    fn reallocate(&mut self, capacity: usize) -> Result<(), StorageError> {
        let layout = array_layout::<T>(capacity)?;
        let block = match self.alloc.try_alloc(layout) {
            Ok(block) => block,
            Err(error) => {
                debug_event!(capacity, %error, "buffer allocation failed");
                return Err(error);
            }
        };
        trace_event!(
            old_capacity = self.cap,
            new_capacity = capacity,
            len = self.len,
            "reallocating buffer"
        );
        let data: NonNull<T> = block.cast();
        // SAFETY: the new block is disjoint from the old one and has room
        // for every live element.
        unsafe { move_forward(data.as_ptr(), self.data.as_ptr(), self.len) };
        // SAFETY: the old block no longer holds live values.
        unsafe { self.release_block() };
        self.data = data;
        self.cap = capacity;
        Ok(())
    }

    /// Release the current block without touching its contents.
    ///
    /// # Safety
    /// No live values may remain in the block, and the buffer must not be
    /// used before `data` and `cap` are replaced.
    unsafe fn release_block(&mut self) {
        if self.cap > 0 {
            // SAFETY: this layout was validated when the block was allocated
            let layout =
                Layout::from_size_align_unchecked(size_of::<T>() * self.cap, align_of::<T>());
            self.alloc.release(self.data.cast(), layout);
        }
    }

    /// Change the number of live elements to `new_len`, panicking if the
    /// storage cannot be obtained.
    #[inline]
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Change the number of live elements to `new_len`.
    ///
    /// The capacity is first extended to exactly `new_len` if required. When
    /// growing, the new slots are filled with clones of `value`; when
    /// shrinking, the truncated elements are destroyed and `value` is unused.
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), StorageError>
    where
        T: Clone,
    {
        self.try_reserve(new_len)?;
        let len = self.len;
        if new_len > len {
            // SAFETY: capacity for `new_len` elements has been reserved, and
            // the slots beyond `len` are uninitialized.
            unsafe { fill_range(self.data.as_ptr().add(len), new_len - len, &value) };
            self.len = new_len;
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Destroy every live element, retaining the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    fn truncate(&mut self, new_len: usize) {
        let remove = self.len - new_len;
        if remove > 0 {
            // a panicking destructor leaks the remainder instead of
            // leaving dropped values within the live range
            self.len = new_len;
            unsafe { destroy_range(self.data.as_ptr().add(new_len), remove) };
        }
    }

    /// Insert clones of `values` before the element at `position`,
    /// panicking if the storage cannot be obtained.
    ///
    /// # Panics
    /// Panics if `position` is greater than the length of the buffer.
    #[inline]
    pub fn insert(&mut self, position: usize, values: &[T])
    where
        T: Clone,
    {
        match self.try_insert(position, values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert clones of `values` before the element at `position`.
    ///
    /// When the new length exceeds the capacity, the buffer is grown to the
    /// capacity chosen by `G` for the new length. The elements from
    /// `position` onwards are shifted towards the end to open a gap, which
    /// is then filled with clones of `values` in order. If a clone panics,
    /// the buffer contents are restored before the panic continues.
    ///
    /// # Panics
    /// Panics if `position` is greater than the length of the buffer.
    pub fn try_insert(&mut self, position: usize, values: &[T]) -> Result<(), StorageError>
    where
        T: Clone,
    {
        if position > self.len {
            index_panic();
        }
        // SAFETY: the position has been checked.
        unsafe { self.insert_unchecked(position, values) }
    }

    /// Insert clones of `values` before the element at `position`, without
    /// checking the position.
    ///
    /// # Safety
    /// `position` must not be greater than the length of the buffer.
    pub unsafe fn insert_unchecked(
        &mut self,
        position: usize,
        values: &[T],
    ) -> Result<(), StorageError>
    where
        T: Clone,
    {
        let count = values.len();
        if count == 0 {
            return Ok(());
        }
        let Some(new_len) = self.len.checked_add(count) else {
            return Err(StorageError::CapacityLimit);
        };
        if new_len > self.capacity() {
            self.try_reserve(G::next_capacity::<T>(self.capacity(), new_len))?;
        }
        // The block may have moved: pointers are derived from the offset
        // only after reserving.
        let tail = self.len - position;
        let head = self.data.as_ptr().add(position);
        if tail > 0 {
            move_backward(head.add(count), head, tail);
        }
        let mut insert = Inserter::new(head, count, tail);
        for item in values {
            insert.push_clone(item);
        }
        insert.complete();
        self.len = new_len;
        Ok(())
    }

    /// Remove the elements within `range`, shifting any following elements
    /// down to fill the gap. Returns the index of the first removed element,
    /// which now holds the element that followed the range (or equals the
    /// new length when a suffix was removed). The capacity is unchanged.
    ///
    /// # Panics
    /// Panics if the start of the range exceeds its end, or the end exceeds
    /// the length of the buffer.
    pub fn erase<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = bounds_to_range(range, self.len);
        if start > end || end > self.len {
            index_panic();
        }
        // SAFETY: the bounds have been checked.
        unsafe { self.erase_unchecked(start, end) }
    }

    /// Remove the elements within `first..last` without checking the
    /// bounds.
    ///
    /// # Safety
    /// `first` must not exceed `last`, and `last` must not exceed the
    /// length of the buffer.
    pub unsafe fn erase_unchecked(&mut self, first: usize, last: usize) -> usize {
        let count = last - first;
        if count > 0 {
            let shift = Backshift::new(self, first, last);
            destroy_range(shift.buf.data.as_ptr().add(first), count);
        }
        first
    }

    /// Exchange the storage of two buffers.
    ///
    /// Only the cursors and allocator handles are exchanged: no element is
    /// moved, cloned or destroyed, and no allocation is made.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.data, &mut other.data);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.cap, &mut other.cap);
        mem::swap(&mut self.alloc, &mut other.alloc);
    }
}

// SAFETY: the buffer uniquely owns its values and block.
unsafe impl<T: Send, A: RawAlloc + Send, G: Grow> Send for Buffer<T, A, G> {}

// SAFETY: shared access only hands out shared references to values.
unsafe impl<T: Sync, A: RawAlloc + Sync, G: Grow> Sync for Buffer<T, A, G> {}

impl<T, A: RawAlloc, G: Grow> Drop for Buffer<T, A, G> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: no live values remain, and the buffer is not used again.
        unsafe { self.release_block() };
    }
}

impl<T, A: RawAlloc, G: Grow> AsRef<[T]> for Buffer<T, A, G> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc, G: Grow> AsMut<[T]> for Buffer<T, A, G> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, A: RawAlloc, G: Grow> fmt::Debug for Buffer<T, A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T, A: RawAlloc + Default, G: Grow> Default for Buffer<T, A, G> {
    #[inline]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: RawAlloc + ConstDefault, G: Grow> ConstDefault for Buffer<T, A, G> {
    const DEFAULT: Self = Self::new();
}

impl<T, A: RawAlloc, G: Grow> Swap for Buffer<T, A, G> {
    #[inline]
    fn swap_with(&mut self, other: &mut Self) {
        self.swap(other)
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc, G: Grow> zeroize::Zeroize
    for Buffer<T, crate::storage::ZeroizingAlloc<A>, G>
{
    /// Destroy every element and release the block, which the allocator
    /// zeroizes.
    fn zeroize(&mut self) {
        self.clear();
        // SAFETY: no live values remain, and the cursors are reset below.
        unsafe { self.release_block() };
        self.data = NonNull::dangling();
        self.cap = 0;
    }
}

#[cfg(feature = "zeroize")]
impl<T, A: RawAlloc, G: Grow> zeroize::ZeroizeOnDrop
    for Buffer<T, crate::storage::ZeroizingAlloc<A>, G>
{
}
