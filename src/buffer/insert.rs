use crate::range::{destroy_range, move_forward};

/// Fills the gap opened for an insertion.
///
/// The gap holds `count` uninitialized slots starting at `head`, followed by
/// `tail` shifted elements. If the insertion does not complete, the values
/// written so far are destroyed and the tail is moved back to `head`.
pub(super) struct Inserter<T> {
    head: *mut T,
    count: usize,
    pos: usize,
    tail: usize,
}

impl<T> Inserter<T> {
    /// # Safety
    /// `head` must be followed by `count` uninitialized slots and then
    /// `tail` initialized values, all within one block.
    #[inline]
    pub unsafe fn new(head: *mut T, count: usize, tail: usize) -> Self {
        Self {
            head,
            count,
            pos: 0,
            tail,
        }
    }

    #[inline]
    pub fn push_clone(&mut self, val: &T)
    where
        T: Clone,
    {
        assert!(self.pos < self.count);
        unsafe { self.head.add(self.pos).write(val.clone()) };
        self.pos += 1;
    }

    // Successfully complete the insertion, keeping the written values and
    // the shifted tail in place.
    #[inline]
    pub fn complete(mut self) {
        debug_assert_eq!(self.pos, self.count);
        self.pos = 0;
        self.tail = 0;
    }
}

impl<T> Drop for Inserter<T> {
    #[inline]
    fn drop(&mut self) {
        if self.pos > 0 {
            unsafe { destroy_range(self.head, self.pos) };
        }
        if self.tail > 0 {
            // close the gap again; the destination precedes the source
            unsafe { move_forward(self.head, self.head.add(self.count), self.tail) };
        }
    }
}
