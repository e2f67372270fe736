use crate::grow::Grow;
use crate::range::move_forward;
use crate::storage::RawAlloc;

use super::Buffer;

/// Closes the gap left by erased elements when dropped, whether or not the
/// destruction of those elements completed.
pub(super) struct Backshift<'a, T, A: RawAlloc, G: Grow> {
    pub(super) buf: &'a mut Buffer<T, A, G>,
    first: usize,
    last: usize,
}

impl<'a, T, A: RawAlloc, G: Grow> Backshift<'a, T, A, G> {
    /// Schedule the removal of `first..last`. The caller is responsible for
    /// destroying those elements before the guard is dropped.
    #[inline]
    pub fn new(buf: &'a mut Buffer<T, A, G>, first: usize, last: usize) -> Self {
        debug_assert!(first <= last && last <= buf.len);
        Self { buf, first, last }
    }
}

impl<T, A: RawAlloc, G: Grow> Drop for Backshift<'_, T, A, G> {
    fn drop(&mut self) {
        let tail = self.buf.len - self.last;
        if tail > 0 {
            let base = self.buf.data.as_ptr();
            // SAFETY: the erased slots no longer hold live values and the
            // destination precedes the source.
            unsafe { move_forward(base.add(self.first), base.add(self.last), tail) };
        }
        self.buf.len = self.first + tail;
    }
}
