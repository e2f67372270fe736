#![cfg(all(feature = "alloc", feature = "zeroize"))]

use core::alloc::Layout;
use core::cell::RefCell;
use core::ptr::NonNull;
use core::slice;

use zeroize::{Zeroize, ZeroizeOnDrop};

use flex_buffer::{
    storage::ZeroizingAlloc, Buffer, Global, GrowExact, RawAlloc, StorageError,
};

#[derive(Debug)]
struct TestAlloc<A: RawAlloc> {
    alloc: A,
    released: RefCell<Vec<Vec<u8>>>,
}

impl<A: RawAlloc> TestAlloc<A> {
    fn new(alloc: A) -> Self {
        Self {
            alloc,
            released: RefCell::new(Vec::new()),
        }
    }
}

impl<A: RawAlloc> RawAlloc for TestAlloc<A> {
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        self.alloc.try_alloc(layout)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        let cp = Vec::from(unsafe { slice::from_raw_parts(ptr.as_ptr(), layout.size()) });
        self.released.borrow_mut().push(cp);
        self.alloc.release(ptr, layout)
    }
}

#[test]
fn test_alloc_log() {
    // check functioning of alloc log
    let alloc = TestAlloc::new(Global);
    let mut buf = Buffer::<u32, _, GrowExact>::new_in(&alloc);
    buf.insert(0, &[99]);
    drop(buf);
    let log = alloc.released.borrow().clone();
    assert_eq!(log, &[99u32.to_ne_bytes()]);
}

#[test]
fn buffer_zeroize_drop() {
    let alloc = TestAlloc::new(Global);
    let mut buf = Buffer::<u32, _, GrowExact>::new_in(ZeroizingAlloc(&alloc));
    buf.insert(0, &[1, 2]);
    buf.insert(1, &[3]);
    drop(buf);
    let log = alloc.released.borrow().clone();
    assert_eq!(log, [vec![0u8; 8], vec![0u8; 12]]);
}

#[test]
fn buffer_zeroize_explicit() {
    let alloc = TestAlloc::new(Global);
    let mut buf = Buffer::<u64, _>::new_in(ZeroizingAlloc(&alloc));
    buf.resize(4, u64::MAX);
    buf.zeroize();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 0);
    assert_eq!(alloc.released.borrow().as_slice(), [vec![0u8; 32]]);

    // the buffer remains usable
    buf.insert(0, &[7]);
    assert_eq!(buf.as_slice(), &[7]);
}

#[test]
fn buffer_zeroize_on_drop() {
    fn zeroized_on_drop<T: ZeroizeOnDrop>(_: &T) {}

    let buf = Buffer::<u8, ZeroizingAlloc<Global>>::new();
    zeroized_on_drop(&buf);
}
