#![cfg(feature = "allocator-api2")]

use bumpalo::Bump;

use flex_buffer::{storage::ApiAlloc, Buffer};

#[test]
fn bump_buffer() {
    let bump = Bump::new();
    let mut buf = Buffer::<String, _>::new_in(ApiAlloc(&bump));
    buf.insert(0, &["b".to_string(), "c".to_string()]);
    buf.insert(0, &["a".to_string()]);
    buf.reserve(50);
    buf.erase(1..2);
    assert_eq!(buf.as_slice(), &["a", "c"]);
    assert!(bump.allocated_bytes() >= 50 * core::mem::size_of::<String>());
}

#[test]
fn bump_buffer_resize() {
    let bump = Bump::new();
    let mut buf = Buffer::<u16, _>::new_in(ApiAlloc(&bump));
    buf.resize(100, 3);
    buf.resize(10, 0);
    assert_eq!(buf.as_slice(), &[3; 10]);
    assert_eq!(buf.capacity(), 100);
}
