//! In-place exchange of values.
//!
//! A type declares how it is swapped by implementing [`Swap`]. Overriding
//! [`Swap::swap_with`] supplies a type-specific exchange, for example one
//! which only trades internal handles. An empty implementation selects the
//! generic exchange through a temporary.

use core::mem;

/// Types which may be exchanged in place.
pub trait Swap: Sized {
    /// Exchange the values of `self` and `other`.
    #[inline]
    fn swap_with(&mut self, other: &mut Self) {
        exchange(self, other)
    }
}

/// Exchange two values bitwise, as by [`mem::swap`]. No destructor or clone
/// is run.
#[inline]
pub fn exchange<T>(a: &mut T, b: &mut T) {
    mem::swap(a, b)
}

/// Exchange two values using the exchange declared by `T`.
#[inline]
pub fn swap<T: Swap>(a: &mut T, b: &mut T) {
    a.swap_with(b)
}

macro_rules! impl_swap_exchange {
    ($($t:ty),* $(,)?) => {
        $(impl Swap for $t {})*
    };
}

impl_swap_exchange!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
);

impl<T: ?Sized> Swap for &T {}

impl<T: ?Sized> Swap for &mut T {}

impl<T, const N: usize> Swap for [T; N] {}

macro_rules! impl_swap_tuple {
    ($($name:ident)+) => {
        impl<$($name),+> Swap for ($($name,)+) {}
    };
}

impl_swap_tuple!(A);
impl_swap_tuple!(A B);
impl_swap_tuple!(A B C);
impl_swap_tuple!(A B C D);
impl_swap_tuple!(A B C D E);
impl_swap_tuple!(A B C D E F);
impl_swap_tuple!(A B C D E F G);
impl_swap_tuple!(A B C D E F G H);
impl_swap_tuple!(A B C D E F G H I);
impl_swap_tuple!(A B C D E F G H I J);
impl_swap_tuple!(A B C D E F G H I J K);
impl_swap_tuple!(A B C D E F G H I J K L);

// The owned handles exchange only their pointers.
#[cfg(feature = "alloc")]
impl Swap for alloc::string::String {}

#[cfg(feature = "alloc")]
impl<T> Swap for alloc::vec::Vec<T> {}

#[cfg(feature = "alloc")]
impl<T: ?Sized> Swap for alloc::boxed::Box<T> {}

impl<T: Swap> Swap for Option<T> {
    #[inline]
    fn swap_with(&mut self, other: &mut Self) {
        match (self, other) {
            (Some(a), Some(b)) => a.swap_with(b),
            (a, b) => exchange(a, b),
        }
    }
}
