//! Compile-time classification of element types.
//!
//! Every move in Rust is a bitwise copy, so the only construction or
//! destruction work that can be elided for a type is its destructor. A type
//! without drop glue is [`Kind::Plain`]: its slots may be copied in bulk and
//! abandoned without running anything. Any other type is [`Kind::Complex`]
//! and each constructed value must be dropped exactly once.
//!
//! The classification is an associated constant, so a `match` on it is
//! resolved during monomorphization and carries no runtime branch.

use core::mem::needs_drop;

/// The element handling strategy for a value type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Values may be copied and discarded as raw bytes
    Plain,
    /// Values require their destructor to be run
    Complex,
}

impl Kind {
    /// Check whether this is the [`Kind::Plain`] classification
    #[inline]
    pub const fn is_plain(self) -> bool {
        matches!(self, Self::Plain)
    }
}

/// Determine the [`Kind`] of a value type.
#[inline]
pub const fn classify<T>() -> Kind {
    if needs_drop::<T>() {
        Kind::Complex
    } else {
        Kind::Plain
    }
}

/// Types carrying a compile-time [`Kind`].
///
/// This is implemented for every sized type.
pub trait Classify: Sized {
    /// The element handling strategy for `Self`
    const KIND: Kind;
}

impl<T> Classify for T {
    const KIND: Kind = classify::<T>();
}
