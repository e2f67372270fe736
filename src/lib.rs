//! Raw growable element buffers.
//!
//! [`Buffer`] is the storage engine beneath higher-level containers: it owns
//! one contiguous block from a [`RawAlloc`], and provides the reserve,
//! resize, insert, erase and swap machinery those containers are built on.
//! Per-element work is dispatched at compile time on the [`Kind`] of the
//! element type.
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod macros;

pub mod buffer;

pub mod classify;

pub(crate) mod error;

pub mod grow;

pub mod range;

pub mod storage;

pub mod swap;

pub use self::{
    buffer::Buffer,
    classify::{Classify, Kind},
    error::StorageError,
    grow::{Grow, GrowByHalf, GrowDoubling, GrowExact},
    storage::{aligned_byte_storage, byte_storage, FixedAlloc, Global, RawAlloc},
    swap::Swap,
};
