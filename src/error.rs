//! Error handling.

use core::alloc::LayoutError;
use core::fmt;

/// An enumeration of error types raised when buffer storage cannot be obtained
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The allocator refused the request
    AllocError,
    /// The requested element count cannot be represented, or exceeds the
    /// limit of a fixed allocation
    CapacityLimit,
    /// The byte size of the requested capacity was not allocatable
    LayoutError(LayoutError),
    /// The allocator does not support allocation in this configuration
    Unsupported,
}

impl StorageError {
    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocError => "Allocation error",
            Self::CapacityLimit => "Exceeded storage capacity limit",
            Self::LayoutError(_) => "Layout error",
            Self::Unsupported => "Unsupported",
        }
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self.as_str());
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LayoutError> for StorageError {
    fn from(err: LayoutError) -> Self {
        Self::LayoutError(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

#[cold]
#[inline(never)]
pub(crate) fn index_panic() -> ! {
    panic!("Invalid element index");
}
