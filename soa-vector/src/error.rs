//! Error-handling module for the crate

use std::alloc::Layout;

use thiserror::Error;

/// Errors that can occur while growing the columns of a
/// [SoaVector][crate::SoaVector].
///
/// If one of these is returned, the container is left exactly as it was
/// before the failed call: no column has been resized.
#[allow(variant_size_differences)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// The requested capacity cannot be represented,
    /// either because the growth computation overflowed `usize`
    /// or because a column would exceed `isize::MAX` bytes
    #[error("requested capacity exceeds the maximum size of a column")]
    CapacityOverflow,
    /// The allocator refused to provide memory for a column
    #[error("memory allocation of {size} bytes for a column failed", size = .layout.size())]
    AllocationFailed {
        /// Layout of the allocation that failed
        layout: Layout,
    },
}

impl CapacityError {
    /// Aborts or panics according to the kind of error,
    /// mirroring how [Vec] reacts to the same situations.
    pub(crate) fn raise(self) -> ! {
        match self {
            CapacityError::CapacityOverflow => panic!("capacity overflow"),
            CapacityError::AllocationFailed { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}
