//! This module defines [RawColumn], the allocation backing a single column,
//! and [StagedColumn], a freshly allocated column that has not yet replaced
//! an existing one.

use std::{
    alloc::{self, Layout},
    fmt::Debug,
    mem::ManuallyDrop,
    ptr::{self, NonNull},
};

use crate::error::CapacityError;

/// Owning handle to the memory of one column.
///
/// The handle does not know its own capacity; the owning container keeps a
/// single capacity for all of its columns and passes it in whenever memory
/// is resized or released. A column of capacity zero, or of a zero-sized
/// type, holds a dangling pointer and no allocation.
pub struct RawColumn<T> {
    ptr: NonNull<T>,
}

// The handle owns its elements like a `Box<[T]>` would.
unsafe impl<T: Send> Send for RawColumn<T> {}
unsafe impl<T: Sync> Sync for RawColumn<T> {}

impl<T> Debug for RawColumn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RawColumn").field(&self.ptr).finish()
    }
}

impl<T> RawColumn<T> {
    /// Handle that owns no memory.
    pub(crate) const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
        }
    }

    /// Pointer to the first slot of the column.
    ///
    /// The pointer is invalidated by any resize of the column.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn layout(capacity: usize) -> Result<Layout, CapacityError> {
        Layout::array::<T>(capacity).map_err(|_| CapacityError::CapacityOverflow)
    }

    /// Allocates uninitialized memory for `capacity` elements.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, CapacityError> {
        let layout = Self::layout(capacity)?;
        if layout.size() == 0 {
            return Ok(Self::dangling());
        }

        // SAFETY: the layout has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };

        NonNull::new(ptr.cast::<T>())
            .map(|ptr| Self { ptr })
            .ok_or(CapacityError::AllocationFailed { layout })
    }

    /// Releases the memory of the column and leaves a dangling handle behind.
    ///
    /// # Safety
    /// `capacity` must be the capacity the column was allocated with.
    pub(crate) unsafe fn deallocate(&mut self, capacity: usize) {
        if let Ok(layout) = Self::layout(capacity) {
            if layout.size() != 0 {
                alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
            }
        }

        self.ptr = NonNull::dangling();
    }
}

/// A column allocated ahead of a resize.
///
/// All columns of a container are staged before any of them is committed,
/// so a failing allocation drops the staged columns allocated so far and
/// leaves the container untouched.
#[derive(Debug)]
pub(crate) struct StagedColumn<T> {
    column: RawColumn<T>,
    capacity: usize,
}

impl<T> StagedColumn<T> {
    /// Allocates a column with room for `capacity` elements.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, CapacityError> {
        Ok(Self {
            column: RawColumn::allocate(capacity)?,
            capacity,
        })
    }

    /// Moves the first `keep` elements of `target` into the staged memory,
    /// releases the old memory of `target` and installs the staged memory
    /// in its place.
    ///
    /// # Safety
    /// `old_capacity` must be the capacity `target` was allocated with,
    /// and `keep` must not exceed either capacity.
    pub(crate) unsafe fn commit(
        self,
        target: &mut RawColumn<T>,
        old_capacity: usize,
        keep: usize,
    ) {
        debug_assert!(keep <= old_capacity && keep <= self.capacity);

        let staged = ManuallyDrop::new(self);

        ptr::copy_nonoverlapping(target.as_ptr(), staged.column.as_ptr(), keep);
        target.deallocate(old_capacity);
        target.ptr = staged.column.ptr;
    }
}

impl<T> Drop for StagedColumn<T> {
    fn drop(&mut self) {
        // SAFETY: the column was allocated with `self.capacity`.
        unsafe { self.column.deallocate(self.capacity) }
    }
}
