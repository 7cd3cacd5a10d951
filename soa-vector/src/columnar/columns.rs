//! This module defines the trait [Columns],
//! which describes a fixed list of column types and how their storage
//! is resized, written, read and released as a unit.

use std::mem;

use crate::{error::CapacityError, row::Row};

use super::{
    key::{Col, ColumnKey},
    raw_column::{RawColumn, StagedColumn},
};

mod sealed {
    pub trait Sealed {}
}

/// A tuple of column types, in declaration order.
///
/// Implemented for tuples of one to twelve [Copy] types. Element types
/// must be [Copy] since growing a column relocates its elements with a
/// plain byte copy and no element is ever dropped.
pub trait Columns: Copy + sealed::Sealed {
    /// Tuple of [RawColumn] handles, one per column.
    type Storage;

    /// Number of columns.
    const COUNT: usize;

    /// Sum of the sizes of all column types,
    /// i.e. the number of bytes one slot occupies across all columns.
    const ROW_BYTES: usize;

    /// Storage that owns no memory.
    fn dangling() -> Self::Storage;

    /// Resizes every column from `old_capacity` to `new_capacity` slots,
    /// keeping the first `min(old_capacity, new_capacity)` slots.
    ///
    /// Either all columns are resized or, on error, none is.
    ///
    /// # Safety
    /// Every column in `storage` must have been allocated with `old_capacity`.
    unsafe fn resize(
        storage: &mut Self::Storage,
        old_capacity: usize,
        new_capacity: usize,
    ) -> Result<(), CapacityError>;

    /// Writes one value into each column at `index`.
    ///
    /// # Safety
    /// `index` must be smaller than the capacity of the storage.
    unsafe fn write(storage: &Self::Storage, index: usize, values: Self);

    /// Reads the values at `index` from each column.
    ///
    /// # Safety
    /// The slot at `index` must have been written.
    unsafe fn read(storage: &Self::Storage, index: usize) -> Self;

    /// Frees every column and leaves dangling handles behind.
    ///
    /// # Safety
    /// Every column in `storage` must have been allocated with `capacity`.
    unsafe fn release(storage: &mut Self::Storage, capacity: usize);
}

/// Storage used by a container of rows of type `R`.
pub type StorageOf<R> = <<R as Row>::Columns as Columns>::Storage;

macro_rules! impl_tuple_columns {
    (@keys $all:tt) => {};
    (@keys $all:tt $idx:tt $T:ident $(, $rest_idx:tt $rest:ident)*) => {
        impl_tuple_columns!(@key $all $idx $T);
        impl_tuple_columns!(@keys $all $($rest_idx $rest),*);
    };
    (@key [$($All:ident),+] $idx:tt $T:ident) => {
        // SAFETY: the returned column is part of the given storage.
        unsafe impl<$($All: Copy),+> ColumnKey<($($All,)+)> for Col<$idx> {
            type Value = $T;

            fn column(storage: &StorageOf<($($All,)+)>) -> &RawColumn<$T> {
                &storage.$idx
            }
        }
    };
    (@tuple $($idx:tt $T:ident),+) => {
        impl<$($T: Copy),+> sealed::Sealed for ($($T,)+) {}

        impl<$($T: Copy),+> Columns for ($($T,)+) {
            type Storage = ($(RawColumn<$T>,)+);

            const COUNT: usize = [$(stringify!($T)),+].len();
            const ROW_BYTES: usize = 0 $(+ mem::size_of::<$T>())+;

            fn dangling() -> Self::Storage {
                ($(RawColumn::<$T>::dangling(),)+)
            }

            unsafe fn resize(
                storage: &mut Self::Storage,
                old_capacity: usize,
                new_capacity: usize,
            ) -> Result<(), CapacityError> {
                let keep = old_capacity.min(new_capacity);
                let staged = ($(StagedColumn::<$T>::allocate(new_capacity)?,)+);

                $( staged.$idx.commit(&mut storage.$idx, old_capacity, keep); )+

                Ok(())
            }

            unsafe fn write(storage: &Self::Storage, index: usize, values: Self) {
                $( storage.$idx.as_ptr().add(index).write(values.$idx); )+
            }

            unsafe fn read(storage: &Self::Storage, index: usize) -> Self {
                ($( storage.$idx.as_ptr().add(index).read(), )+)
            }

            unsafe fn release(storage: &mut Self::Storage, capacity: usize) {
                $( storage.$idx.deallocate(capacity); )+
            }
        }

        impl<$($T: Copy),+> Row for ($($T,)+) {
            type Columns = Self;

            fn into_columns(self) -> Self {
                self
            }

            fn from_columns(columns: Self) -> Self {
                columns
            }
        }

        impl_tuple_columns!(@keys [$($T),+] $($idx $T),+);
    };
    ($( ($($idx:tt $T:ident),+) )+) => {
        $( impl_tuple_columns!(@tuple $($idx $T),+); )+
    };
}

impl_tuple_columns! {
    (0 A)
    (0 A, 1 B)
    (0 A, 1 B, 2 C)
    (0 A, 1 B, 2 C, 3 D)
    (0 A, 1 B, 2 C, 3 D, 4 E)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K, 11 L)
}
