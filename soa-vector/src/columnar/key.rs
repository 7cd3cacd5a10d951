//! This module defines the trait [ColumnKey] and the positional key [Col].

use crate::row::Row;

use super::{columns::StorageOf, raw_column::RawColumn};

/// Zero-sized type naming one column of rows of type `R`.
///
/// Keys are passed by value to the accessors of
/// [SoaVector][crate::SoaVector]; the key type alone decides which column is
/// read and what type it holds, so there is no lookup at runtime.
///
/// Tuple rows are addressed with [Col]; `#[derive(Row)]` generates one key
/// type per field of a struct.
///
/// # Safety
/// [ColumnKey::column] must return one of the columns contained in the given
/// storage, and always the same one.
pub unsafe trait ColumnKey<R: Row>: Copy {
    /// Type of the values stored in the column.
    type Value: Copy;

    /// Selects the column from the storage of a container.
    fn column(storage: &StorageOf<R>) -> &RawColumn<Self::Value>;
}

/// Key selecting the column at position `I` of a tuple row.
///
/// ```
/// use soa_vector::{Col, SoaVector};
///
/// let mut people = SoaVector::<(&str, u8)>::new();
/// people.push(("Garry", 41));
///
/// assert_eq!(*people.at(Col::<1>, 0), 41);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Col<const I: usize>;
