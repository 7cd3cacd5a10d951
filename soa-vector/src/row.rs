//! This module defines the trait [Row].

use crate::columnar::columns::Columns;

/// The logical element of a [SoaVector][crate::SoaVector].
///
/// A row is never stored as such; it is split into one value per column
/// when appended and reassembled when read as a whole.
///
/// Tuples of one to twelve [Copy] types are rows whose columns are their
/// fields. Structs with named fields can derive this trait with
/// `#[derive(Row)]`.
pub trait Row: Sized {
    /// Tuple of column types, in declaration order.
    type Columns: Columns;

    /// Splits the row into its column values.
    fn into_columns(self) -> Self::Columns;

    /// Assembles a row from its column values.
    fn from_columns(columns: Self::Columns) -> Self;
}
