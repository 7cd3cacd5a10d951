//! This module defines [SoaVector].

pub mod iter;

use std::{
    fmt::Debug,
    marker::PhantomData,
    mem::{self, size_of},
    slice,
};

use crate::{
    columnar::{
        columns::{Columns, StorageOf},
        key::ColumnKey,
    },
    error::CapacityError,
    growth,
    management::bytesized::{size_columns_flat, ByteSized},
    row::Row,
};

use self::iter::Rows;

/// Growable container that stores each column of its rows
/// in a separate allocation.
///
/// All columns share one capacity and grow together. Values of one column
/// are addressed through a [ColumnKey], which fixes the column and its
/// element type at compile time.
///
/// Growing the container moves the column memory, so raw pointers
/// derived from earlier references are invalid after any
/// [reserve][SoaVector::reserve] or any [push][SoaVector::push] that grows.
///
/// The container cannot be cloned. Ownership of the columns is moved with
/// the container itself, or handed over explicitly with
/// [take][SoaVector::take].
pub struct SoaVector<R: Row> {
    capacity: usize,
    len: usize,
    columns: StorageOf<R>,
    _row: PhantomData<R>,
}

impl<R: Row> SoaVector<R> {
    /// Creates an empty container without allocating.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            len: 0,
            columns: R::Columns::dangling(),
            _row: PhantomData,
        }
    }

    /// Creates an empty container with room for `capacity` rows.
    ///
    /// # Panics
    /// Panics if the capacity overflows, aborts if allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut result = Self::new();
        result.reserve(capacity);
        result
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of rows every column has room for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true iff the container holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resizes all columns to `new_capacity` as one step.
    fn grow_to(&mut self, new_capacity: usize) -> Result<(), CapacityError> {
        log::trace!(
            "growing {} columns from capacity {} to {}",
            R::Columns::COUNT,
            self.capacity,
            new_capacity
        );

        // SAFETY: every column was allocated with `self.capacity`.
        unsafe { R::Columns::resize(&mut self.columns, self.capacity, new_capacity)? };
        self.capacity = new_capacity;

        Ok(())
    }

    /// Makes sure every column has room for at least `capacity` rows.
    ///
    /// Does nothing if the current capacity suffices. On error the
    /// container is left unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), CapacityError> {
        match growth::reserved_capacity(self.capacity, capacity) {
            Some(new_capacity) => self.grow_to(new_capacity),
            None => Ok(()),
        }
    }

    /// Makes sure every column has room for at least `capacity` rows.
    ///
    /// # Panics
    /// Panics if the capacity overflows, aborts if allocation fails.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(error) = self.try_reserve(capacity) {
            error.raise();
        }
    }

    /// Appends a row, writing one value into each column,
    /// and returns its index.
    ///
    /// If all slots are taken, the capacity grows from `c` to
    /// `(c + 1) * 3 / 2` first. On error the container is left unchanged.
    pub fn try_push(&mut self, row: R) -> Result<usize, CapacityError> {
        if self.len >= self.capacity {
            self.grow_to(growth::next_capacity(self.capacity)?)?;
        }

        let index = self.len;
        // SAFETY: `index < self.capacity` after growing.
        unsafe { R::Columns::write(&self.columns, index, row.into_columns()) };
        self.len += 1;

        Ok(index)
    }

    /// Appends a row, writing one value into each column,
    /// and returns its index.
    ///
    /// # Panics
    /// Panics if the capacity overflows, aborts if allocation fails.
    pub fn push(&mut self, row: R) -> usize {
        match self.try_push(row) {
            Ok(index) => index,
            Err(error) => error.raise(),
        }
    }

    /// Returns a reference to the value in column `key` at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn at<K: ColumnKey<R>>(&self, key: K, index: usize) -> &K::Value {
        &self.column(key)[index]
    }

    /// Returns a mutable reference to the value in column `key` at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn at_mut<K: ColumnKey<R>>(&mut self, key: K, index: usize) -> &mut K::Value {
        &mut self.column_mut(key)[index]
    }

    /// Returns a reference to the value in column `key` at `index`,
    /// or `None` if `index` is out of bounds.
    pub fn get<K: ColumnKey<R>>(&self, key: K, index: usize) -> Option<&K::Value> {
        self.column(key).get(index)
    }

    /// Returns a mutable reference to the value in column `key` at `index`,
    /// or `None` if `index` is out of bounds.
    pub fn get_mut<K: ColumnKey<R>>(&mut self, key: K, index: usize) -> Option<&mut K::Value> {
        self.column_mut(key).get_mut(index)
    }

    /// Returns a reference to the value in column `key` at `index`
    /// without checking bounds.
    ///
    /// # Safety
    /// `index` must be smaller than [len][SoaVector::len].
    pub unsafe fn at_unchecked<K: ColumnKey<R>>(&self, _key: K, index: usize) -> &K::Value {
        debug_assert!(index < self.len);
        &*K::column(&self.columns).as_ptr().add(index)
    }

    /// Returns a mutable reference to the value in column `key` at `index`
    /// without checking bounds.
    ///
    /// # Safety
    /// `index` must be smaller than [len][SoaVector::len].
    pub unsafe fn at_unchecked_mut<K: ColumnKey<R>>(
        &mut self,
        _key: K,
        index: usize,
    ) -> &mut K::Value {
        debug_assert!(index < self.len);
        &mut *K::column(&self.columns).as_ptr().add(index)
    }

    /// Returns the populated part of column `key`.
    pub fn column<K: ColumnKey<R>>(&self, _key: K) -> &[K::Value] {
        // SAFETY: the first `self.len` slots of every column are initialized.
        unsafe { slice::from_raw_parts(K::column(&self.columns).as_ptr(), self.len) }
    }

    /// Returns the populated part of column `key`, mutably.
    pub fn column_mut<K: ColumnKey<R>>(&mut self, _key: K) -> &mut [K::Value] {
        // SAFETY: the first `self.len` slots of every column are initialized,
        // and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(K::column(&self.columns).as_ptr(), self.len) }
    }

    /// Reassembles the row at `index`, or returns `None` if `index` is out of bounds.
    pub fn get_row(&self, index: usize) -> Option<R> {
        if index >= self.len {
            return None;
        }

        // SAFETY: slots below `self.len` are initialized.
        let columns = unsafe { R::Columns::read(&self.columns, index) };
        Some(R::from_columns(columns))
    }

    /// Returns an iterator reassembling every row in order.
    pub fn rows(&self) -> Rows<'_, R> {
        Rows::new(self)
    }

    /// Removes all rows, keeping the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Moves the rows and all column memory into a new container,
    /// leaving this one empty and without allocations.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<R: Row> Default for SoaVector<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Row> Drop for SoaVector<R> {
    fn drop(&mut self) {
        // SAFETY: every column was allocated with `self.capacity`.
        unsafe { R::Columns::release(&mut self.columns, self.capacity) };
        self.capacity = 0;
        self.len = 0;
    }
}

impl<R: Row + Debug> Debug for SoaVector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoaVector")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("rows", &self.rows().collect::<Vec<_>>())
            .finish()
    }
}

impl<R: Row> ByteSized for SoaVector<R> {
    fn size_bytes(&self) -> u64 {
        size_of::<Self>() as u64 + size_columns_flat(self.capacity, R::Columns::ROW_BYTES)
    }
}

impl<R: Row> Extend<R> for SoaVector<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len.saturating_add(lower));

        for row in iter {
            self.push(row);
        }
    }
}

impl<R: Row> FromIterator<R> for SoaVector<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}
