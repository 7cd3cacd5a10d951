//! This module defines [Rows], an iterator over the rows of a [SoaVector].

use std::{iter::FusedIterator, ops::Range};

use crate::row::Row;

use super::SoaVector;

/// Iterator that reassembles the rows of a [SoaVector] in order.
///
/// Every row is gathered from all columns; for passes over only some
/// columns, iterate [SoaVector::column] instead.
#[derive(Debug)]
pub struct Rows<'a, R: Row> {
    vector: &'a SoaVector<R>,
    indices: Range<usize>,
}

impl<'a, R: Row> Rows<'a, R> {
    pub(super) fn new(vector: &'a SoaVector<R>) -> Self {
        Self {
            vector,
            indices: 0..vector.len(),
        }
    }
}

impl<R: Row> Iterator for Rows<'_, R> {
    type Item = R;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices
            .next()
            .and_then(|index| self.vector.get_row(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<R: Row> DoubleEndedIterator for Rows<'_, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.indices
            .next_back()
            .and_then(|index| self.vector.get_row(index))
    }
}

impl<R: Row> ExactSizeIterator for Rows<'_, R> {}

impl<R: Row> FusedIterator for Rows<'_, R> {}

impl<'a, R: Row> IntoIterator for &'a SoaVector<R> {
    type Item = R;
    type IntoIter = Rows<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

#[cfg(test)]
mod test {
    use crate::{Col, SoaVector};
    use test_log::test;

    #[test]
    fn rows_in_push_order() {
        let vector: SoaVector<(u8, char)> =
            vec![(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();

        assert_eq!(vector.rows().len(), 3);
        assert_eq!(
            vector.rows().collect::<Vec<_>>(),
            vec![(1, 'a'), (2, 'b'), (3, 'c')]
        );
        assert_eq!(
            vector.rows().rev().map(|(number, _)| number).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn rows_of_empty_vector() {
        let vector = SoaVector::<(u64, u64)>::new();

        assert_eq!(vector.rows().next(), None);
        assert_eq!((&vector).into_iter().count(), 0);
    }

    #[test]
    fn rows_see_updated_columns() {
        let mut vector: SoaVector<(u32, u32)> = (0..4).map(|value| (value, value)).collect();
        vector.column_mut(Col::<1>).iter_mut().for_each(|value| *value *= 10);

        let sums = (&vector).into_iter().map(|(a, b)| a + b).collect::<Vec<_>>();
        assert_eq!(sums, vec![0, 11, 22, 33]);
    }
}
