//! This module defines how the shared capacity of all columns grows.

use crate::error::CapacityError;

/// Capacity the columns grow to when an append finds them full.
///
/// Computes `(capacity + 1) * 3 / 2` with truncating integer division,
/// which yields the sequence 0, 1, 3, 6, 10, 16, 25, 39, ...
pub fn next_capacity(capacity: usize) -> Result<usize, CapacityError> {
    capacity
        .checked_add(1)
        .and_then(|capacity| capacity.checked_mul(3))
        .map(|capacity| capacity / 2)
        .ok_or(CapacityError::CapacityOverflow)
}

/// Capacity after a request to reserve room for `requested` elements.
///
/// Returns `None` if the current capacity already suffices.
pub fn reserved_capacity(capacity: usize, requested: usize) -> Option<usize> {
    (requested > capacity).then_some(requested)
}
