//! This module defines the trait [ByteSized],
//! which should be implemented by types that can
//! calculate their own size.

/// Objects that are able calculate their current approximate size in bytes.
///
/// We use `u64` rather than `usize` here to avoid overflows in case of overestimations.
pub trait ByteSized {
    /// Return the number of bytes this object consumes
    fn size_bytes(&self) -> u64;
}

/// Computes the memory reserved by `capacity` slots that each span `row_bytes` bytes.
pub(crate) fn size_columns_flat(capacity: usize, row_bytes: usize) -> u64 {
    // We cast everything to u64 separately to avoid overflows
    capacity as u64 * row_bytes as u64
}
