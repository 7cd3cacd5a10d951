//! This crate provides [SoaVector], a growable container that stores
//! the fields of its elements column by column.
//!
//! Every column lives in its own contiguous allocation, so passes that
//! only touch one or two attributes of each element (sums, tree
//! aggregations, filters) stream through exactly the memory they need.
//! Columns are addressed by zero-sized key types, so the column and its
//! element type are chosen at compile time.
//!
//! ```
//! use soa_vector::{Row, SoaVector};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Row)]
//! struct Node {
//!     parent: u32,
//!     value: u32,
//!     sum: u32,
//! }
//!
//! let mut tree = SoaVector::<Node>::new();
//! tree.push(Node { parent: 0, value: 2, sum: 0 });
//! tree.push(Node { parent: 0, value: 6, sum: 0 });
//!
//! *tree.at_mut(Node::SUM, 0) = *tree.at(Node::VALUE, 0);
//! for index in 1..tree.len() {
//!     let parent = *tree.at(Node::PARENT, index) as usize;
//!     let sum = *tree.at(Node::SUM, parent) + *tree.at(Node::VALUE, index);
//!     *tree.at_mut(Node::SUM, index) = sum;
//! }
//!
//! assert_eq!(tree.column(Node::SUM), &[2, 8]);
//! ```

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

// Lets the derive macro refer to `::soa_vector` from inside this crate.
#[allow(unused_extern_crates)]
extern crate self as soa_vector;

pub mod columnar;
pub mod error;
pub mod growth;
pub mod management;
pub mod row;
pub mod vector;

pub use columnar::{
    columns::{Columns, StorageOf},
    key::{Col, ColumnKey},
    raw_column::RawColumn,
};
pub use error::CapacityError;
pub use management::bytesized::ByteSized;
pub use row::Row;
pub use vector::{iter::Rows, SoaVector};

/// Derives [Row] for a struct with named fields.
///
/// Besides the [Row] implementation this generates one zero-sized key
/// type per field, placed in a module named after the struct
/// (`Node` gets `node_columns`), and an associated constant per field
/// holding that key (`Node::PARENT`).
pub use soa_vector_macros::Row;
