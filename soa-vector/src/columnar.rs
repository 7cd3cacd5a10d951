//! This module collects the storage of individual columns
//! and the machinery for addressing them.

pub mod columns;
pub mod key;
pub mod raw_column;
