//! This module collects functionality for keeping track of the
//! memory held by containers.

pub mod bytesized;
