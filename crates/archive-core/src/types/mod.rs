//! Core type definitions used across the archive workspace.

pub mod filter;
pub mod id;
pub mod sorting;

pub use filter::{FilterExpr, FilterField, FilterOp, FilterValue};
pub use id::*;
pub use sorting::SortDirection;
