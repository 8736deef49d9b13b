//! # archive-core
//!
//! Core crate for the records archive. Contains the configuration schema,
//! typed identifiers, query filter/sort primitives, the cache trait, the
//! clock abstraction, and the unified error system.
//!
//! This crate has **no** internal dependencies on other archive crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
