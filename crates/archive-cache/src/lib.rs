//! # archive-cache
//!
//! Cache provider implementation for the records archive. Reference data
//! (users, document types, locations, sensitivity terms) is cached
//! in-process using [moka](https://crates.io/crates/moka) with per-entry
//! expiry.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
