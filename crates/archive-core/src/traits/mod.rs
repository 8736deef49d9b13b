//! Core traits defined in `archive-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
