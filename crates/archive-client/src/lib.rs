//! # archive-client
//!
//! Everything that talks to the remote list backend:
//!
//! - [`traits`]: the seams the service layer depends on
//! - [`rest`]: the hosted list/taxonomy REST API client
//! - [`memory`]: a process-local backend used by tests and demos
//!
//! [`Backend::from_config`] selects the implementation at runtime.

pub mod backend;
pub mod error;
pub mod memory;
pub mod rest;
pub mod traits;

pub use backend::Backend;
pub use memory::MemoryBackend;
pub use rest::ListApiClient;
pub use traits::{DocumentStore, ReferenceSource, TaxonomyProvider};
