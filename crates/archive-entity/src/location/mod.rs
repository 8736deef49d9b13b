//! Storage location entities.

pub mod model;
pub mod tier;

pub use model::{LocationRef, Placement, StorageLocation};
pub use tier::LocationTier;
