//! Storage location hierarchy: resolution, menus, and cascading selection.

pub mod resolver;
pub mod selection;

pub use resolver::{LocationNode, LocationResolver, MenuItem, TierViolation};
pub use selection::LocationSelection;
