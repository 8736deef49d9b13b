//! # archive-service
//!
//! Business logic for the records archive. The location resolver, the
//! retention calculator and the filter engine are pure functions over data
//! already in memory; the services orchestrate the backend seams and the
//! reference data cache.
//!
//! Services follow constructor injection: every dependency is handed in at
//! construction time as an `Arc`.

pub mod context;
pub mod document;
pub mod filter;
pub mod location;
pub mod reference;
pub mod retention;
pub mod view;

pub use context::ServiceContext;
pub use document::{DocumentDraft, DocumentService, DraftError, RequiredField, WriteOutcome};
pub use filter::{ColumnSort, FilterCriteria, LocationFilter, Predicate, SortColumn};
pub use location::{LocationNode, LocationResolver, LocationSelection, MenuItem};
pub use reference::ReferenceService;
pub use view::{Dashboard, DocumentView, ViewService};

#[cfg(test)]
mod test_support;
