//! In-memory document filtering and column sorting.

pub mod criteria;
pub mod engine;
pub mod sort;

pub use criteria::{FilterCriteria, LocationFilter, Predicate};
pub use engine::{apply_predicates, filter_documents};
pub use sort::{ColumnSort, SortColumn, sort_documents};
