//! Archived document entities.

pub mod collection;
pub mod handout;
pub mod model;
pub mod retention;

pub use collection::DocumentCollection;
pub use handout::{HandOut, HandOutError, HandOutStatus};
pub use model::{Document, DocumentFields, DocumentKind};
pub use retention::{DestroyRejection, Retention};
