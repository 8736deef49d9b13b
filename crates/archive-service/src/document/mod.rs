//! Document create/edit forms and lifecycle operations.

pub mod form;
pub mod service;

pub use form::{DocumentDraft, DraftError, RequiredField, ValidDraft};
pub use service::{DocumentService, HandOutRequest, WriteOutcome};
