//! # archive-entity
//!
//! Domain entity models for the records archive. Every struct in this
//! crate is either a list item owned by the remote backend or a domain
//! value object. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`.

pub mod document;
pub mod document_type;
pub mod location;
pub mod sensitivity;
pub mod user;

pub use document::{
    DestroyRejection, Document, DocumentCollection, DocumentFields, DocumentKind, HandOut,
    HandOutError, HandOutStatus, Retention,
};
pub use document_type::DocumentType;
pub use location::{LocationRef, LocationTier, Placement, StorageLocation};
pub use sensitivity::SensitivityTerm;
pub use user::User;
