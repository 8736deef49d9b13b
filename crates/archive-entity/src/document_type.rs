//! Document type reference data.

use serde::{Deserialize, Serialize};

use archive_core::types::DocumentTypeId;

/// A kind of document with its configured retention period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    /// Type identifier.
    pub id: DocumentTypeId,
    /// Display title, also used by the type filter.
    pub title: String,
    /// Storage duration in whole years.
    pub storage_years: u32,
}

impl DocumentType {
    /// Create a document type.
    pub fn new(id: impl Into<DocumentTypeId>, title: impl Into<String>, storage_years: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            storage_years,
        }
    }
}
