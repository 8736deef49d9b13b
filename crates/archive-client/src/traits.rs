//! Backend seams.
//!
//! Each trait maps onto one concern of the remote list API. The service
//! layer only ever holds `Arc<dyn Trait>` values.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use archive_core::result::AppResult;
use archive_core::types::DocumentId;
use archive_entity::{
    Document, DocumentCollection, DocumentFields, DocumentType, HandOutStatus, SensitivityTerm,
    StorageLocation, User,
};

/// Reads and writes items of the documents list.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug + 'static {
    /// Fetch every document of `collection` as of `today`, with type,
    /// controller, location and taxonomy fields joined.
    async fn list_documents(
        &self,
        collection: DocumentCollection,
        today: NaiveDate,
    ) -> AppResult<Vec<Document>>;

    /// Count the documents of `collection` without fetching their fields.
    async fn count_documents(&self, collection: DocumentCollection, today: NaiveDate)
    -> AppResult<u64>;

    /// Fetch a single document.
    async fn get_document(&self, id: DocumentId) -> AppResult<Option<Document>>;

    /// Add a new item and return its id.
    async fn add_document(&self, fields: &DocumentFields) -> AppResult<DocumentId>;

    /// Overwrite the editable fields of an item.
    async fn update_document(&self, id: DocumentId, fields: &DocumentFields) -> AppResult<()>;

    /// Write the hand-out columns of an item.
    async fn set_hand_out(&self, id: DocumentId, status: &HandOutStatus) -> AppResult<()>;

    /// Attach a sensitivity term to the managed metadata column of an item.
    async fn tag_sensitivity(&self, id: DocumentId, term: &SensitivityTerm) -> AppResult<()>;

    /// Delete an item.
    async fn delete_document(&self, id: DocumentId) -> AppResult<()>;
}

/// Reads the immutable reference lists.
#[async_trait]
pub trait ReferenceSource: Send + Sync + fmt::Debug + 'static {
    /// All document types.
    async fn document_types(&self) -> AppResult<Vec<DocumentType>>;

    /// All storage locations, flat.
    async fn locations(&self) -> AppResult<Vec<StorageLocation>>;

    /// All site users.
    async fn users(&self) -> AppResult<Vec<User>>;
}

/// Reads the sensitivity vocabulary from the term store.
#[async_trait]
pub trait TaxonomyProvider: Send + Sync + fmt::Debug + 'static {
    /// Every term of the configured sensitivity term set.
    async fn sensitivity_terms(&self) -> AppResult<Vec<SensitivityTerm>>;

    /// Resolve a term by id.
    async fn resolve_term(&self, id: Uuid) -> AppResult<Option<SensitivityTerm>>;
}
