//! Process-local backend on top of `dashmap`.
//!
//! Joins lookups the same way the list API does, so services behave
//! identically against either backend.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use archive_core::AppError;
use archive_core::result::AppResult;
use archive_core::types::{DocumentId, DocumentTypeId, LocationId, UserId};
use archive_entity::{
    Document, DocumentCollection, DocumentFields, DocumentKind, DocumentType, HandOutStatus,
    LocationTier, Placement, SensitivityTerm, StorageLocation, User,
};

use crate::traits::{DocumentStore, ReferenceSource, TaxonomyProvider};

/// In-memory documents list, reference lists and term set.
#[derive(Debug)]
pub struct MemoryBackend {
    documents: DashMap<DocumentId, Document>,
    document_types: DashMap<DocumentTypeId, DocumentType>,
    locations: DashMap<LocationId, StorageLocation>,
    users: DashMap<UserId, User>,
    terms: DashMap<Uuid, SensitivityTerm>,
    last_id: AtomicI64,
    tagging_available: AtomicBool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            documents: DashMap::new(),
            document_types: DashMap::new(),
            locations: DashMap::new(),
            users: DashMap::new(),
            terms: DashMap::new(),
            last_id: AtomicI64::new(0),
            tagging_available: AtomicBool::new(true),
        }
    }
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed document types.
    pub fn with_document_types(self, types: impl IntoIterator<Item = DocumentType>) -> Self {
        for t in types {
            self.document_types.insert(t.id, t);
        }
        self
    }

    /// Seed storage locations.
    pub fn with_locations(self, locations: impl IntoIterator<Item = StorageLocation>) -> Self {
        for l in locations {
            self.locations.insert(l.id, l);
        }
        self
    }

    /// Seed site users.
    pub fn with_users(self, users: impl IntoIterator<Item = User>) -> Self {
        for u in users {
            self.users.insert(u.id, u);
        }
        self
    }

    /// Seed sensitivity terms.
    pub fn with_terms(self, terms: impl IntoIterator<Item = SensitivityTerm>) -> Self {
        for t in terms {
            self.terms.insert(t.id, t);
        }
        self
    }

    /// Store a fully-formed document as is.
    pub fn insert_document(&self, document: Document) {
        self.last_id.fetch_max(document.id.get(), Ordering::SeqCst);
        self.documents.insert(document.id, document);
    }

    /// Make metadata tagging fail, as when the term store is unreachable.
    pub fn set_tagging_available(&self, available: bool) {
        self.tagging_available.store(available, Ordering::SeqCst);
    }

    /// Number of stored documents, regardless of collection.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn lookup_type(&self, id: DocumentTypeId) -> AppResult<DocumentType> {
        self.document_types
            .get(&id)
            .map(|t| t.value().clone())
            .ok_or_else(|| AppError::validation(format!("Unknown document type {id}")))
    }

    fn lookup_user(&self, id: UserId) -> AppResult<User> {
        self.users
            .get(&id)
            .map(|u| u.value().clone())
            .ok_or_else(|| AppError::validation(format!("Unknown user {id}")))
    }

    fn lookup_placement(&self, ids: &[Option<LocationId>; 5]) -> AppResult<Placement> {
        let mut placement = Placement::new();
        for (tier, id) in LocationTier::ALL.into_iter().zip(ids) {
            let Some(id) = id else { continue };
            let location = self
                .locations
                .get(id)
                .map(|l| l.to_ref())
                .ok_or_else(|| AppError::validation(format!("Unknown location {id}")))?;
            placement.set(tier, Some(location));
        }
        Ok(placement)
    }

    /// Apply `fields` to `document`, resolving lookups.
    fn apply(&self, document: &mut Document, fields: &DocumentFields) -> AppResult<()> {
        document.kind = fields.kind;
        document.customer = match fields.kind {
            DocumentKind::Customer => fields.customer.clone(),
            DocumentKind::Institute => None,
        };
        document.docket = fields.docket.clone();
        document.document_type = self.lookup_type(fields.document_type_id)?;
        document.description = fields.description.clone();
        document.data_controller = self.lookup_user(fields.data_controller_id)?;
        document.entry_date = fields.entry_date;
        document.retention = fields.retention;
        document.placement = self.lookup_placement(&fields.placement)?;
        document.modified_at = Utc::now();
        Ok(())
    }

    fn not_found(id: DocumentId) -> AppError {
        AppError::not_found(format!("Document {id} not found"))
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn list_documents(
        &self,
        collection: DocumentCollection,
        today: NaiveDate,
    ) -> AppResult<Vec<Document>> {
        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| collection.includes(entry.value(), today))
            .map(|entry| entry.value().clone())
            .collect();
        documents.sort_by_key(|d| d.id);
        Ok(documents)
    }

    async fn count_documents(
        &self,
        collection: DocumentCollection,
        today: NaiveDate,
    ) -> AppResult<u64> {
        Ok(self
            .documents
            .iter()
            .filter(|entry| collection.includes(entry.value(), today))
            .count() as u64)
    }

    async fn get_document(&self, id: DocumentId) -> AppResult<Option<Document>> {
        Ok(self.documents.get(&id).map(|d| d.value().clone()))
    }

    async fn add_document(&self, fields: &DocumentFields) -> AppResult<DocumentId> {
        let now = Utc::now();
        let mut document = Document {
            id: DocumentId::from(0),
            title: String::new(),
            kind: fields.kind,
            customer: None,
            docket: String::new(),
            document_type: self.lookup_type(fields.document_type_id)?,
            description: String::new(),
            data_controller: self.lookup_user(fields.data_controller_id)?,
            sensitivity: None,
            entry_date: fields.entry_date,
            retention: fields.retention,
            placement: Placement::new(),
            hand_out: HandOutStatus::Available,
            created_at: now,
            modified_at: now,
        };
        self.apply(&mut document, fields)?;

        let id = DocumentId::from(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        document.id = id;
        self.documents.insert(id, document);
        Ok(id)
    }

    async fn update_document(&self, id: DocumentId, fields: &DocumentFields) -> AppResult<()> {
        let mut updated = self
            .documents
            .get(&id)
            .map(|d| d.value().clone())
            .ok_or_else(|| Self::not_found(id))?;
        self.apply(&mut updated, fields)?;
        self.documents.insert(id, updated);
        Ok(())
    }

    async fn set_hand_out(&self, id: DocumentId, status: &HandOutStatus) -> AppResult<()> {
        let mut document = self.documents.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        document.hand_out = status.clone();
        document.modified_at = Utc::now();
        Ok(())
    }

    async fn tag_sensitivity(&self, id: DocumentId, term: &SensitivityTerm) -> AppResult<()> {
        if !self.tagging_available.load(Ordering::SeqCst) {
            return Err(AppError::external_service("Term store is unavailable"));
        }
        let mut document = self.documents.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        document.sensitivity = Some(term.clone());
        Ok(())
    }

    async fn delete_document(&self, id: DocumentId) -> AppResult<()> {
        self.documents
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl ReferenceSource for MemoryBackend {
    async fn document_types(&self) -> AppResult<Vec<DocumentType>> {
        let mut types: Vec<DocumentType> =
            self.document_types.iter().map(|t| t.value().clone()).collect();
        types.sort_by_key(|t| t.id);
        Ok(types)
    }

    async fn locations(&self) -> AppResult<Vec<StorageLocation>> {
        let mut locations: Vec<StorageLocation> =
            self.locations.iter().map(|l| l.value().clone()).collect();
        locations.sort_by_key(|l| l.id);
        Ok(locations)
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}

#[async_trait]
impl TaxonomyProvider for MemoryBackend {
    async fn sensitivity_terms(&self) -> AppResult<Vec<SensitivityTerm>> {
        let mut terms: Vec<SensitivityTerm> = self.terms.iter().map(|t| t.value().clone()).collect();
        terms.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(terms)
    }

    async fn resolve_term(&self, id: Uuid) -> AppResult<Option<SensitivityTerm>> {
        Ok(self.terms.get(&id).map(|t| t.value().clone()))
    }
}
