//! [`DocumentStore`] over the documents list.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, warn};

use archive_core::AppError;
use archive_core::result::AppResult;
use archive_core::types::DocumentId;
use archive_entity::{
    Document, DocumentCollection, DocumentFields, DocumentKind, HandOutStatus, SensitivityTerm,
};

use super::wire::{
    CreatedItem, DocumentItem, DocumentMapping, DocumentPayload, HandOutPayload,
    sensitivity_payload,
};
use super::{ListApiClient, PAGE_SIZE, query};
use crate::error::{ClientError, ResponseExt};
use crate::traits::DocumentStore;

impl ListApiClient {
    fn documents_url(&self) -> String {
        self.items_url(&self.config.lists.documents)
    }

    fn document_url(&self, id: DocumentId) -> String {
        self.item_url(&self.config.lists.documents, id.get())
    }

    fn mapping(&self) -> DocumentMapping<'_> {
        DocumentMapping {
            content_types: &self.config.content_types,
            sensitivity_field: &self.taxonomy.field,
        }
    }

    /// Map items, skipping malformed rows.
    fn to_documents(&self, items: Vec<DocumentItem>) -> Vec<Document> {
        let mapping = self.mapping();
        items
            .into_iter()
            .filter_map(|item| {
                let id = item.id;
                match item.into_document(mapping) {
                    Ok(doc) => Some(doc),
                    Err(reason) => {
                        warn!(id, reason = %reason, "Skipping malformed document row");
                        None
                    }
                }
            })
            .collect()
    }

    fn content_type_for(&self, kind: DocumentKind) -> String {
        match kind {
            DocumentKind::Customer => self.config.content_types.customer.clone(),
            DocumentKind::Institute => self.config.content_types.institute.clone(),
        }
    }
}

#[async_trait]
impl DocumentStore for ListApiClient {
    #[tracing::instrument(skip(self))]
    async fn list_documents(
        &self,
        collection: DocumentCollection,
        today: NaiveDate,
    ) -> AppResult<Vec<Document>> {
        let filter =
            query::collection_filter(collection, today, &self.config.content_types).to_odata();
        let url = self.url_with(
            &self.documents_url(),
            &[
                ("$select", query::DOCUMENT_SELECT),
                ("$expand", query::DOCUMENT_EXPAND),
                ("$filter", &filter),
                ("$top", PAGE_SIZE),
            ],
        )?;
        let items: Vec<DocumentItem> = self.fetch_all(url, "list_documents").await?;
        let documents = self.to_documents(items);
        debug!(%collection, count = documents.len(), "Fetched documents");
        Ok(documents)
    }

    #[tracing::instrument(skip(self))]
    async fn count_documents(
        &self,
        collection: DocumentCollection,
        today: NaiveDate,
    ) -> AppResult<u64> {
        #[derive(serde::Deserialize)]
        struct IdOnly {}

        let filter =
            query::collection_filter(collection, today, &self.config.content_types).to_odata();
        let url = self.url_with(
            &self.documents_url(),
            &[("$select", "Id"), ("$filter", &filter), ("$top", PAGE_SIZE)],
        )?;
        let items: Vec<IdOnly> = self.fetch_all(url, "count_documents").await?;
        Ok(items.len() as u64)
    }

    #[tracing::instrument(skip(self))]
    async fn get_document(&self, id: DocumentId) -> AppResult<Option<Document>> {
        let url = self.url_with(
            &self.document_url(id),
            &[
                ("$select", query::DOCUMENT_SELECT),
                ("$expand", query::DOCUMENT_EXPAND),
            ],
        )?;
        let item: DocumentItem = match self.fetch(url, "get_document").await {
            Ok(item) => item,
            Err(ClientError::Status {
                status_code: 404, ..
            }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        item.into_document(self.mapping())
            .map(Some)
            .map_err(|reason| AppError::conflict(format!("Document {id} is malformed: {reason}")))
    }

    #[tracing::instrument(skip(self, fields))]
    async fn add_document(&self, fields: &DocumentFields) -> AppResult<DocumentId> {
        let payload = DocumentPayload::new(fields, Some(self.content_type_for(fields.kind)));
        let response = self.post(&self.documents_url(), &payload, None).await?;
        let created = response
            .json::<CreatedItem>()
            .await
            .map_err(|e| ClientError::Decode {
                operation: "add_document",
                message: e.to_string(),
            })?;
        Ok(created.id.into())
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update_document(&self, id: DocumentId, fields: &DocumentFields) -> AppResult<()> {
        let payload = DocumentPayload::new(fields, None);
        self.merge(&self.document_url(id), &payload).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, status))]
    async fn set_hand_out(&self, id: DocumentId, status: &HandOutStatus) -> AppResult<()> {
        self.merge(&self.document_url(id), &HandOutPayload::from(status))
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, term))]
    async fn tag_sensitivity(&self, id: DocumentId, term: &SensitivityTerm) -> AppResult<()> {
        let body = sensitivity_payload(&self.taxonomy.field, term);
        self.merge(&self.document_url(id), &body).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_document(&self, id: DocumentId) -> AppResult<()> {
        self.client
            .post(self.document_url(id))
            .header("X-HTTP-Method", "DELETE")
            .header("IF-MATCH", "*")
            .send()
            .await
            .map_client_error()
            .await?;
        Ok(())
    }
}
