//! Create, update, hand-out, check-in, and destroy.
//!
//! Every write is a single backend round trip with no retry. Create and
//! update follow up with a second request that tags the sensitivity term;
//! a failed follow-up leaves the document saved but untagged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use archive_core::AppError;
use archive_core::result::AppResult;
use archive_core::types::{DocumentId, UserId};
use archive_entity::{Document, HandOut};

use super::form::DocumentDraft;
use crate::context::ServiceContext;
use crate::reference::ReferenceService;

/// Result of a create or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutcome {
    /// The written document.
    pub id: DocumentId,
    /// Whether the sensitivity follow-up succeeded.
    pub sensitivity_tagged: bool,
}

/// Hand-out form values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOutRequest {
    pub recipient: UserId,
    pub date: NaiveDate,
    pub reason: String,
}

/// Lifecycle operations on archived documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    ctx: ServiceContext,
    reference: ReferenceService,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(ctx: ServiceContext) -> Self {
        Self {
            reference: ReferenceService::new(ctx.clone()),
            ctx,
        }
    }

    /// Fetch a document.
    pub async fn get(&self, id: DocumentId) -> AppResult<Document> {
        self.ctx
            .backend
            .documents
            .get_document(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// An edit form pre-filled from the stored document.
    pub async fn edit_draft(&self, id: DocumentId) -> AppResult<DocumentDraft> {
        Ok(DocumentDraft::from_document(&self.get(id).await?))
    }

    /// Archive a new document.
    pub async fn create(&self, draft: &DocumentDraft) -> AppResult<WriteOutcome> {
        let valid = draft.validate()?;
        let id = self.ctx.backend.documents.add_document(&valid.fields).await?;
        info!(document_id = %id, kind = %valid.fields.kind, "Document archived");

        let sensitivity_tagged = self.tag(id, valid.sensitivity).await;
        Ok(WriteOutcome {
            id,
            sensitivity_tagged,
        })
    }

    /// Overwrite the editable fields of a document. Concurrent edits are
    /// last-write-wins.
    pub async fn update(&self, id: DocumentId, draft: &DocumentDraft) -> AppResult<WriteOutcome> {
        let valid = draft.validate()?;
        self.ctx
            .backend
            .documents
            .update_document(id, &valid.fields)
            .await?;
        info!(document_id = %id, "Document updated");

        let sensitivity_tagged = self.tag(id, valid.sensitivity).await;
        Ok(WriteOutcome {
            id,
            sensitivity_tagged,
        })
    }

    /// Hand a document out to a recipient.
    pub async fn hand_out(&self, id: DocumentId, request: HandOutRequest) -> AppResult<()> {
        let document = self.get(id).await?;
        let recipient = self.reference.user(request.recipient).await?;
        let status = document.hand_out.hand_out(HandOut {
            recipient,
            date: request.date,
            reason: request.reason.trim().to_string(),
        })?;
        self.ctx.backend.documents.set_hand_out(id, &status).await?;
        info!(document_id = %id, recipient_id = %request.recipient, "Document handed out");
        Ok(())
    }

    /// Return a handed-out document. Clears recipient, date and reason.
    pub async fn check_in(&self, id: DocumentId) -> AppResult<()> {
        let document = self.get(id).await?;
        let status = document.hand_out.check_in()?;
        self.ctx.backend.documents.set_hand_out(id, &status).await?;
        info!(document_id = %id, "Document checked in");
        Ok(())
    }

    /// The document, if it may be destroyed today.
    pub async fn destroy_candidate(&self, id: DocumentId) -> AppResult<Document> {
        let document = self.get(id).await?;
        document.retention.check_destroy(self.ctx.today())?;
        Ok(document)
    }

    /// Delete a document whose destruction date has passed.
    pub async fn destroy(&self, id: DocumentId) -> AppResult<()> {
        self.destroy_candidate(id).await?;
        self.ctx.backend.documents.delete_document(id).await?;
        info!(document_id = %id, "Document destroyed");
        Ok(())
    }

    async fn tag(&self, id: DocumentId, term_id: Uuid) -> bool {
        match self.try_tag(id, term_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    document_id = %id,
                    term_id = %term_id,
                    error = %e,
                    "Sensitivity tagging failed, document saved without it"
                );
                false
            }
        }
    }

    async fn try_tag(&self, id: DocumentId, term_id: Uuid) -> AppResult<()> {
        let term = self
            .ctx
            .backend
            .taxonomy
            .resolve_term(term_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sensitivity term {term_id} not found")))?;
        self.ctx.backend.documents.tag_sensitivity(id, &term).await
    }
}
