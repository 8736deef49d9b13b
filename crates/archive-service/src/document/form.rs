//! The create/edit form of a document.
//!
//! The destruction date is recomputed whenever the entry date, the
//! document type, or the indestructible flag changes.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use archive_core::AppError;
use archive_core::types::UserId;
use archive_entity::{Document, DocumentFields, DocumentKind, DocumentType, Retention};

use crate::location::LocationSelection;
use crate::retention;

/// A form field that must be filled before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Docket,
    DocumentType,
    Description,
    Sensitivity,
    EntryDate,
    DataController,
    Customer,
    DestructionDate,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Docket => "docket",
            Self::DocumentType => "document type",
            Self::Description => "description",
            Self::Sensitivity => "sensitivity",
            Self::EntryDate => "entry date",
            Self::DataController => "data controller",
            Self::Customer => "customer",
            Self::DestructionDate => "destruction date",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a draft cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please fill in all required fields: {}", join(.0))]
    MissingFields(Vec<RequiredField>),
}

fn join(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(RequiredField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub fields: DocumentFields,
    pub sensitivity: Uuid,
}

/// Field values of the document form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub kind: DocumentKind,
    pub customer: Option<String>,
    pub docket: String,
    pub description: String,
    pub sensitivity: Option<Uuid>,
    pub data_controller: Option<UserId>,
    pub location: LocationSelection,
    document_type: Option<DocumentType>,
    entry_date: Option<NaiveDate>,
    indestructible: bool,
    destruction_date: Option<NaiveDate>,
}

impl DocumentDraft {
    /// An empty form for a new document of `kind`.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            customer: None,
            docket: String::new(),
            description: String::new(),
            sensitivity: None,
            data_controller: None,
            location: LocationSelection::new(),
            document_type: None,
            entry_date: None,
            indestructible: false,
            destruction_date: None,
        }
    }

    /// A form pre-filled from `document`. The stored destruction date is
    /// kept until an input changes.
    pub fn from_document(document: &Document) -> Self {
        Self {
            kind: document.kind,
            customer: document.customer.clone(),
            docket: document.docket.clone(),
            description: document.description.clone(),
            sensitivity: document.sensitivity.as_ref().map(|s| s.id),
            data_controller: Some(document.data_controller.id),
            location: LocationSelection::from_placement(&document.placement),
            document_type: Some(document.document_type.clone()),
            entry_date: Some(document.entry_date),
            indestructible: document.retention.is_indestructible(),
            destruction_date: document.destruction_date(),
        }
    }

    pub fn document_type(&self) -> Option<&DocumentType> {
        self.document_type.as_ref()
    }

    pub fn entry_date(&self) -> Option<NaiveDate> {
        self.entry_date
    }

    pub fn is_indestructible(&self) -> bool {
        self.indestructible
    }

    /// The computed destruction date; `None` for indestructible documents.
    pub fn destruction_date(&self) -> Option<NaiveDate> {
        self.destruction_date
    }

    pub fn set_document_type(&mut self, document_type: Option<DocumentType>) {
        self.document_type = document_type;
        self.recompute();
    }

    pub fn set_entry_date(&mut self, entry_date: Option<NaiveDate>) {
        self.entry_date = entry_date;
        self.recompute();
    }

    pub fn set_indestructible(&mut self, indestructible: bool) {
        self.indestructible = indestructible;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.destruction_date = match (&self.document_type, self.entry_date) {
            _ if self.indestructible => None,
            (Some(document_type), Some(entry_date)) => {
                retention::destruction_date(entry_date, document_type.storage_years)
            }
            _ => None,
        };
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.docket.trim().is_empty() {
            missing.push(RequiredField::Docket);
        }
        if self.document_type.is_none() {
            missing.push(RequiredField::DocumentType);
        }
        if self.description.trim().is_empty() {
            missing.push(RequiredField::Description);
        }
        if self.sensitivity.is_none() {
            missing.push(RequiredField::Sensitivity);
        }
        if self.entry_date.is_none() {
            missing.push(RequiredField::EntryDate);
        }
        if self.data_controller.is_none() {
            missing.push(RequiredField::DataController);
        }
        if self.kind == DocumentKind::Customer
            && self.customer.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            missing.push(RequiredField::Customer);
        }
        if missing.is_empty() && !self.indestructible && self.destruction_date.is_none() {
            missing.push(RequiredField::DestructionDate);
        }
        missing
    }

    /// Check required fields and produce the values to write.
    pub fn validate(&self) -> Result<ValidDraft, DraftError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }

        let (
            Some(document_type),
            Some(entry_date),
            Some(data_controller_id),
            Some(sensitivity),
        ) = (
            &self.document_type,
            self.entry_date,
            self.data_controller,
            self.sensitivity,
        )
        else {
            return Err(DraftError::MissingFields(vec![RequiredField::DocumentType]));
        };

        let retention = match self.destruction_date {
            _ if self.indestructible => Retention::Indestructible,
            Some(destruction_date) => Retention::Destructible { destruction_date },
            None => return Err(DraftError::MissingFields(vec![RequiredField::DestructionDate])),
        };

        let fields = DocumentFields {
            kind: self.kind,
            customer: match self.kind {
                DocumentKind::Customer => self.customer.as_ref().map(|c| c.trim().to_string()),
                DocumentKind::Institute => None,
            },
            docket: self.docket.trim().to_string(),
            document_type_id: document_type.id,
            description: self.description.clone(),
            data_controller_id,
            entry_date,
            retention,
            placement: self.location.ids(),
        };
        Ok(ValidDraft {
            fields,
            sensitivity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled(kind: DocumentKind) -> DocumentDraft {
        let mut draft = DocumentDraft::new(kind);
        draft.docket = "AZ-17".into();
        draft.description = "Lease".into();
        draft.sensitivity = Some(Uuid::nil());
        draft.data_controller = Some(1.into());
        draft.set_document_type(Some(DocumentType::new(3, "Contract", 5)));
        draft.set_entry_date(Some(date(2020, 6, 1)));
        draft
    }

    #[test]
    fn test_recompute_on_input_change() {
        let mut draft = filled(DocumentKind::Institute);
        assert_eq!(draft.destruction_date(), Some(date(2025, 12, 31)));

        draft.set_document_type(Some(DocumentType::new(4, "Invoice", 10)));
        assert_eq!(draft.destruction_date(), Some(date(2030, 12, 31)));

        draft.set_entry_date(Some(date(2021, 2, 1)));
        assert_eq!(draft.destruction_date(), Some(date(2031, 12, 31)));

        draft.set_indestructible(true);
        assert_eq!(draft.destruction_date(), None);

        draft.set_indestructible(false);
        assert_eq!(draft.destruction_date(), Some(date(2031, 12, 31)));
    }

    #[test]
    fn test_empty_draft_lists_every_field() {
        let err = DocumentDraft::new(DocumentKind::Customer)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            DraftError::MissingFields(vec![
                RequiredField::Docket,
                RequiredField::DocumentType,
                RequiredField::Description,
                RequiredField::Sensitivity,
                RequiredField::EntryDate,
                RequiredField::DataController,
                RequiredField::Customer,
            ])
        );
    }

    #[test]
    fn test_customer_only_required_for_customer_documents() {
        assert!(filled(DocumentKind::Institute).validate().is_ok());

        let mut draft = filled(DocumentKind::Customer);
        draft.customer = Some("  ".into());
        assert_eq!(
            draft.validate().unwrap_err(),
            DraftError::MissingFields(vec![RequiredField::Customer])
        );

        draft.customer = Some(" ACME ".into());
        let valid = draft.validate().unwrap();
        assert_eq!(valid.fields.customer.as_deref(), Some("ACME"));
    }

    #[test]
    fn test_validated_fields() {
        let valid = filled(DocumentKind::Institute).validate().unwrap();
        assert_eq!(valid.fields.document_type_id.get(), 3);
        assert_eq!(valid.fields.customer, None);
        assert_eq!(
            valid.fields.retention,
            Retention::Destructible {
                destruction_date: date(2025, 12, 31)
            }
        );
        assert_eq!(valid.fields.placement, [None; 5]);
        assert_eq!(valid.sensitivity, Uuid::nil());
    }

    #[test]
    fn test_error_converts_to_validation() {
        let err: AppError = DraftError::MissingFields(vec![RequiredField::Docket]).into();
        assert!(err.is_validation());
        assert!(err.message.contains("docket"));
    }
}
