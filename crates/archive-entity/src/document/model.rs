//! Document entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use archive_core::AppError;
use archive_core::types::{DocumentId, DocumentTypeId, LocationId, UserId};

use super::handout::HandOutStatus;
use super::retention::Retention;
use crate::document_type::DocumentType;
use crate::location::Placement;
use crate::sensitivity::SensitivityTerm;
use crate::user::User;

/// Whether a document belongs to the institute or to a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// In-house document.
    Institute,
    /// Customer document; requires a customer name.
    Customer,
}

impl DocumentKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Institute => "institute",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "institute" => Ok(Self::Institute),
            "customer" => Ok(Self::Customer),
            _ => Err(AppError::validation(format!(
                "Invalid document kind: '{s}'. Expected one of: institute, customer"
            ))),
        }
    }
}

/// An archived physical document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Item title.
    pub title: String,
    /// Institute or customer document.
    pub kind: DocumentKind,
    /// Customer name (customer documents only).
    pub customer: Option<String>,
    /// Docket (case/file reference) number.
    pub docket: String,
    /// Document type with its storage duration.
    pub document_type: DocumentType,
    /// Free-text description of the content.
    pub description: String,
    /// Responsible data controller.
    pub data_controller: User,
    /// Sensitivity term; absent when tagging never completed.
    pub sensitivity: Option<SensitivityTerm>,
    /// Date the document entered the archive.
    pub entry_date: NaiveDate,
    /// Destruction schedule.
    pub retention: Retention,
    /// Storage location per tier.
    pub placement: Placement,
    /// Hand-out status.
    pub hand_out: HandOutStatus,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last modified.
    pub modified_at: DateTime<Utc>,
}

impl Document {
    /// Customer name, empty for institute documents.
    pub fn customer_name(&self) -> &str {
        self.customer.as_deref().unwrap_or("")
    }

    /// Scheduled destruction date, if any.
    pub fn destruction_date(&self) -> Option<NaiveDate> {
        self.retention.destruction_date()
    }
}

/// Validated field values written on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFields {
    /// Institute or customer document.
    pub kind: DocumentKind,
    /// Customer name (customer documents only).
    pub customer: Option<String>,
    /// Docket number.
    pub docket: String,
    /// Document type.
    pub document_type_id: DocumentTypeId,
    /// Content description.
    pub description: String,
    /// Data controller.
    pub data_controller_id: UserId,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Destruction schedule.
    pub retention: Retention,
    /// Location id per tier, in containment order.
    pub placement: [Option<LocationId>; 5],
}
