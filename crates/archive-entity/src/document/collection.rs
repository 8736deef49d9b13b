//! The document collections a user can browse.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use archive_core::AppError;

use super::model::{Document, DocumentKind};

/// A named subset of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCollection {
    /// Institute documents still in retention.
    Institute,
    /// Customer documents still in retention.
    Customer,
    /// Documents whose destruction date has passed.
    Destructible,
    /// Documents currently handed out.
    Retrieved,
}

impl DocumentCollection {
    /// All collections in dashboard order.
    pub const ALL: [DocumentCollection; 4] = [
        Self::Institute,
        Self::Customer,
        Self::Retrieved,
        Self::Destructible,
    ];

    /// Document kind the collection is restricted to.
    pub fn kind(self) -> Option<DocumentKind> {
        match self {
            Self::Institute => Some(DocumentKind::Institute),
            Self::Customer => Some(DocumentKind::Customer),
            Self::Destructible | Self::Retrieved => None,
        }
    }

    /// Whether `document` belongs to this collection on `today`.
    pub fn includes(self, document: &Document, today: NaiveDate) -> bool {
        match self {
            Self::Institute | Self::Customer => {
                Some(document.kind) == self.kind() && !document.retention.is_due(today)
            }
            Self::Destructible => document.retention.is_due(today),
            Self::Retrieved => document.hand_out.is_handed_out(),
        }
    }

    /// The date shown and filtered on: destruction date for the
    /// destructible collection, entry date otherwise.
    pub fn date_of(self, document: &Document) -> Option<NaiveDate> {
        match self {
            Self::Destructible => document.destruction_date(),
            _ => Some(document.entry_date),
        }
    }

    /// Whether the customer column and filter apply.
    pub fn shows_customer(self) -> bool {
        self == Self::Customer
    }

    /// Heading of the collection.
    pub fn title(self) -> &'static str {
        match self {
            Self::Institute => "In-house documents",
            Self::Customer => "Customer documents",
            Self::Destructible => "Documents to destroy",
            Self::Retrieved => "Checked-out documents",
        }
    }

    /// Informational message when the collection is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Institute => "There are no institute documents",
            Self::Customer => "There are no customer documents",
            Self::Destructible => "There are no documents to be destroyed",
            Self::Retrieved => "There are no retrieved documents",
        }
    }

    /// Return the collection as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Institute => "institute",
            Self::Customer => "customer",
            Self::Destructible => "destructible",
            Self::Retrieved => "retrieved",
        }
    }
}

impl fmt::Display for DocumentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentCollection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "institute" => Ok(Self::Institute),
            "customer" => Ok(Self::Customer),
            "destructible" => Ok(Self::Destructible),
            "retrieved" => Ok(Self::Retrieved),
            _ => Err(AppError::validation(format!(
                "Invalid collection: '{s}'. Expected one of: institute, customer, destructible, retrieved"
            ))),
        }
    }
}
