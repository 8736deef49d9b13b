//! Column-click sorting of a filtered document list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use archive_core::AppError;
use archive_core::types::SortDirection;
use archive_entity::{Document, DocumentCollection, LocationTier};

/// A sortable column of the document list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Docket,
    Content,
    DocumentType,
    Location(LocationTier),
    /// Destruction date in the destructible collection, entry date elsewhere.
    Date,
    Customer,
}

impl SortColumn {
    /// Compare two documents ascending. Text compares case-insensitively
    /// with unset locations as empty text; dates compare chronologically.
    pub fn compare(self, a: &Document, b: &Document, collection: DocumentCollection) -> Ordering {
        let text = |d: &Document| -> String {
            match self {
                Self::Docket => d.docket.to_lowercase(),
                Self::Content => d.description.to_lowercase(),
                Self::DocumentType => d.document_type.title.to_lowercase(),
                Self::Location(tier) => d.placement.title(tier).to_lowercase(),
                Self::Customer => d.customer_name().to_lowercase(),
                Self::Date => String::new(),
            }
        };
        match self {
            Self::Date => collection.date_of(a).cmp(&collection.date_of(b)),
            _ => text(a).cmp(&text(b)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docket => "docket",
            Self::Content => "content",
            Self::DocumentType => "type",
            Self::Location(tier) => tier.as_str(),
            Self::Date => "date",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "docket" => Ok(Self::Docket),
            "content" | "description" => Ok(Self::Content),
            "type" | "document_type" => Ok(Self::DocumentType),
            "date" => Ok(Self::Date),
            "customer" => Ok(Self::Customer),
            other => other.parse::<LocationTier>().map(Self::Location).map_err(|_| {
                AppError::validation(format!(
                    "Invalid sort column: '{s}'. Expected one of: docket, content, type, \
                     building, room, rack, shelf, folder, date, customer"
                ))
            }),
        }
    }
}

/// The sorted column and its direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl ColumnSort {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Register a click on `column`: the same column flips direction, a new
    /// column starts ascending.
    pub fn click(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.toggled();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Asc;
        }
    }
}

/// Stable in-place sort by the current column. Unsorted views keep their order.
pub fn sort_documents(documents: &mut [Document], sort: ColumnSort, collection: DocumentCollection) {
    if let Some(column) = sort.column {
        documents.sort_by(|a, b| sort.direction.apply(column.compare(a, b, collection)));
    }
}
