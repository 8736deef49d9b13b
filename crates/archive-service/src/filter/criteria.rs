//! Filter criteria and the predicates they produce.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use archive_entity::{Document, DocumentCollection, LocationTier};

/// Matches documents stored at a location with `title` at `tier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub tier: LocationTier,
    pub title: String,
}

impl LocationFilter {
    pub fn new(tier: LocationTier, title: impl Into<String>) -> Self {
        Self {
            tier,
            title: title.into(),
        }
    }
}

/// A single active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Description contains the text (case-sensitive).
    Content(String),
    /// Document type title is one of the set.
    Types(BTreeSet<String>),
    /// Location title at a tier.
    Location(LocationFilter),
    /// Customer name contains the text (case-insensitive).
    Customer(String),
    /// The collection's date column equals the date.
    Date(NaiveDate),
}

impl Predicate {
    /// Whether `document` passes, with dates read from `collection`'s
    /// date column.
    pub fn matches(&self, document: &Document, collection: DocumentCollection) -> bool {
        match self {
            Self::Content(text) => document.description.contains(text.as_str()),
            Self::Types(titles) => titles.contains(&document.document_type.title),
            Self::Location(filter) => document.placement.title(filter.tier) == filter.title,
            Self::Customer(text) => document
                .customer_name()
                .to_lowercase()
                .contains(&text.to_lowercase()),
            Self::Date(date) => collection.date_of(document) == Some(*date),
        }
    }
}

/// The filter panel state of a document view. Blank text and empty sets
/// are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub content: Option<String>,
    pub types: BTreeSet<String>,
    pub location: Option<LocationFilter>,
    pub customer: Option<String>,
    pub date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_type(mut self, title: impl Into<String>) -> Self {
        self.types.insert(title.into());
        self
    }

    pub fn with_location(mut self, filter: LocationFilter) -> Self {
        self.location = Some(filter);
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Toggle a document type in or out of the type filter.
    pub fn toggle_type(&mut self, title: &str) {
        if !self.types.remove(title) {
            self.types.insert(title.to_string());
        }
    }

    /// Active predicates. The customer filter only applies to
    /// collections that show the customer column.
    pub fn predicates(&self, collection: DocumentCollection) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(content) = self.content.as_ref().filter(|c| !c.is_empty()) {
            predicates.push(Predicate::Content(content.clone()));
        }
        if !self.types.is_empty() {
            predicates.push(Predicate::Types(self.types.clone()));
        }
        if let Some(location) = &self.location {
            predicates.push(Predicate::Location(location.clone()));
        }
        if collection.shows_customer() {
            if let Some(customer) = self.customer.as_ref().filter(|c| !c.trim().is_empty()) {
                predicates.push(Predicate::Customer(customer.clone()));
            }
        }
        if let Some(date) = self.date {
            predicates.push(Predicate::Date(date));
        }
        predicates
    }

    /// Whether no predicate is active for `collection`.
    pub fn is_empty(&self, collection: DocumentCollection) -> bool {
        self.predicates(collection).is_empty()
    }
}
