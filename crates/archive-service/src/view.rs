//! Collection views: load, filter, sort, and the dashboard counts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use archive_core::result::AppResult;
use archive_entity::{Document, DocumentCollection};

use crate::context::ServiceContext;
use crate::filter::{ColumnSort, FilterCriteria, SortColumn, filter_documents, sort_documents};

/// A loaded collection with its filter and sort state.
///
/// The view owns a snapshot; after a write, load the collection again.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentView {
    collection: DocumentCollection,
    documents: Vec<Document>,
    criteria: FilterCriteria,
    sort: ColumnSort,
    visible: Vec<Document>,
}

impl DocumentView {
    /// Wraps a loaded document set, unfiltered and unsorted.
    pub fn new(collection: DocumentCollection, documents: Vec<Document>) -> Self {
        Self {
            collection,
            visible: documents.clone(),
            documents,
            criteria: FilterCriteria::default(),
            sort: ColumnSort::default(),
        }
    }

    pub fn collection(&self) -> DocumentCollection {
        self.collection
    }

    /// Every loaded document.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Documents after filtering and sorting.
    pub fn visible(&self) -> &[Document] {
        &self.visible
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> ColumnSort {
        self.sort
    }

    /// Informational text shown instead of the list when the collection
    /// holds no documents.
    pub fn message(&self) -> Option<&'static str> {
        self.documents
            .is_empty()
            .then(|| self.collection.empty_message())
    }

    /// Replace the filter criteria.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh();
    }

    /// Edit the filter criteria in place.
    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        edit(&mut self.criteria);
        self.refresh();
    }

    /// Register a click on a column header.
    pub fn click_column(&mut self, column: SortColumn) {
        self.sort.click(column);
        sort_documents(&mut self.visible, self.sort, self.collection);
    }

    /// Set the sort column and direction directly.
    pub fn set_sort(&mut self, sort: ColumnSort) {
        self.sort = sort;
        sort_documents(&mut self.visible, self.sort, self.collection);
    }

    /// Distinct customer names of the loaded documents containing `query`
    /// (case-insensitive), in load order.
    pub fn customer_suggestions(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .filter_map(|d| d.customer.as_deref())
            .filter(|name| !name.is_empty() && name.to_lowercase().contains(&needle))
            .filter(|name| seen.insert(name.to_string()))
            .map(str::to_string)
            .collect()
    }

    fn refresh(&mut self) {
        self.visible = filter_documents(&self.documents, &self.criteria, self.collection);
        sort_documents(&mut self.visible, self.sort, self.collection);
    }
}

/// Counts shown on the start page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Documents whose destruction date has passed.
    pub destructible: u64,
    /// Documents currently handed out.
    pub handed_out: u64,
}

/// Loads collection views and dashboard counts.
#[derive(Debug, Clone)]
pub struct ViewService {
    ctx: ServiceContext,
}

impl ViewService {
    /// Creates a new view service.
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch `collection` as of today.
    pub async fn load(&self, collection: DocumentCollection) -> AppResult<DocumentView> {
        let documents = self
            .ctx
            .backend
            .documents
            .list_documents(collection, self.ctx.today())
            .await?;
        debug!(%collection, count = documents.len(), "Loaded collection");
        Ok(DocumentView::new(collection, documents))
    }

    /// Destructible and handed-out counts, fetched concurrently.
    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        let today = self.ctx.today();
        let documents = &self.ctx.backend.documents;
        let (destructible, handed_out) = futures::try_join!(
            documents.count_documents(DocumentCollection::Destructible, today),
            documents.count_documents(DocumentCollection::Retrieved, today),
        )?;
        Ok(Dashboard {
            destructible,
            handed_out,
        })
    }
}
