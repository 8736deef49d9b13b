//! [`TaxonomyProvider`] over the term store API.

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use archive_core::AppError;
use archive_core::result::AppResult;
use archive_entity::SensitivityTerm;

use super::ListApiClient;
use super::wire::{TermGroupItem, TermItem, TermSetItem};
use crate::error::ClientError;
use crate::traits::TaxonomyProvider;

/// Resolved ids of the configured group and term set.
#[derive(Debug, Clone)]
pub(crate) struct TermSetPath {
    group_id: String,
    set_id: String,
}

impl ListApiClient {
    fn term_store_url(&self) -> String {
        format!("{}/_api/v2.1/termStore", self.site_url)
    }

    fn terms_url(&self, path: &TermSetPath) -> String {
        format!(
            "{}/groups/{}/sets/{}/terms",
            self.term_store_url(),
            path.group_id,
            path.set_id
        )
    }

    /// Group and set ids never change for a site; they are looked up once.
    async fn term_set_path(&self) -> AppResult<&TermSetPath> {
        self.term_set
            .get_or_try_init(|| self.resolve_term_set())
            .await
    }

    async fn resolve_term_set(&self) -> AppResult<TermSetPath> {
        let groups_url = format!("{}/groups", self.term_store_url());
        let groups: Vec<TermGroupItem> = self
            .fetch_all(self.url_with(&groups_url, &[])?, "term_groups")
            .await?;
        let group = groups
            .into_iter()
            .find(|g| g.display_name == self.taxonomy.group)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Term group '{}' not found in term store '{}'",
                    self.taxonomy.group, self.taxonomy.term_store
                ))
            })?;

        let sets_url = format!("{groups_url}/{}/sets", group.id);
        let sets: Vec<TermSetItem> = self
            .fetch_all(self.url_with(&sets_url, &[])?, "term_sets")
            .await?;
        let set = sets
            .into_iter()
            .find(|s| s.localized_names.iter().any(|n| n.name == self.taxonomy.term_set))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Term set '{}' not found in group '{}'",
                    self.taxonomy.term_set, self.taxonomy.group
                ))
            })?;

        debug!(group_id = %group.id, set_id = %set.id, "Resolved sensitivity term set");
        Ok(TermSetPath {
            group_id: group.id,
            set_id: set.id,
        })
    }
}

#[async_trait]
impl TaxonomyProvider for ListApiClient {
    #[tracing::instrument(skip(self))]
    async fn sensitivity_terms(&self) -> AppResult<Vec<SensitivityTerm>> {
        let path = self.term_set_path().await?;
        let items: Vec<TermItem> = self
            .fetch_all(self.url_with(&self.terms_url(path), &[])?, "sensitivity_terms")
            .await?;
        Ok(items
            .into_iter()
            .filter_map(|item| {
                item.into_term()
                    .inspect_err(|reason| warn!(reason = %reason, "Skipping term"))
                    .ok()
            })
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn resolve_term(&self, id: Uuid) -> AppResult<Option<SensitivityTerm>> {
        let path = self.term_set_path().await?;
        let url = self.url_with(&format!("{}/{id}", self.terms_url(path)), &[])?;
        match self.fetch::<TermItem>(url, "resolve_term").await {
            Ok(item) => item.into_term().map(Some).map_err(AppError::serialization),
            Err(ClientError::Status {
                status_code: 404, ..
            }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
