//! [`ReferenceSource`] over the reference lists and the site user directory.

use async_trait::async_trait;
use tracing::warn;

use archive_core::result::AppResult;
use archive_entity::{DocumentType, StorageLocation, User};

use super::wire::{DocumentTypeItem, LocationItem, UserItem};
use super::{ListApiClient, PAGE_SIZE};
use crate::traits::ReferenceSource;

#[async_trait]
impl ReferenceSource for ListApiClient {
    #[tracing::instrument(skip(self))]
    async fn document_types(&self) -> AppResult<Vec<DocumentType>> {
        let url = self.url_with(
            &self.items_url(&self.config.lists.document_types),
            &[("$select", "Id,Title,StorageTime"), ("$top", PAGE_SIZE)],
        )?;
        let items: Vec<DocumentTypeItem> = self.fetch_all(url, "document_types").await?;
        Ok(items.into_iter().map(DocumentType::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn locations(&self) -> AppResult<Vec<StorageLocation>> {
        let url = self.url_with(
            &self.items_url(&self.config.lists.locations),
            &[
                ("$select", "Id,Title,StorageGroup,StorageParentId"),
                ("$top", PAGE_SIZE),
            ],
        )?;
        let items: Vec<LocationItem> = self.fetch_all(url, "locations").await?;
        Ok(items
            .into_iter()
            .filter_map(|item| {
                let id = item.id;
                item.into_location(&self.config.tiers)
                    .inspect_err(|reason| warn!(id, reason = %reason, "Skipping location row"))
                    .ok()
            })
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn users(&self) -> AppResult<Vec<User>> {
        let url = self.url_with(
            &format!("{}/_api/web/siteusers", self.site_url),
            &[("$select", "Id,Title")],
        )?;
        let items: Vec<UserItem> = self.fetch_all(url, "users").await?;
        Ok(items.into_iter().map(User::from).collect())
    }
}
