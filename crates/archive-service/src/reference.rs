//! Read-through access to the immutable reference lists.

use std::collections::HashSet;
use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use archive_cache::keys;
use archive_core::AppError;
use archive_core::result::AppResult;
use archive_core::traits::cache::CacheProvider;
use archive_core::types::{DocumentTypeId, UserId};
use archive_entity::{DocumentType, SensitivityTerm, StorageLocation, User};

use crate::context::ServiceContext;
use crate::location::LocationResolver;

/// Users, document types, locations, and sensitivity terms, fetched once
/// per cache lifetime.
#[derive(Debug, Clone)]
pub struct ReferenceService {
    ctx: ServiceContext,
}

impl ReferenceService {
    /// Creates a new reference service.
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// All site users.
    pub async fn users(&self) -> AppResult<Vec<User>> {
        let source = self.ctx.backend.reference.clone();
        self.cached(&keys::users(), || async move { source.users().await })
            .await
    }

    /// All document types.
    pub async fn document_types(&self) -> AppResult<Vec<DocumentType>> {
        let source = self.ctx.backend.reference.clone();
        self.cached(&keys::document_types(), || async move {
            source.document_types().await
        })
        .await
    }

    /// All storage locations, flat.
    pub async fn locations(&self) -> AppResult<Vec<StorageLocation>> {
        let source = self.ctx.backend.reference.clone();
        self.cached(&keys::locations(), || async move { source.locations().await })
            .await
    }

    /// Sensitivity terms of the configured term set.
    pub async fn sensitivity_terms(&self) -> AppResult<Vec<SensitivityTerm>> {
        let taxonomy = self.ctx.backend.taxonomy.clone();
        self.cached(
            &keys::sensitivity_terms(&self.ctx.taxonomy.term_set),
            || async move { taxonomy.sensitivity_terms().await },
        )
        .await
    }

    /// Resolver over all locations. Misplaced locations are logged.
    pub async fn location_resolver(&self) -> AppResult<LocationResolver> {
        let resolver = LocationResolver::new(self.locations().await?);
        for violation in resolver.validate() {
            warn!(location_id = %violation.id, reason = %violation.reason, "Inconsistent storage location");
        }
        Ok(resolver)
    }

    /// A user by id.
    pub async fn user(&self, id: UserId) -> AppResult<User> {
        self.users()
            .await?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::validation(format!("Unknown user {id}")))
    }

    /// A document type by id.
    pub async fn document_type(&self, id: DocumentTypeId) -> AppResult<DocumentType> {
        self.document_types()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::validation(format!("Unknown document type {id}")))
    }

    /// Users whose display name contains `query` (case-insensitive),
    /// excluding `selected`, at most `limit` when given.
    pub async fn search_people(
        &self,
        query: &str,
        selected: &[UserId],
        limit: Option<usize>,
    ) -> AppResult<Vec<User>> {
        Ok(search_people(&self.users().await?, query, selected, limit))
    }

    /// Drop every cached reference list.
    pub async fn invalidate_reference_data(&self) -> AppResult<u64> {
        let removed = self.ctx.cache.delete_pattern(&keys::reference_pattern()).await?;
        info!(removed, "Invalidated reference data");
        Ok(removed)
    }

    /// Read `key` from the cache or fill it from `fetch`. Cache failures
    /// count as misses.
    async fn cached<T, F, Fut>(&self, key: &str, fetch: F) -> AppResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<T>>>,
    {
        match self.ctx.cache.get_json::<Vec<T>>(key).await {
            Ok(Some(values)) => {
                debug!(key, "Reference cache hit");
                return Ok(values);
            }
            Ok(None) => debug!(key, "Reference cache miss"),
            Err(e) => warn!(key, error = %e, "Reference cache read failed"),
        }

        let values = fetch().await?;
        if let Err(e) = self.ctx.cache.set_json(key, &values).await {
            warn!(key, error = %e, "Reference cache write failed");
        }
        Ok(values)
    }
}

/// Case-insensitive substring search over display names.
pub fn search_people(
    users: &[User],
    query: &str,
    selected: &[UserId],
    limit: Option<usize>,
) -> Vec<User> {
    let needle = query.to_lowercase();
    let excluded: HashSet<UserId> = selected.iter().copied().collect();
    users
        .iter()
        .filter(|u| !excluded.contains(&u.id))
        .filter(|u| u.name.to_lowercase().contains(&needle))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}
