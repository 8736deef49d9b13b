//! Shared dependencies handed to every service.

use std::sync::Arc;

use chrono::NaiveDate;

use archive_cache::CacheManager;
use archive_client::Backend;
use archive_core::clock::{Clock, SystemClock};
use archive_core::config::AppConfig;
use archive_core::config::taxonomy::TaxonomyConfig;
use archive_core::result::AppResult;

/// Backend seams, reference data cache, clock, and taxonomy settings.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Remote list backend.
    pub backend: Backend,
    /// Reference data cache.
    pub cache: CacheManager,
    /// Source of "today".
    pub clock: Arc<dyn Clock>,
    /// Sensitivity term set location.
    pub taxonomy: TaxonomyConfig,
}

impl ServiceContext {
    /// Creates a context from explicit parts.
    pub fn new(
        backend: Backend,
        cache: CacheManager,
        clock: Arc<dyn Clock>,
        taxonomy: TaxonomyConfig,
    ) -> Self {
        Self {
            backend,
            cache,
            clock,
            taxonomy,
        }
    }

    /// Builds the backend and cache named by `config`, on the system clock.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(
            Backend::from_config(config)?,
            CacheManager::new(&config.cache),
            Arc::new(SystemClock),
            config.taxonomy.clone(),
        ))
    }

    /// Today's date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
