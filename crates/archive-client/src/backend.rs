//! Runtime selection of the backend implementation.

use std::sync::Arc;

use tracing::info;

use archive_core::AppError;
use archive_core::config::AppConfig;
use archive_core::result::AppResult;

use crate::memory::MemoryBackend;
use crate::rest::ListApiClient;
use crate::traits::{DocumentStore, ReferenceSource, TaxonomyProvider};

/// The three backend seams, usually served by the same object.
#[derive(Debug, Clone)]
pub struct Backend {
    pub documents: Arc<dyn DocumentStore>,
    pub reference: Arc<dyn ReferenceSource>,
    pub taxonomy: Arc<dyn TaxonomyProvider>,
}

impl Backend {
    /// Build the backend named by `backend.provider`.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        match config.backend.provider.as_str() {
            "rest" => {
                let client = ListApiClient::new(&config.backend, &config.taxonomy)?;
                info!(site_url = %client.site_url(), "Using list API backend");
                Ok(Self::from_shared(Arc::new(client)))
            }
            "memory" => {
                info!("Using in-memory backend");
                Ok(Self::from_shared(Arc::new(MemoryBackend::new())))
            }
            other => Err(AppError::configuration(format!(
                "Unknown backend provider '{other}'. Expected one of: rest, memory"
            ))),
        }
    }

    /// Serve all seams from one implementation.
    pub fn from_shared<T>(backend: Arc<T>) -> Self
    where
        T: DocumentStore + ReferenceSource + TaxonomyProvider,
    {
        Self {
            documents: backend.clone(),
            reference: backend.clone(),
            taxonomy: backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_core::error::ErrorKind;

    #[test]
    fn test_provider_selection() {
        let mut config = AppConfig::default();
        config.backend.provider = "memory".into();
        assert!(Backend::from_config(&config).is_ok());

        config.backend.provider = "ldap".into();
        let err = Backend::from_config(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_rest_requires_site_url() {
        let config = AppConfig::default();
        let err = Backend::from_config(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
