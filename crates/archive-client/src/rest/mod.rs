//! Client for the hosted list and term store REST API.
//!
//! Lists are addressed by title (`lists/getByTitle('…')/items`), lookups
//! are joined with `$expand`, and writes use `X-HTTP-Method` overrides.

mod documents;
mod query;
mod reference;
mod taxonomy;
mod wire;


use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use archive_core::AppError;
use archive_core::config::backend::BackendConfig;
use archive_core::config::taxonomy::TaxonomyConfig;
use archive_core::error::ErrorKind;
use archive_core::result::AppResult;

use crate::error::{ClientError, ResponseExt};

use self::taxonomy::TermSetPath;
use self::wire::ODataPage;

const ODATA_JSON: &str = "application/json;odata=nometadata";

/// Largest page the list API serves per request.
const PAGE_SIZE: &str = "5000";

/// REST client for the documents, document types and locations lists, the
/// site user directory, and the sensitivity term set.
#[derive(Debug, Clone)]
pub struct ListApiClient {
    site_url: String,
    client: Client,
    config: BackendConfig,
    taxonomy: TaxonomyConfig,
    term_set: Arc<OnceCell<TermSetPath>>,
}

impl ListApiClient {
    /// Build a client from configuration.
    pub fn new(config: &BackendConfig, taxonomy: &TaxonomyConfig) -> AppResult<Self> {
        let site_url = config.site_url.trim().trim_end_matches('/');
        if site_url.is_empty() {
            return Err(AppError::configuration(
                "backend.site_url must be set for the rest provider",
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ODATA_JSON));
        if let Some(token) = config.access_token.as_deref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AppError::configuration(format!("Invalid access token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            site_url: site_url.to_string(),
            client,
            config: config.clone(),
            taxonomy: taxonomy.clone(),
            term_set: Arc::new(OnceCell::new()),
        })
    }

    /// Base URL of the site.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    fn items_url(&self, list: &str) -> String {
        format!(
            "{}/_api/web/lists/getByTitle('{}')/items",
            self.site_url,
            list.replace('\'', "''")
        )
    }

    fn item_url(&self, list: &str, id: i64) -> String {
        format!("{}({id})", self.items_url(list))
    }

    fn url_with(&self, base: &str, params: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = Url::parse(base).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        operation: &'static str,
    ) -> Result<T, ClientError> {
        let response = self.client.get(url).send().await.map_client_error().await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode {
                operation,
                message: e.to_string(),
            })
    }

    /// Follow `nextLink` until every page has been read.
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        url: Url,
        operation: &'static str,
    ) -> Result<Vec<T>, ClientError> {
        let mut items = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next.take() {
            let page: ODataPage<T> = self.fetch(url, operation).await?;
            items.extend(page.value);
            if let Some(link) = page.next_link {
                next = Some(self.url_with(&link, &[])?);
            }
        }
        Ok(items)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        method: Option<&'static str>,
    ) -> Result<Response, ClientError> {
        let mut request = self.client.post(url).json(body);
        if let Some(method) = method {
            request = request.header("X-HTTP-Method", method).header("IF-MATCH", "*");
        }
        request.send().await.map_client_error().await
    }

    async fn merge<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<(), ClientError> {
        self.post(url, body, Some("MERGE")).await.map(|_| ())
    }
}
