//! Remote list backend configuration.

use serde::{Deserialize, Serialize};

/// Connection and schema settings for the list backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend provider: `"rest"` for the hosted list API, `"memory"` for
    /// a process-local store.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the site that hosts the lists.
    #[serde(default)]
    pub site_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// List titles.
    #[serde(default)]
    pub lists: ListNames,
    /// Content type ids distinguishing customer and institute documents.
    #[serde(default)]
    pub content_types: ContentTypeIds,
    /// Labels stored in the locations list's group column.
    #[serde(default)]
    pub tiers: TierLabels,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            site_url: String::new(),
            access_token: None,
            request_timeout_seconds: default_request_timeout(),
            lists: ListNames::default(),
            content_types: ContentTypeIds::default(),
            tiers: TierLabels::default(),
        }
    }
}

/// Titles of the lists the archive reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNames {
    /// Archived documents.
    #[serde(default = "default_documents_list")]
    pub documents: String,
    /// Document types with their storage durations.
    #[serde(default = "default_types_list")]
    pub document_types: String,
    /// Storage locations.
    #[serde(default = "default_locations_list")]
    pub locations: String,
}

impl Default for ListNames {
    fn default() -> Self {
        Self {
            documents: default_documents_list(),
            document_types: default_types_list(),
            locations: default_locations_list(),
        }
    }
}

/// Content type ids of the two document kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeIds {
    /// Customer documents.
    #[serde(default = "default_customer_content_type")]
    pub customer: String,
    /// Institute (in-house) documents.
    #[serde(default = "default_institute_content_type")]
    pub institute: String,
}

impl Default for ContentTypeIds {
    fn default() -> Self {
        Self {
            customer: default_customer_content_type(),
            institute: default_institute_content_type(),
        }
    }
}

/// Group labels for each storage tier as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierLabels {
    #[serde(default = "default_building")]
    pub building: String,
    #[serde(default = "default_room")]
    pub room: String,
    #[serde(default = "default_rack")]
    pub rack: String,
    #[serde(default = "default_shelf")]
    pub shelf: String,
    #[serde(default = "default_folder")]
    pub folder: String,
}

impl Default for TierLabels {
    fn default() -> Self {
        Self {
            building: default_building(),
            room: default_room(),
            rack: default_rack(),
            shelf: default_shelf(),
            folder: default_folder(),
        }
    }
}

fn default_provider() -> String {
    "rest".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_documents_list() -> String {
    "ArchivDokumente".to_string()
}

fn default_types_list() -> String {
    "ArchivDokumententypen".to_string()
}

fn default_locations_list() -> String {
    "ArchivAblageorte".to_string()
}

fn default_customer_content_type() -> String {
    "0x0100BBDF385CC6AB482E9B370B69B2755F86".to_string()
}

fn default_institute_content_type() -> String {
    "0x01003FB3F85EB97D458BAB5B55CC86C752E0".to_string()
}

fn default_building() -> String {
    "Gebäude".to_string()
}

fn default_room() -> String {
    "Raum".to_string()
}

fn default_rack() -> String {
    "Regal".to_string()
}

fn default_shelf() -> String {
    "Fach".to_string()
}

fn default_folder() -> String {
    "Ordner".to_string()
}
