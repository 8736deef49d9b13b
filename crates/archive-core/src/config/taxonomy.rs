//! Sensitivity taxonomy configuration.

use serde::{Deserialize, Serialize};

/// Where the sensitivity vocabulary lives in the term store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Term store name.
    #[serde(default = "default_term_store")]
    pub term_store: String,
    /// Term group name.
    #[serde(default = "default_group")]
    pub group: String,
    /// Term set holding the sensitivity classes.
    #[serde(default = "default_term_set")]
    pub term_set: String,
    /// Managed metadata column on the documents list.
    #[serde(default = "default_field")]
    pub field: String,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            term_store: default_term_store(),
            group: default_group(),
            term_set: default_term_set(),
            field: default_field(),
        }
    }
}

fn default_term_store() -> String {
    "Managed Metadata Service".to_string()
}

fn default_group() -> String {
    "Site Collection".to_string()
}

fn default_term_set() -> String {
    "Sensitivität".to_string()
}

fn default_field() -> String {
    "Sensitivity".to_string()
}
