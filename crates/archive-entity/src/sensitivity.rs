//! Sensitivity classification terms.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A term from the sensitivity term set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityTerm {
    /// Term id in the term store.
    pub id: Uuid,
    /// Term label (e.g. "Confidential").
    pub label: String,
}

impl SensitivityTerm {
    /// Create a term.
    pub fn new(id: Uuid, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}
