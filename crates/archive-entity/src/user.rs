//! Site user entity.

use serde::{Deserialize, Serialize};

use archive_core::types::UserId;

/// A site user, referenced as data controller or hand-out recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl User {
    /// Create a user reference.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
