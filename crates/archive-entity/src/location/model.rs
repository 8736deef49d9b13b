//! Storage location model and document placement.

use serde::{Deserialize, Serialize};

use archive_core::types::LocationId;

use super::tier::LocationTier;

/// A node in the Building→Room→Rack→Shelf→Folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    /// Location identifier.
    pub id: LocationId,
    /// Display title.
    pub title: String,
    /// Parent location (null for buildings).
    pub parent_id: Option<LocationId>,
    /// Tier of this node.
    pub tier: LocationTier,
}

impl StorageLocation {
    /// Create a location.
    pub fn new(
        id: impl Into<LocationId>,
        title: impl Into<String>,
        parent_id: Option<LocationId>,
        tier: LocationTier,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id,
            tier,
        }
    }

    /// Check if this is a root location (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Lightweight reference to this location.
    pub fn to_ref(&self) -> LocationRef {
        LocationRef {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// A resolved location reference as joined onto a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    /// Location identifier.
    pub id: LocationId,
    /// Location title.
    pub title: String,
}

/// Where a document is stored: one optional location per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    slots: [Option<LocationRef>; 5],
}

impl Placement {
    /// An empty placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Location stored at `tier`.
    pub fn get(&self, tier: LocationTier) -> Option<&LocationRef> {
        self.slots[tier.index()].as_ref()
    }

    /// Replace the location at `tier`.
    pub fn set(&mut self, tier: LocationTier, location: Option<LocationRef>) {
        self.slots[tier.index()] = location;
    }

    /// Builder-style variant of [`Placement::set`].
    pub fn with(mut self, tier: LocationTier, location: LocationRef) -> Self {
        self.set(tier, Some(location));
        self
    }

    /// Title at `tier`, empty when unset.
    pub fn title(&self, tier: LocationTier) -> &str {
        self.get(tier).map(|l| l.title.as_str()).unwrap_or("")
    }

    /// Location ids per tier, in containment order.
    pub fn ids(&self) -> [Option<LocationId>; 5] {
        std::array::from_fn(|i| self.slots[i].as_ref().map(|l| l.id))
    }

    /// Whether no tier is set.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: i64, title: &str) -> LocationRef {
        LocationRef {
            id: LocationId(id),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_placement_slots() {
        let placement = Placement::new()
            .with(LocationTier::Building, loc(1, "Main"))
            .with(LocationTier::Shelf, loc(9, "S3"));

        assert_eq!(placement.title(LocationTier::Building), "Main");
        assert_eq!(placement.title(LocationTier::Room), "");
        assert_eq!(
            placement.ids(),
            [Some(LocationId(1)), None, None, Some(LocationId(9)), None]
        );
        assert!(!placement.is_empty());
    }
}
