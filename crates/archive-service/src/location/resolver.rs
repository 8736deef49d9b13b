//! Resolves the Building→Room→Rack→Shelf→Folder tree from a flat list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use archive_core::types::LocationId;
use archive_entity::{LocationTier, StorageLocation};

use crate::filter::LocationFilter;

/// A location with its resolved children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationNode {
    pub location: StorageLocation,
    pub children: Vec<LocationNode>,
}

/// One entry of the nested location filter menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Filter applied on selection; `None` clears the location filter.
    pub filter: Option<LocationFilter>,
    /// Sub-menu.
    pub children: Vec<MenuItem>,
}

/// A location whose parent does not sit one tier above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierViolation {
    pub id: LocationId,
    pub reason: String,
}

/// Read-only view over the full set of locations.
#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    locations: Vec<StorageLocation>,
    index: HashMap<LocationId, usize>,
}

impl LocationResolver {
    /// Label of the menu entry that resets the location filter.
    pub const CLEAR_LABEL: &'static str = "Deselect";

    /// Creates a resolver over `locations`. Input order is kept for
    /// children and menus.
    pub fn new(locations: Vec<StorageLocation>) -> Self {
        let index = locations
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id, i))
            .collect();
        Self { locations, index }
    }

    /// All locations, flat.
    pub fn all(&self) -> &[StorageLocation] {
        &self.locations
    }

    /// Looks up a location by id.
    pub fn get(&self, id: LocationId) -> Option<&StorageLocation> {
        self.index.get(&id).map(|&i| &self.locations[i])
    }

    /// Buildings.
    pub fn roots(&self) -> Vec<&StorageLocation> {
        self.locations
            .iter()
            .filter(|l| l.tier == LocationTier::Building)
            .collect()
    }

    /// Direct children of `parent`, or the buildings when `parent` is `None`.
    pub fn children(&self, parent: Option<LocationId>) -> Vec<&StorageLocation> {
        match parent {
            None => self.roots(),
            Some(id) => self
                .locations
                .iter()
                .filter(|l| l.parent_id == Some(id))
                .collect(),
        }
    }

    /// The complete tree rooted at the buildings. Only children exactly one
    /// tier below their parent are attached.
    pub fn tree(&self) -> Vec<LocationNode> {
        self.roots().into_iter().map(|l| self.node(l)).collect()
    }

    fn node(&self, location: &StorageLocation) -> LocationNode {
        let children = match location.tier.child() {
            Some(child_tier) => self
                .children(Some(location.id))
                .into_iter()
                .filter(|c| c.tier == child_tier)
                .map(|c| self.node(c))
                .collect(),
            None => Vec::new(),
        };
        LocationNode {
            location: location.clone(),
            children,
        }
    }

    /// Nested filter menu: a clear entry followed by the location tree.
    pub fn menu(&self) -> Vec<MenuItem> {
        let mut items = vec![MenuItem {
            label: Self::CLEAR_LABEL.to_string(),
            filter: None,
            children: Vec::new(),
        }];
        items.extend(self.tree().iter().map(menu_item));
        items
    }

    /// Locations that break the tier ordering or reference a missing parent.
    pub fn validate(&self) -> Vec<TierViolation> {
        self.locations
            .iter()
            .filter_map(|l| {
                let reason = match (l.tier.parent(), l.parent_id) {
                    (None, None) => return None,
                    (None, Some(_)) => "building has a parent".to_string(),
                    (Some(_), None) => format!("{} has no parent", l.tier),
                    (Some(expected), Some(parent_id)) => match self.get(parent_id) {
                        None => format!("parent {parent_id} does not exist"),
                        Some(parent) if parent.tier == expected => return None,
                        Some(parent) => {
                            format!("{} is placed under a {}", l.tier, parent.tier)
                        }
                    },
                };
                Some(TierViolation { id: l.id, reason })
            })
            .collect()
    }
}

fn menu_item(node: &LocationNode) -> MenuItem {
    MenuItem {
        label: node.location.title.clone(),
        filter: Some(LocationFilter::new(
            node.location.tier,
            node.location.title.clone(),
        )),
        children: node.children.iter().map(menu_item).collect(),
    }
}
