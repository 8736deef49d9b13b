//! Cascading Building→Room→Rack→Shelf→Folder selection.

use serde::{Deserialize, Serialize};

use archive_core::AppError;
use archive_core::result::AppResult;
use archive_core::types::LocationId;
use archive_entity::{LocationRef, LocationTier, Placement, StorageLocation};

use super::resolver::LocationResolver;

/// An ordered path of at most five choices, one per tier from the
/// building down. Selecting at a tier drops every choice below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    path: Vec<LocationRef>,
}

impl LocationSelection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the selection from a document's placement. Choices after
    /// the first unset tier are dropped.
    pub fn from_placement(placement: &Placement) -> Self {
        let path = LocationTier::ALL
            .into_iter()
            .map_while(|tier| placement.get(tier).cloned())
            .collect();
        Self { path }
    }

    /// Select `location` at its tier, clearing every tier below.
    ///
    /// The location's parent must be the current choice one tier up.
    pub fn select(&mut self, location: &StorageLocation) -> AppResult<()> {
        let depth = location.tier.index();
        if depth > self.path.len() {
            return Err(AppError::validation(format!(
                "Select a {} before choosing a {}",
                LocationTier::ALL[self.path.len()],
                location.tier
            )));
        }
        let expected_parent = depth.checked_sub(1).map(|i| self.path[i].id);
        if location.parent_id != expected_parent {
            return Err(AppError::validation(format!(
                "'{}' is not inside the selected {}",
                location.title,
                location.tier.parent().map(|t| t.as_str()).unwrap_or("location")
            )));
        }
        self.path.truncate(depth);
        self.path.push(location.to_ref());
        Ok(())
    }

    /// Resolve `id` and select it.
    pub fn select_id(&mut self, resolver: &LocationResolver, id: LocationId) -> AppResult<()> {
        let location = resolver
            .get(id)
            .ok_or_else(|| AppError::validation(format!("Unknown location {id}")))?;
        self.select(location)
    }

    /// The full path from the building down to `id`.
    pub fn path_to(resolver: &LocationResolver, id: LocationId) -> AppResult<Self> {
        let mut chain = Vec::new();
        let mut next = Some(id);
        while let Some(current) = next {
            if chain.len() == LocationTier::ALL.len() {
                return Err(AppError::validation(format!(
                    "Location {id} is nested deeper than a folder"
                )));
            }
            let location = resolver
                .get(current)
                .ok_or_else(|| AppError::validation(format!("Unknown location {current}")))?;
            chain.push(location);
            next = location.parent_id;
        }

        let mut selection = Self::new();
        for location in chain.into_iter().rev() {
            selection.select(location)?;
        }
        Ok(selection)
    }

    /// Clear the choice at `tier` and everything below.
    pub fn clear(&mut self, tier: LocationTier) {
        self.path.truncate(tier.index());
    }

    /// Choice at `tier`.
    pub fn selected(&self, tier: LocationTier) -> Option<&LocationRef> {
        self.path.get(tier.index())
    }

    /// The deepest choice.
    pub fn deepest(&self) -> Option<&LocationRef> {
        self.path.last()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Locations selectable at `tier`. Empty when the tier above has no
    /// choice or the chosen node has no children, which disables the tier.
    pub fn options<'a>(
        &self,
        resolver: &'a LocationResolver,
        tier: LocationTier,
    ) -> Vec<&'a StorageLocation> {
        match tier.parent() {
            None => resolver.roots(),
            Some(parent_tier) => match self.selected(parent_tier) {
                Some(parent) => resolver
                    .children(Some(parent.id))
                    .into_iter()
                    .filter(|l| l.tier == tier)
                    .collect(),
                None => Vec::new(),
            },
        }
    }

    /// Whether anything can be chosen at `tier`.
    pub fn is_enabled(&self, resolver: &LocationResolver, tier: LocationTier) -> bool {
        !self.options(resolver, tier).is_empty()
    }

    /// Location id per tier, as written to the backend.
    pub fn ids(&self) -> [Option<LocationId>; 5] {
        let mut ids = [None; 5];
        for (slot, location) in ids.iter_mut().zip(&self.path) {
            *slot = Some(location.id);
        }
        ids
    }

    /// The selection as a document placement.
    pub fn to_placement(&self) -> Placement {
        let mut placement = Placement::new();
        for (tier, location) in LocationTier::ALL.into_iter().zip(&self.path) {
            placement.set(tier, Some(location.clone()));
        }
        placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LocationResolver {
        LocationResolver::new(vec![
            StorageLocation::new(1, "Main", None, LocationTier::Building),
            StorageLocation::new(2, "R1", Some(1.into()), LocationTier::Room),
            StorageLocation::new(3, "R2", Some(1.into()), LocationTier::Room),
            StorageLocation::new(4, "Rack A", Some(2.into()), LocationTier::Rack),
            StorageLocation::new(5, "Shelf 1", Some(4.into()), LocationTier::Shelf),
            StorageLocation::new(6, "Annex", None, LocationTier::Building),
        ])
    }

    fn select(selection: &mut LocationSelection, resolver: &LocationResolver, id: i64) {
        selection.select_id(resolver, id.into()).unwrap();
    }

    #[test]
    fn test_select_cascades() {
        let r = resolver();
        let mut s = LocationSelection::new();
        select(&mut s, &r, 1);
        select(&mut s, &r, 2);
        select(&mut s, &r, 4);
        select(&mut s, &r, 5);
        assert_eq!(s.deepest().unwrap().title, "Shelf 1");

        // Choosing another room drops rack and shelf.
        select(&mut s, &r, 3);
        assert_eq!(s.selected(LocationTier::Room).unwrap().title, "R2");
        assert!(s.selected(LocationTier::Rack).is_none());
        assert!(s.selected(LocationTier::Shelf).is_none());
        assert_eq!(
            s.ids(),
            [Some(1.into()), Some(3.into()), None, None, None]
        );
    }

    #[test]
    fn test_new_building_clears_everything_below() {
        let r = resolver();
        let mut s = LocationSelection::new();
        select(&mut s, &r, 1);
        select(&mut s, &r, 2);
        select(&mut s, &r, 6);
        assert_eq!(s.ids(), [Some(6.into()), None, None, None, None]);
    }

    #[test]
    fn test_rejects_skipped_tier_and_wrong_parent() {
        let r = resolver();
        let mut s = LocationSelection::new();
        assert!(s.select_id(&r, 2.into()).unwrap_err().is_validation());

        select(&mut s, &r, 6);
        assert!(s.select_id(&r, 2.into()).is_err());
        assert_eq!(s.ids(), [Some(6.into()), None, None, None, None]);
    }

    #[test]
    fn test_path_to_walks_up_to_building() {
        let r = resolver();
        let s = LocationSelection::path_to(&r, 5.into()).unwrap();
        assert_eq!(
            s.ids(),
            [Some(1.into()), Some(2.into()), Some(4.into()), Some(5.into()), None]
        );

        assert!(LocationSelection::path_to(&r, 99.into()).is_err());
    }

    #[test]
    fn test_path_to_rejects_broken_hierarchy() {
        // A room without a building above it.
        let r = LocationResolver::new(vec![StorageLocation::new(
            1,
            "Orphan",
            None,
            LocationTier::Room,
        )]);
        assert!(LocationSelection::path_to(&r, 1.into()).unwrap_err().is_validation());
    }

    #[test]
    fn test_options_disable_leaf_tiers() {
        let r = resolver();
        let mut s = LocationSelection::new();
        assert_eq!(s.options(&r, LocationTier::Building).len(), 2);
        assert!(!s.is_enabled(&r, LocationTier::Room));

        select(&mut s, &r, 1);
        assert_eq!(s.options(&r, LocationTier::Room).len(), 2);

        select(&mut s, &r, 3);
        assert!(!s.is_enabled(&r, LocationTier::Rack));
    }

    #[test]
    fn test_clear_truncates() {
        let r = resolver();
        let mut s = LocationSelection::new();
        select(&mut s, &r, 1);
        select(&mut s, &r, 2);
        select(&mut s, &r, 4);
        s.clear(LocationTier::Room);
        assert_eq!(s.ids(), [Some(1.into()), None, None, None, None]);
        s.clear(LocationTier::Building);
        assert!(s.is_empty());
    }

    #[test]
    fn test_placement_roundtrip_stops_at_gap() {
        let placement = Placement::new()
            .with(LocationTier::Building, LocationRef { id: 1.into(), title: "Main".into() })
            .with(LocationTier::Rack, LocationRef { id: 4.into(), title: "Rack A".into() });
        let s = LocationSelection::from_placement(&placement);
        assert_eq!(s.ids(), [Some(1.into()), None, None, None, None]);
        assert_eq!(s.to_placement().title(LocationTier::Building), "Main");
    }
}
