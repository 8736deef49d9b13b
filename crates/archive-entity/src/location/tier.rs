//! The fixed five-level containment hierarchy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tier of a storage location, ordered from outermost to innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationTier {
    Building,
    Room,
    Rack,
    Shelf,
    Folder,
}

impl LocationTier {
    /// All tiers in containment order.
    pub const ALL: [LocationTier; 5] = [
        Self::Building,
        Self::Room,
        Self::Rack,
        Self::Shelf,
        Self::Folder,
    ];

    /// Zero-based depth (Building = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tier at the given depth.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The tier directly above, `None` for buildings.
    pub fn parent(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// The tier directly below, `None` for folders.
    pub fn child(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Room => "room",
            Self::Rack => "rack",
            Self::Shelf => "shelf",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for LocationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LocationTier {
    type Err = archive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "building" => Ok(Self::Building),
            "room" => Ok(Self::Room),
            "rack" => Ok(Self::Rack),
            "shelf" => Ok(Self::Shelf),
            "folder" => Ok(Self::Folder),
            _ => Err(archive_core::AppError::validation(format!(
                "Invalid location tier: '{s}'. Expected one of: building, room, rack, shelf, folder"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours() {
        assert_eq!(LocationTier::Building.parent(), None);
        assert_eq!(LocationTier::Room.parent(), Some(LocationTier::Building));
        assert_eq!(LocationTier::Shelf.child(), Some(LocationTier::Folder));
        assert_eq!(LocationTier::Folder.child(), None);
    }

    #[test]
    fn test_ordering_follows_containment() {
        assert!(LocationTier::Building < LocationTier::Room);
        assert!(LocationTier::Shelf < LocationTier::Folder);
        assert_eq!(LocationTier::Rack.index(), 2);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Rack".parse::<LocationTier>().unwrap(), LocationTier::Rack);
        assert!("cellar".parse::<LocationTier>().is_err());
    }
}
