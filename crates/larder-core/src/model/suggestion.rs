// ── Advisory suggestion payloads ──
//
// Cached per category; immutable once fetched. Entries are only ever
// replaced wholesale, never patched field by field.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::id::CategoryId;
use super::item::{ItemStatus, StorageLocation};

/// How expiry should be communicated for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
pub enum ExpiryType {
    UseBy,
    BestBefore,
    NonPerishable,
}

/// Per-location shelf life in days. `None` means the category should not
/// be stored at that location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDays {
    pub pantry: Option<u32>,
    pub fridge: Option<u32>,
    pub freezer: Option<u32>,
}

impl LocationDays {
    pub fn at(&self, location: StorageLocation) -> Option<u32> {
        match location {
            StorageLocation::Pantry => self.pantry,
            StorageLocation::Fridge => self.fridge,
            StorageLocation::Freezer => self.freezer,
        }
    }
}

/// Shelf-life table by item status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLife {
    pub unopened: LocationDays,
    pub opened: LocationDays,
}

impl ShelfLife {
    /// Days of shelf life for a status at a location, if the combination
    /// is recommended at all.
    pub fn days(&self, status: ItemStatus, location: StorageLocation) -> Option<u32> {
        match status {
            ItemStatus::Unopened => self.unopened.at(location),
            ItemStatus::Opened => self.opened.at(location),
        }
    }
}

/// Advisory payload for one category: shelf life, expiry classification,
/// and the recommended storage location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub category: CategoryId,
    pub shelf_life: ShelfLife,
    pub expiry_type: ExpiryType,
    pub recommended_location: StorageLocation,
}
