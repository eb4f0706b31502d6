// ── Item types for the inventory and shopping domains ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::id::{CategoryId, ItemId, ProductId};

/// A storage bucket. Every inventory item lives in exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageLocation {
    Pantry,
    Fridge,
    Freezer,
}

/// Inventory item status. Shelf-life suggestions differ per status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemStatus {
    Unopened,
    Opened,
}

/// Whether the item was entered by the user or suggested by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemSource {
    User,
    Suggested,
}

/// An item in the household inventory.
///
/// Mutated only through [`InventoryStore`](crate::store::InventoryStore)
/// operations; presentation code receives these behind `Arc` and never
/// mutates them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub title: String,
    pub product_id: Option<ProductId>,
    pub category_id: Option<CategoryId>,
    pub status: ItemStatus,
    pub location: StorageLocation,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source: ItemSource,
}

impl InventoryItem {
    /// Copy with a new bucket and a fresh `updated_at` stamp.
    /// Used by the reorder engine's cross-bucket move.
    pub(crate) fn relocated(&self, location: StorageLocation, at: DateTime<Utc>) -> Self {
        Self {
            location,
            updated_at: at,
            ..self.clone()
        }
    }
}

/// Placement state of a shopping item.
///
/// A placed item always carries its storage location and product; the
/// variant makes that invariant a type-level fact instead of a pair of
/// optionals that happen to be set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Placement {
    /// Still on the list, not yet assigned a home.
    Pending,
    /// Bought and assigned to a storage location.
    Placed {
        location: StorageLocation,
        product_id: ProductId,
    },
}

impl Placement {
    pub fn location(&self) -> Option<StorageLocation> {
        match self {
            Self::Pending => None,
            Self::Placed { location, .. } => Some(*location),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// An item on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ItemId,
    pub title: String,
    pub placement: Placement,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source: ItemSource,
}
