// ── Typed mutation requests ──
//
// Request and patch payloads handed to the stores. Shapes mirror what the
// backend accepts; `convert.rs` turns them into wire bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CategoryId, ItemSource, ItemStatus, ProductId, StorageLocation};

/// Request to create an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddInventoryRequest {
    pub title: String,
    pub product_id: Option<ProductId>,
    pub category_id: Option<CategoryId>,
    pub status: ItemStatus,
    pub location: StorageLocation,
    pub expires_at: Option<DateTime<Utc>>,
    pub source: ItemSource,
}

/// Partial update of an inventory item. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryPatch {
    pub title: Option<String>,
    pub status: Option<ItemStatus>,
    pub location: Option<StorageLocation>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl InventoryPatch {
    pub fn status(status: ItemStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn location(location: StorageLocation) -> Self {
        Self {
            location: Some(location),
            ..Self::default()
        }
    }

    pub fn expiry(expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at: Some(expires_at),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Request to add one or more shopping-list entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddShoppingRequest {
    pub entries: Vec<NewShoppingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShoppingEntry {
    pub title: String,
    pub product_id: Option<ProductId>,
}

/// Request to complete a shopping item into the inventory flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletePurchaseRequest {
    pub location: StorageLocation,
    pub product_id: ProductId,
}
