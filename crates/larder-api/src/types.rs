// Wire types for the Larder backend REST API.
//
// Field names follow the backend's camelCase JSON. These are transport
// shapes only -- `larder-core` converts them into domain types and never
// exposes them to consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Closed wire vocabularies ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    Pantry,
    Fridge,
    Freezer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Unopened,
    Opened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    User,
    Suggested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpiryType {
    UseBy,
    BestBefore,
    NonPerishable,
}

// ── Items ────────────────────────────────────────────────────────────

/// An inventory item as returned by `GET /inventory/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemDto {
    pub id: i64,
    pub title: String,
    pub product_id: Option<i64>,
    pub category_id: Option<i64>,
    pub status: ItemStatus,
    pub storage_location: StorageLocation,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source: ItemSource,
}

/// A shopping-list item as returned by `GET /shopping/items`.
///
/// `storage_location` and `product_id` are present together once the item
/// has been placed (completed into the inventory flow); both absent while
/// it is still pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemDto {
    pub id: i64,
    pub title: String,
    pub product_id: Option<i64>,
    pub storage_location: Option<StorageLocation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source: ItemSource,
}

// ── Mutation bodies ──────────────────────────────────────────────────

/// Body for `POST /inventory/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInventoryItemBody {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub status: ItemStatus,
    pub storage_location: StorageLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub source: ItemSource,
}

/// Partial-update body for `PATCH /inventory/items/{id}`.
/// Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItemBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<StorageLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Body for `POST /shopping/items`. Several entries may be added in one
/// call; the backend returns every created item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddShoppingItemBody {
    pub entries: Vec<NewShoppingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingEntry {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
}

/// Body for `POST /shopping/items/{id}/complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteShoppingItemBody {
    pub storage_location: StorageLocation,
    pub product_id: i64,
}

// ── Responses ────────────────────────────────────────────────────────

/// Response of a create call that only returns the new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub id: i64,
}

/// Per-location shelf life in days. `None` means the category should not
/// be stored at that location.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDaysDto {
    pub pantry: Option<u32>,
    pub fridge: Option<u32>,
    pub freezer: Option<u32>,
}

/// Shelf-life table by item status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfLifeDto {
    pub unopened: LocationDaysDto,
    pub opened: LocationDaysDto,
}

/// Advisory payload for a category, from
/// `GET /inventory/suggestions/{categoryId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDto {
    pub category_id: i64,
    pub shelf_life: ShelfLifeDto,
    pub expiry_type: ExpiryType,
    pub recommended_storage_location: StorageLocation,
}

/// Error envelope the backend uses for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub message: String,
}
