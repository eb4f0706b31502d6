// ── Wire ↔ domain conversion ──
//
// Translates `larder-api` DTOs into canonical domain types and implements
// the remote seams for the real HTTP client. All knowledge of the wire
// shapes stays in this module.

use futures_core::future::BoxFuture;

use larder_api::types as dto;

use crate::error::CoreError;
use crate::model::{
    CategoryId, ExpiryType, InventoryItem, ItemId, ItemSource, ItemStatus, LocationDays,
    Placement, ProductId, ShelfLife, ShoppingItem, StorageLocation, SuggestionEntry,
};
use crate::remote::{InventoryRemote, ShoppingRemote, SuggestionSource};
use crate::requests::{
    AddInventoryRequest, AddShoppingRequest, CompletePurchaseRequest, InventoryPatch,
};

// ── Enum mappings ────────────────────────────────────────────────────

impl From<dto::StorageLocation> for StorageLocation {
    fn from(loc: dto::StorageLocation) -> Self {
        match loc {
            dto::StorageLocation::Pantry => Self::Pantry,
            dto::StorageLocation::Fridge => Self::Fridge,
            dto::StorageLocation::Freezer => Self::Freezer,
        }
    }
}

impl From<StorageLocation> for dto::StorageLocation {
    fn from(loc: StorageLocation) -> Self {
        match loc {
            StorageLocation::Pantry => Self::Pantry,
            StorageLocation::Fridge => Self::Fridge,
            StorageLocation::Freezer => Self::Freezer,
        }
    }
}

impl From<dto::ItemStatus> for ItemStatus {
    fn from(status: dto::ItemStatus) -> Self {
        match status {
            dto::ItemStatus::Unopened => Self::Unopened,
            dto::ItemStatus::Opened => Self::Opened,
        }
    }
}

impl From<ItemStatus> for dto::ItemStatus {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Unopened => Self::Unopened,
            ItemStatus::Opened => Self::Opened,
        }
    }
}

impl From<dto::ItemSource> for ItemSource {
    fn from(source: dto::ItemSource) -> Self {
        match source {
            dto::ItemSource::User => Self::User,
            dto::ItemSource::Suggested => Self::Suggested,
        }
    }
}

impl From<ItemSource> for dto::ItemSource {
    fn from(source: ItemSource) -> Self {
        match source {
            ItemSource::User => Self::User,
            ItemSource::Suggested => Self::Suggested,
        }
    }
}

impl From<dto::ExpiryType> for ExpiryType {
    fn from(kind: dto::ExpiryType) -> Self {
        match kind {
            dto::ExpiryType::UseBy => Self::UseBy,
            dto::ExpiryType::BestBefore => Self::BestBefore,
            dto::ExpiryType::NonPerishable => Self::NonPerishable,
        }
    }
}

// ── Item mappings ────────────────────────────────────────────────────

impl From<dto::InventoryItemDto> for InventoryItem {
    fn from(item: dto::InventoryItemDto) -> Self {
        Self {
            id: ItemId(item.id),
            title: item.title,
            product_id: item.product_id.map(ProductId),
            category_id: item.category_id.map(CategoryId),
            status: item.status.into(),
            location: item.storage_location.into(),
            expires_at: item.expires_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
            source: item.source.into(),
        }
    }
}

impl From<dto::ShoppingItemDto> for ShoppingItem {
    fn from(item: dto::ShoppingItemDto) -> Self {
        // Location and product arrive together once the item is placed.
        // Anything else is treated as still pending.
        let placement = match (item.storage_location, item.product_id) {
            (Some(location), Some(product_id)) => Placement::Placed {
                location: location.into(),
                product_id: ProductId(product_id),
            },
            _ => Placement::Pending,
        };
        Self {
            id: ItemId(item.id),
            title: item.title,
            placement,
            created_at: item.created_at,
            updated_at: item.updated_at,
            source: item.source.into(),
        }
    }
}

impl From<dto::SuggestionDto> for SuggestionEntry {
    fn from(suggestion: dto::SuggestionDto) -> Self {
        Self {
            category: CategoryId(suggestion.category_id),
            shelf_life: ShelfLife {
                unopened: location_days(suggestion.shelf_life.unopened),
                opened: location_days(suggestion.shelf_life.opened),
            },
            expiry_type: suggestion.expiry_type.into(),
            recommended_location: suggestion.recommended_storage_location.into(),
        }
    }
}

fn location_days(days: dto::LocationDaysDto) -> LocationDays {
    LocationDays {
        pantry: days.pantry,
        fridge: days.fridge,
        freezer: days.freezer,
    }
}

// ── Request mappings ─────────────────────────────────────────────────

impl From<AddInventoryRequest> for dto::AddInventoryItemBody {
    fn from(req: AddInventoryRequest) -> Self {
        Self {
            title: req.title,
            product_id: req.product_id.map(|p| p.0),
            category_id: req.category_id.map(|c| c.0),
            status: req.status.into(),
            storage_location: req.location.into(),
            expires_at: req.expires_at,
            source: req.source.into(),
        }
    }
}

impl From<InventoryPatch> for dto::UpdateInventoryItemBody {
    fn from(patch: InventoryPatch) -> Self {
        Self {
            title: patch.title,
            status: patch.status.map(Into::into),
            storage_location: patch.location.map(Into::into),
            expires_at: patch.expires_at,
        }
    }
}

impl From<AddShoppingRequest> for dto::AddShoppingItemBody {
    fn from(req: AddShoppingRequest) -> Self {
        Self {
            entries: req
                .entries
                .into_iter()
                .map(|e| dto::NewShoppingEntry {
                    title: e.title,
                    product_id: e.product_id.map(|p| p.0),
                })
                .collect(),
        }
    }
}

impl From<CompletePurchaseRequest> for dto::CompleteShoppingItemBody {
    fn from(req: CompletePurchaseRequest) -> Self {
        Self {
            storage_location: req.location.into(),
            product_id: req.product_id.0,
        }
    }
}

// ── Remote seam implementations for the HTTP client ──────────────────

impl InventoryRemote for larder_api::Client {
    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<InventoryItem>, CoreError>> {
        Box::pin(async {
            let items = self.fetch_inventory_items().await?;
            Ok(items.into_iter().map(InventoryItem::from).collect())
        })
    }

    fn add_item(&self, req: AddInventoryRequest) -> BoxFuture<'_, Result<ItemId, CoreError>> {
        Box::pin(async move {
            let created = self.add_inventory_item(&req.into()).await?;
            Ok(ItemId(created.id))
        })
    }

    fn update_item(
        &self,
        id: ItemId,
        patch: InventoryPatch,
    ) -> BoxFuture<'_, Result<(), CoreError>> {
        Box::pin(async move {
            self.update_inventory_item(id.0, &patch.into()).await?;
            Ok(())
        })
    }

    fn delete_item(&self, id: ItemId) -> BoxFuture<'_, Result<(), CoreError>> {
        Box::pin(async move {
            self.delete_inventory_item(id.0).await?;
            Ok(())
        })
    }
}

impl ShoppingRemote for larder_api::Client {
    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<ShoppingItem>, CoreError>> {
        Box::pin(async {
            let items = self.fetch_shopping_items().await?;
            Ok(items.into_iter().map(ShoppingItem::from).collect())
        })
    }

    fn add_items(
        &self,
        req: AddShoppingRequest,
    ) -> BoxFuture<'_, Result<Vec<ShoppingItem>, CoreError>> {
        Box::pin(async move {
            let items = self.add_shopping_item(&req.into()).await?;
            Ok(items.into_iter().map(ShoppingItem::from).collect())
        })
    }

    fn complete_item(
        &self,
        id: ItemId,
        req: CompletePurchaseRequest,
    ) -> BoxFuture<'_, Result<ShoppingItem, CoreError>> {
        Box::pin(async move {
            let item = self.complete_shopping_item(id.0, &req.into()).await?;
            Ok(item.into())
        })
    }
}

impl SuggestionSource for larder_api::Client {
    fn fetch_suggestions(
        &self,
        category: CategoryId,
    ) -> BoxFuture<'_, Result<SuggestionEntry, CoreError>> {
        Box::pin(async move {
            let suggestion = self.fetch_inventory_suggestions(category.0).await?;
            Ok(suggestion.into())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn placed_shopping_item_requires_both_fields() {
        let base = dto::ShoppingItemDto {
            id: 1,
            title: "Eggs".into(),
            product_id: Some(42),
            storage_location: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            source: dto::ItemSource::User,
        };

        // Product without location stays pending.
        let item = ShoppingItem::from(base.clone());
        assert!(item.placement.is_pending());

        let placed = ShoppingItem::from(dto::ShoppingItemDto {
            storage_location: Some(dto::StorageLocation::Fridge),
            ..base
        });
        assert_eq!(
            placed.placement,
            Placement::Placed {
                location: StorageLocation::Fridge,
                product_id: ProductId(42),
            }
        );
    }

    #[test]
    fn inventory_patch_maps_only_set_fields() {
        let body = dto::UpdateInventoryItemBody::from(InventoryPatch::status(ItemStatus::Opened));
        assert_eq!(body.status, Some(dto::ItemStatus::Opened));
        assert!(body.title.is_none());
        assert!(body.storage_location.is_none());
        assert!(body.expires_at.is_none());
    }
}
