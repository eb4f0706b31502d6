// ── Remote seams ──
//
// Object-safe traits the stores and the suggestion coordinator talk to
// instead of a concrete HTTP client. `convert.rs` implements them for
// `larder_api::Client`; tests implement them with in-process fakes.

use futures_core::future::BoxFuture;

use crate::error::CoreError;
use crate::model::{CategoryId, InventoryItem, ItemId, ShoppingItem, SuggestionEntry};
use crate::requests::{
    AddInventoryRequest, AddShoppingRequest, CompletePurchaseRequest, InventoryPatch,
};

/// Remote persistence for the inventory collection.
pub trait InventoryRemote: Send + Sync {
    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<InventoryItem>, CoreError>>;

    fn add_item(&self, req: AddInventoryRequest) -> BoxFuture<'_, Result<ItemId, CoreError>>;

    fn update_item(
        &self,
        id: ItemId,
        patch: InventoryPatch,
    ) -> BoxFuture<'_, Result<(), CoreError>>;

    fn delete_item(&self, id: ItemId) -> BoxFuture<'_, Result<(), CoreError>>;
}

/// Remote persistence for the shopping collection.
pub trait ShoppingRemote: Send + Sync {
    fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<ShoppingItem>, CoreError>>;

    fn add_items(
        &self,
        req: AddShoppingRequest,
    ) -> BoxFuture<'_, Result<Vec<ShoppingItem>, CoreError>>;

    fn complete_item(
        &self,
        id: ItemId,
        req: CompletePurchaseRequest,
    ) -> BoxFuture<'_, Result<ShoppingItem, CoreError>>;
}

/// Source of advisory suggestion payloads.
pub trait SuggestionSource: Send + Sync {
    fn fetch_suggestions(
        &self,
        category: CategoryId,
    ) -> BoxFuture<'_, Result<SuggestionEntry, CoreError>>;
}
