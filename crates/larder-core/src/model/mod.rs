// ── Domain model ──
//
// Canonical types for the inventory and shopping domains. Wire DTOs from
// `larder-api` are converted into these in `convert.rs`; presentation code
// only ever sees these types.

mod id;
mod item;
mod suggestion;

pub use id::{CategoryId, ItemId, ProductId};
pub use item::{
    InventoryItem, ItemSource, ItemStatus, Placement, ShoppingItem, StorageLocation,
};
pub use suggestion::{ExpiryType, LocationDays, ShelfLife, SuggestionEntry};
