//! Client-side state and caching core for the Larder household-inventory
//! app.
//!
//! This crate owns the reactive data layer between `larder-api` and UI
//! consumers:
//!
//! - **[`Session`]** — Central facade for an authenticated session.
//!   Construction wires the HTTP client into both stores;
//!   [`refresh()`](Session::refresh) loads both collections concurrently.
//!
//! - **[`Router`]** — Per-tab navigation stacks with a single modal-sheet
//!   slot. Derives chrome concerns (accent tint, tab-bar visibility) from
//!   the top of the selected tab's stack.
//!
//! - **[`InventoryStore`] / [`ShoppingStore`]** — Reactive collection
//!   stores. Each publishes one immutable snapshot (authoritative item
//!   list plus every derived index) through a `tokio::sync::watch`
//!   channel; mutations swap the whole snapshot atomically. Local edits
//!   apply optimistically and sync to the backend in the background.
//!
//! - **[`SuggestionCache`] / [`SuggestionCoordinator`]** — Category-keyed
//!   cache of advisory payloads (shelf life, expiry classification,
//!   recommended storage) with per-consumer request coordination:
//!   concurrent fetches for one category collapse into a single backend
//!   call, and completions for a category the consumer has left never
//!   clobber what they are currently looking at.
//!
//! - **[`StateStream<S>`]** — Subscription handle vended by the stores and
//!   the router. Exposes `current()` / `latest()` / `changed()` for
//!   reactive rendering.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod remote;
pub mod requests;
pub mod router;
pub mod session;
pub mod store;
pub mod stream;
pub mod suggest;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::SessionConfig;
pub use error::CoreError;
pub use remote::{InventoryRemote, ShoppingRemote, SuggestionSource};
pub use requests::{
    AddInventoryRequest, AddShoppingRequest, CompletePurchaseRequest, InventoryPatch,
    NewShoppingEntry,
};
pub use router::{Destination, ItemAction, Router, Sheet, Tab, Tint};
pub use session::Session;
pub use store::{InventoryState, InventoryStore, LoadPhase, ShoppingState, ShoppingStore};
pub use stream::StateStream;
pub use suggest::{SuggestionCache, SuggestionCoordinator, SuggestionPhase};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CategoryId, ExpiryType, InventoryItem, ItemId, ItemSource, ItemStatus, LocationDays,
    Placement, ProductId, ShelfLife, ShoppingItem, StorageLocation, SuggestionEntry,
};
