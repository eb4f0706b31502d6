// ── Shopping collection store ──
//
// Same snapshot discipline as the inventory store, over the shopping
// list. Pending items have no bucket; placed items group by their
// storage location.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::LoadPhase;
use crate::error::CoreError;
use crate::model::{ItemId, ShoppingItem, StorageLocation};
use crate::remote::ShoppingRemote;
use crate::requests::{AddShoppingRequest, CompletePurchaseRequest};
use crate::stream::StateStream;

/// One immutable snapshot of the shopping list.
#[derive(Debug, Clone, Default)]
pub struct ShoppingState {
    pub phase: LoadPhase,
    /// Authoritative ordered list.
    pub items: Vec<Arc<ShoppingItem>>,
    /// Items not yet placed, in authoritative order.
    pub pending: Vec<Arc<ShoppingItem>>,
    /// Placed items grouped by storage location.
    pub items_by_location: HashMap<StorageLocation, Vec<Arc<ShoppingItem>>>,
}

impl ShoppingState {
    fn recompute(phase: LoadPhase, items: Vec<Arc<ShoppingItem>>) -> Self {
        let mut pending = Vec::new();
        let mut items_by_location: HashMap<StorageLocation, Vec<Arc<ShoppingItem>>> =
            HashMap::new();

        for item in &items {
            match item.placement.location() {
                Some(location) => items_by_location
                    .entry(location)
                    .or_default()
                    .push(Arc::clone(item)),
                None => pending.push(Arc::clone(item)),
            }
        }

        Self {
            phase,
            items,
            pending,
            items_by_location,
        }
    }

    /// Placed items at a location, in authoritative order.
    pub fn items_at(&self, location: StorageLocation) -> &[Arc<ShoppingItem>] {
        self.items_by_location
            .get(&location)
            .map_or(&[], Vec::as_slice)
    }

    /// Newest first, by `created_at`. Computed on demand.
    pub fn sorted_by_recently_added(&self) -> Vec<Arc<ShoppingItem>> {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }
}

/// Reactive store for the shopping collection.
pub struct ShoppingStore {
    remote: Arc<dyn ShoppingRemote>,
    state: watch::Sender<Arc<ShoppingState>>,
    epoch: AtomicU64,
}

impl ShoppingStore {
    pub fn new(remote: Arc<dyn ShoppingRemote>) -> Self {
        let (state, _) = watch::channel(Arc::new(ShoppingState::default()));
        Self {
            remote,
            state,
            epoch: AtomicU64::new(0),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<ShoppingState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream<Arc<ShoppingState>> {
        StateStream::new(self.state.subscribe())
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Replace the authoritative list wholesale. Invalidates any fetch
    /// currently in flight.
    pub fn set_items(&self, items: Vec<ShoppingItem>) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let items = items.into_iter().map(Arc::new).collect();
        self.state
            .send_modify(|state| *state = Arc::new(ShoppingState::recompute(LoadPhase::Loaded, items)));
    }

    /// Fetch the list from the backend; same phase machine and stale
    /// completion handling as the inventory store.
    pub async fn fetch(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply_phase(LoadPhase::Loading);

        let result = self.remote.fetch_items().await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!("dropping stale shopping fetch completion");
            return;
        }
        match result {
            Ok(items) => {
                let items = items.into_iter().map(Arc::new).collect();
                self.state.send_modify(|state| {
                    *state = Arc::new(ShoppingState::recompute(LoadPhase::Loaded, items));
                });
            }
            Err(e) => {
                warn!(error = %e, "shopping fetch failed");
                self.apply_phase(LoadPhase::Error(Arc::new(e)));
            }
        }
    }

    /// Add entries remotely and append every returned item. On failure
    /// the list is unchanged and the error is returned for logging.
    pub async fn add_items(&self, req: AddShoppingRequest) -> Result<Vec<ItemId>, CoreError> {
        let created = self.remote.add_items(req).await?;
        let ids: Vec<ItemId> = created.iter().map(|item| item.id).collect();

        self.state.send_modify(|state| {
            let mut items = state.items.clone();
            items.extend(created.into_iter().map(Arc::new));
            *state = Arc::new(ShoppingState::recompute(state.phase.clone(), items));
        });
        Ok(ids)
    }

    /// Complete an item into the inventory flow. The backend returns the
    /// placed item, which replaces the local one. Unknown ids surface as
    /// `NotFound` from the backend; the local list only changes on
    /// success.
    pub async fn complete_item(
        &self,
        id: ItemId,
        req: CompletePurchaseRequest,
    ) -> Result<Arc<ShoppingItem>, CoreError> {
        let placed = Arc::new(self.remote.complete_item(id, req).await?);

        let result = Arc::clone(&placed);
        self.state.send_if_modified(|state| {
            let Some(index) = state.items.iter().position(|item| item.id == id) else {
                debug!(item = %id, "completed shopping item not in local list");
                return false;
            };
            let mut items = state.items.clone();
            items[index] = Arc::clone(&placed);
            *state = Arc::new(ShoppingState::recompute(state.phase.clone(), items));
            true
        });
        Ok(result)
    }

    fn apply_phase(&self, phase: LoadPhase) {
        self.state.send_modify(|state| {
            *state = Arc::new(ShoppingState::recompute(phase, state.items.clone()));
        });
    }
}
