// ── Inventory collection store ──
//
// Authoritative inventory list plus derived indices, rebuilt as one
// immutable snapshot on every mutation. Local mutations are optimistic:
// they apply immediately and spawn a remote-sync task the caller may
// observe; the store never rolls back on sync failure.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{LoadPhase, reorder};
use crate::error::CoreError;
use crate::model::{InventoryItem, ItemId, ItemStatus, ProductId, StorageLocation};
use crate::remote::InventoryRemote;
use crate::requests::{AddInventoryRequest, InventoryPatch};
use crate::stream::StateStream;

/// One immutable snapshot of the inventory: authoritative list, load
/// phase, and every derived index, all computed from the same list.
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    pub phase: LoadPhase,
    /// Authoritative ordered list.
    pub items: Vec<Arc<InventoryItem>>,
    /// Items grouped by storage location, relative order preserved.
    pub items_by_location: HashMap<StorageLocation, Vec<Arc<InventoryItem>>>,
    /// How many items reference each product.
    pub product_counts: HashMap<ProductId, usize>,
    /// Product counts broken down per storage location.
    pub product_counts_by_location: HashMap<ProductId, HashMap<StorageLocation, usize>>,
}

impl InventoryState {
    /// Build a snapshot with all indices recomputed from `items`.
    fn recompute(phase: LoadPhase, items: Vec<Arc<InventoryItem>>) -> Self {
        let mut items_by_location: HashMap<StorageLocation, Vec<Arc<InventoryItem>>> =
            HashMap::new();
        let mut product_counts: HashMap<ProductId, usize> = HashMap::new();
        let mut product_counts_by_location: HashMap<ProductId, HashMap<StorageLocation, usize>> =
            HashMap::new();

        for item in &items {
            items_by_location
                .entry(item.location)
                .or_default()
                .push(Arc::clone(item));
            if let Some(product) = item.product_id {
                *product_counts.entry(product).or_default() += 1;
                *product_counts_by_location
                    .entry(product)
                    .or_default()
                    .entry(item.location)
                    .or_default() += 1;
            }
        }

        Self {
            phase,
            items,
            items_by_location,
            product_counts,
            product_counts_by_location,
        }
    }

    /// Items at a location, in authoritative order.
    pub fn items_at(&self, location: StorageLocation) -> &[Arc<InventoryItem>] {
        self.items_by_location
            .get(&location)
            .map_or(&[], Vec::as_slice)
    }

    /// Newest first, by `created_at`. Computed on demand.
    pub fn sorted_by_recently_added(&self) -> Vec<Arc<InventoryItem>> {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }

    /// Soonest expiry first; items without an expiry date sort last.
    /// Computed on demand.
    pub fn sorted_by_expiry(&self) -> Vec<Arc<InventoryItem>> {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| match (a.expires_at, b.expires_at) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        sorted
    }
}

/// Reactive store for the inventory collection.
pub struct InventoryStore {
    remote: Arc<dyn InventoryRemote>,
    state: watch::Sender<Arc<InventoryState>>,
    /// Bumped by `fetch` and `set_items`; an in-flight fetch whose epoch
    /// no longer matches at completion time is dropped.
    epoch: AtomicU64,
}

impl InventoryStore {
    pub fn new(remote: Arc<dyn InventoryRemote>) -> Self {
        let (state, _) = watch::channel(Arc::new(InventoryState::default()));
        Self {
            remote,
            state,
            epoch: AtomicU64::new(0),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<InventoryState> {
        self.state.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> StateStream<Arc<InventoryState>> {
        StateStream::new(self.state.subscribe())
    }

    // ── Wholesale replacement ────────────────────────────────────────

    /// Replace the authoritative list and recompute every index.
    /// Invalidates any fetch currently in flight.
    pub fn set_items(&self, items: Vec<InventoryItem>) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let items = items.into_iter().map(Arc::new).collect();
        self.state
            .send_modify(|state| *state = Arc::new(InventoryState::recompute(LoadPhase::Loaded, items)));
    }

    /// Fetch the list from the backend.
    ///
    /// `Empty/Loaded -> Loading -> Loaded | Error`. A failed fetch keeps
    /// the previous items; a completion that lost a race against a newer
    /// `fetch`/`set_items` is dropped. The outcome is observable via the
    /// snapshot's [`LoadPhase`], never thrown.
    pub async fn fetch(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply_phase(LoadPhase::Loading);

        let result = self.remote.fetch_items().await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!("dropping stale inventory fetch completion");
            return;
        }
        match result {
            Ok(items) => {
                let items = items.into_iter().map(Arc::new).collect();
                self.state.send_modify(|state| {
                    *state = Arc::new(InventoryState::recompute(LoadPhase::Loaded, items));
                });
                debug!(count = self.snapshot().items.len(), "inventory refresh complete");
            }
            Err(e) => {
                warn!(error = %e, "inventory fetch failed");
                self.apply_phase(LoadPhase::Error(Arc::new(e)));
            }
        }
    }

    // ── Optimistic field mutations ───────────────────────────────────

    /// Mark an item opened/unopened. Returns the remote-sync task, or
    /// `None` if the id is unknown (silent no-op).
    pub fn update_status(
        &self,
        id: ItemId,
        status: ItemStatus,
    ) -> Option<JoinHandle<Result<(), CoreError>>> {
        self.patch_item(id, InventoryPatch::status(status))
    }

    /// Move an item's storage location without touching list order.
    pub fn update_location(
        &self,
        id: ItemId,
        location: StorageLocation,
    ) -> Option<JoinHandle<Result<(), CoreError>>> {
        self.patch_item(id, InventoryPatch::location(location))
    }

    /// Change an item's expiry date.
    pub fn update_expiry(
        &self,
        id: ItemId,
        expires_at: chrono::DateTime<Utc>,
    ) -> Option<JoinHandle<Result<(), CoreError>>> {
        self.patch_item(id, InventoryPatch::expiry(expires_at))
    }

    /// Rename an item.
    pub fn update_title(
        &self,
        id: ItemId,
        title: impl Into<String>,
    ) -> Option<JoinHandle<Result<(), CoreError>>> {
        self.patch_item(id, InventoryPatch::title(title))
    }

    /// Apply a patch locally (stamping `updated_at`), then spawn the
    /// remote sync. The local state is not rolled back if the sync
    /// fails; the task logs and surfaces the error to an observing
    /// caller.
    fn patch_item(
        &self,
        id: ItemId,
        patch: InventoryPatch,
    ) -> Option<JoinHandle<Result<(), CoreError>>> {
        let now = Utc::now();
        let mut found = false;

        self.state.send_if_modified(|state| {
            let Some(index) = state.items.iter().position(|item| item.id == id) else {
                return false;
            };
            found = true;

            let mut items = state.items.clone();
            let mut item = (*items[index]).clone();
            if let Some(ref title) = patch.title {
                item.title.clone_from(title);
            }
            if let Some(status) = patch.status {
                item.status = status;
            }
            if let Some(location) = patch.location {
                item.location = location;
            }
            if let Some(expires_at) = patch.expires_at {
                item.expires_at = Some(expires_at);
            }
            item.updated_at = now;
            items[index] = Arc::new(item);

            *state = Arc::new(InventoryState::recompute(state.phase.clone(), items));
            true
        });

        if !found {
            debug!(item = %id, "update for unknown inventory item ignored");
            return None;
        }

        let remote = Arc::clone(&self.remote);
        Some(tokio::spawn(async move {
            remote.update_item(id, patch).await.inspect_err(|e| {
                warn!(item = %id, error = %e, "inventory sync failed; keeping optimistic state");
            })
        }))
    }

    // ── Create / delete ──────────────────────────────────────────────

    /// Create an item remotely, then append it to the authoritative
    /// list. On failure the list is unchanged and the error is returned
    /// for logging.
    pub async fn add_item(&self, req: AddInventoryRequest) -> Result<ItemId, CoreError> {
        let id = self.remote.add_item(req.clone()).await?;
        let now = Utc::now();
        let item = Arc::new(InventoryItem {
            id,
            title: req.title,
            product_id: req.product_id,
            category_id: req.category_id,
            status: req.status,
            location: req.location,
            expires_at: req.expires_at,
            created_at: now,
            updated_at: now,
            source: req.source,
        });

        self.state.send_modify(|state| {
            let mut items = state.items.clone();
            items.push(item);
            *state = Arc::new(InventoryState::recompute(state.phase.clone(), items));
        });
        Ok(id)
    }

    /// Remove an item locally and spawn the remote delete. `None` if the
    /// id is unknown.
    pub fn delete_item(&self, id: ItemId) -> Option<JoinHandle<Result<(), CoreError>>> {
        let mut found = false;
        self.state.send_if_modified(|state| {
            let Some(index) = state.items.iter().position(|item| item.id == id) else {
                return false;
            };
            found = true;
            let mut items = state.items.clone();
            items.remove(index);
            *state = Arc::new(InventoryState::recompute(state.phase.clone(), items));
            true
        });

        if !found {
            debug!(item = %id, "delete for unknown inventory item ignored");
            return None;
        }

        let remote = Arc::clone(&self.remote);
        Some(tokio::spawn(async move {
            remote.delete_item(id).await.inspect_err(|e| {
                warn!(item = %id, error = %e, "inventory delete sync failed");
            })
        }))
    }

    // ── Reorder ──────────────────────────────────────────────────────

    /// Move an item within its bucket's sub-list. No-op when the id is
    /// absent from the bucket or already at the target position.
    ///
    /// After a reorder the touched bucket's items sit at the end of the
    /// authoritative list; see `reorder` module docs.
    pub fn move_within_bucket(&self, id: ItemId, target_index: usize, bucket: StorageLocation) {
        self.state.send_if_modified(|state| {
            match reorder::move_within_bucket(&state.items, id, target_index, bucket) {
                Some(items) => {
                    *state = Arc::new(InventoryState::recompute(state.phase.clone(), items));
                    true
                }
                None => false,
            }
        });
    }

    /// Move an item into another bucket at `target_index` (clamped),
    /// spawning the location sync. `None` when the id is unknown.
    pub fn move_to_bucket(
        &self,
        id: ItemId,
        new_bucket: StorageLocation,
        target_index: usize,
    ) -> Option<JoinHandle<Result<(), CoreError>>> {
        let now = Utc::now();
        let mut found = false;

        self.state.send_if_modified(|state| {
            match reorder::move_to_bucket(&state.items, id, new_bucket, target_index, now) {
                Some(items) => {
                    found = true;
                    *state = Arc::new(InventoryState::recompute(state.phase.clone(), items));
                    true
                }
                None => false,
            }
        });

        if !found {
            debug!(item = %id, "cross-bucket move for unknown item ignored");
            return None;
        }

        let remote = Arc::clone(&self.remote);
        Some(tokio::spawn(async move {
            remote
                .update_item(id, InventoryPatch::location(new_bucket))
                .await
                .inspect_err(|e| {
                    warn!(item = %id, error = %e, "bucket move sync failed");
                })
        }))
    }

    fn apply_phase(&self, phase: LoadPhase) {
        self.state.send_modify(|state| {
            *state = Arc::new(InventoryState::recompute(phase, state.items.clone()));
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use futures_core::future::BoxFuture;
    use tokio::sync::oneshot;

    use super::*;
    use crate::model::ItemSource;

    fn item(id: i64, location: StorageLocation, product: Option<i64>) -> InventoryItem {
        InventoryItem {
            id: ItemId(id),
            title: format!("item-{id}"),
            product_id: product.map(ProductId),
            category_id: None,
            status: ItemStatus::Unopened,
            location,
            expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            source: ItemSource::User,
        }
    }

    /// Remote fake: canned fetch results, recorded patches, and an
    /// optional gate that holds a fetch open until released.
    #[derive(Default)]
    struct FakeRemote {
        fetch_result: Mutex<Option<Result<Vec<InventoryItem>, CoreError>>>,
        fetch_gate: Mutex<Option<oneshot::Receiver<()>>>,
        fetch_calls: AtomicUsize,
        patches: Mutex<Vec<(ItemId, InventoryPatch)>>,
        deletes: Mutex<Vec<ItemId>>,
        next_id: AtomicUsize,
    }

    impl InventoryRemote for FakeRemote {
        fn fetch_items(&self) -> BoxFuture<'_, Result<Vec<InventoryItem>, CoreError>> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.fetch_gate.lock().unwrap().take();
            let result = self
                .fetch_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()));
            Box::pin(async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            })
        }

        fn add_item(
            &self,
            _req: AddInventoryRequest,
        ) -> BoxFuture<'_, Result<ItemId, CoreError>> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 100;
            Box::pin(async move { Ok(ItemId(i64::try_from(id).unwrap())) })
        }

        fn update_item(
            &self,
            id: ItemId,
            patch: InventoryPatch,
        ) -> BoxFuture<'_, Result<(), CoreError>> {
            self.patches.lock().unwrap().push((id, patch));
            Box::pin(async { Ok(()) })
        }

        fn delete_item(&self, id: ItemId) -> BoxFuture<'_, Result<(), CoreError>> {
            self.deletes.lock().unwrap().push(id);
            Box::pin(async { Ok(()) })
        }
    }

    fn store_with(items: Vec<InventoryItem>) -> (Arc<FakeRemote>, InventoryStore) {
        let remote = Arc::new(FakeRemote::default());
        let store = InventoryStore::new(Arc::clone(&remote) as Arc<dyn InventoryRemote>);
        store.set_items(items);
        (remote, store)
    }

    #[tokio::test]
    async fn indices_always_match_a_fresh_grouping() {
        let (_, store) = store_with(vec![
            item(1, StorageLocation::Fridge, Some(7)),
            item(2, StorageLocation::Fridge, Some(7)),
            item(3, StorageLocation::Pantry, Some(8)),
        ]);

        // Run a few mutations and re-derive the grouping from the
        // authoritative list after each one.
        store.update_location(ItemId(3), StorageLocation::Freezer);
        store.update_status(ItemId(1), ItemStatus::Opened);
        store.delete_item(ItemId(2));

        let snap = store.snapshot();
        for (location, grouped) in &snap.items_by_location {
            let fresh: Vec<ItemId> = snap
                .items
                .iter()
                .filter(|i| i.location == *location)
                .map(|i| i.id)
                .collect();
            let indexed: Vec<ItemId> = grouped.iter().map(|i| i.id).collect();
            assert_eq!(indexed, fresh);
        }

        assert_eq!(snap.product_counts.get(&ProductId(7)), Some(&1));
        assert_eq!(
            snap.product_counts_by_location
                .get(&ProductId(8))
                .and_then(|by_loc| by_loc.get(&StorageLocation::Freezer)),
            Some(&1)
        );
    }

    #[tokio::test]
    async fn update_unknown_id_is_silent_noop() {
        let (remote, store) = store_with(vec![item(1, StorageLocation::Fridge, None)]);
        let before = store.snapshot();

        assert!(store.update_status(ItemId(99), ItemStatus::Opened).is_none());

        let after = store.snapshot();
        assert_eq!(before.items, after.items);
        assert!(remote.patches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_stamps_updated_at_and_syncs_remote() {
        let (remote, store) = store_with(vec![item(1, StorageLocation::Fridge, None)]);
        let before = store.snapshot().items[0].updated_at;

        let task = store
            .update_status(ItemId(1), ItemStatus::Opened)
            .expect("known id");
        task.await.unwrap().unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.items[0].status, ItemStatus::Opened);
        assert!(snap.items[0].updated_at >= before);

        let patches = remote.patches.lock().unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, ItemId(1));
        assert_eq!(patches[0].1.status, Some(ItemStatus::Opened));
    }

    #[tokio::test]
    async fn fetch_failure_keeps_previous_items() {
        let (remote, store) = store_with(vec![item(1, StorageLocation::Fridge, None)]);
        *remote.fetch_result.lock().unwrap() = Some(Err(CoreError::Network {
            message: "offline".into(),
        }));

        store.fetch().await;

        let snap = store.snapshot();
        assert!(snap.phase.error().is_some());
        assert_eq!(snap.items.len(), 1);
    }

    #[tokio::test]
    async fn stale_fetch_completion_is_dropped_after_set_items() {
        let remote = Arc::new(FakeRemote::default());
        let store = Arc::new(InventoryStore::new(
            Arc::clone(&remote) as Arc<dyn InventoryRemote>
        ));

        let (release, gate) = oneshot::channel();
        *remote.fetch_gate.lock().unwrap() = Some(gate);
        *remote.fetch_result.lock().unwrap() =
            Some(Ok(vec![item(1, StorageLocation::Fridge, None)]));

        let fetching = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.fetch().await })
        };

        // Newer wholesale replacement arrives while the fetch is stuck.
        store.set_items(vec![item(2, StorageLocation::Pantry, None)]);
        release.send(()).unwrap();
        fetching.await.unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].id, ItemId(2));
        assert_eq!(remote.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn add_item_appends_returned_id() {
        let (_, store) = store_with(vec![item(1, StorageLocation::Fridge, None)]);

        let id = store
            .add_item(AddInventoryRequest {
                title: "Butter".into(),
                product_id: Some(ProductId(7)),
                category_id: None,
                status: ItemStatus::Unopened,
                location: StorageLocation::Fridge,
                expires_at: None,
                source: ItemSource::User,
            })
            .await
            .unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.items[1].id, id);
        assert_eq!(snap.items_at(StorageLocation::Fridge).len(), 2);
    }

    #[tokio::test]
    async fn move_to_bucket_reshapes_buckets() {
        let (_, store) = store_with(vec![
            item(1, StorageLocation::Fridge, None),
            item(2, StorageLocation::Fridge, None),
            item(3, StorageLocation::Pantry, None),
        ]);

        let task = store
            .move_to_bucket(ItemId(1), StorageLocation::Pantry, 0)
            .expect("known id");
        task.await.unwrap().unwrap();

        let snap = store.snapshot();
        let pantry: Vec<ItemId> = snap
            .items_at(StorageLocation::Pantry)
            .iter()
            .map(|i| i.id)
            .collect();
        let fridge: Vec<ItemId> = snap
            .items_at(StorageLocation::Fridge)
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(pantry, vec![ItemId(1), ItemId(3)]);
        assert_eq!(fridge, vec![ItemId(2)]);
    }

    #[tokio::test]
    async fn sorted_projections() {
        let mut older = item(1, StorageLocation::Fridge, None);
        older.created_at = Utc::now() - chrono::Duration::hours(2);
        older.expires_at = Some(Utc::now() + chrono::Duration::days(1));
        let mut newer = item(2, StorageLocation::Fridge, None);
        newer.expires_at = None;
        let mut soon = item(3, StorageLocation::Pantry, None);
        soon.created_at = Utc::now() - chrono::Duration::hours(1);
        soon.expires_at = Some(Utc::now() + chrono::Duration::hours(3));

        let (_, store) = store_with(vec![older, newer, soon]);
        let snap = store.snapshot();

        let recent: Vec<ItemId> = snap.sorted_by_recently_added().iter().map(|i| i.id).collect();
        assert_eq!(recent, vec![ItemId(2), ItemId(3), ItemId(1)]);

        let expiry: Vec<ItemId> = snap.sorted_by_expiry().iter().map(|i| i.id).collect();
        assert_eq!(expiry, vec![ItemId(3), ItemId(1), ItemId(2)]);
    }
}
