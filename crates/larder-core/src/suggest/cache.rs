// ── Suggestion cache ──
//
// Category-keyed cache of advisory payloads, shared by every coordinator
// in the session. Entries are replaced wholesale. An optional JSON
// mirror on disk survives restarts: loaded lazily on first access,
// rewritten in full on every insert.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::{CategoryId, SuggestionEntry};

/// Shared suggestion cache with an in-flight claim registry.
///
/// The registry lets concurrent requests for the same category collapse
/// into one backend call: the first caller claims the flight, later
/// callers join it and re-read the cache once the flight completes.
pub struct SuggestionCache {
    entries: DashMap<CategoryId, Arc<SuggestionEntry>>,
    in_flight: Arc<DashMap<CategoryId, watch::Receiver<bool>>>,
    mirror: Option<PathBuf>,
    mirror_loaded: OnceLock<()>,
}

/// Outcome of claiming the flight for a category.
pub(crate) enum Flight {
    /// This caller performs the fetch; dropping the guard completes the
    /// flight for everyone joined to it.
    Leader(FlightGuard),
    /// Someone else is already fetching; await completion on the channel
    /// and re-read the cache.
    Follower(watch::Receiver<bool>),
}

pub(crate) struct FlightGuard {
    registry: Arc<DashMap<CategoryId, watch::Receiver<bool>>>,
    category: CategoryId,
    done: watch::Sender<bool>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.category);
        self.done.send_replace(true);
    }
}

impl SuggestionCache {
    pub fn new(mirror: Option<PathBuf>) -> Self {
        Self {
            entries: DashMap::new(),
            in_flight: Arc::new(DashMap::new()),
            mirror,
            mirror_loaded: OnceLock::new(),
        }
    }

    pub fn get(&self, category: CategoryId) -> Option<Arc<SuggestionEntry>> {
        self.ensure_mirror_loaded();
        self.entries.get(&category).map(|e| Arc::clone(&e))
    }

    /// Insert an entry, keyed by its own category, and rewrite the mirror.
    pub fn insert(&self, entry: Arc<SuggestionEntry>) {
        self.ensure_mirror_loaded();
        self.entries.insert(entry.category, entry);
        self.write_mirror();
    }

    /// Drop every cached entry and the on-disk mirror.
    pub fn clear(&self) {
        self.ensure_mirror_loaded();
        self.entries.clear();
        if let Some(path) = &self.mirror {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(error = %e, path = %path.display(), "failed to remove suggestion mirror"),
            }
        }
    }

    /// Claim the flight for `category`, or join the one in progress.
    pub(crate) fn claim(&self, category: CategoryId) -> Flight {
        match self.in_flight.entry(category) {
            Entry::Occupied(occupied) => Flight::Follower(occupied.get().clone()),
            Entry::Vacant(vacant) => {
                let (done, completion) = watch::channel(false);
                vacant.insert(completion);
                Flight::Leader(FlightGuard {
                    registry: Arc::clone(&self.in_flight),
                    category,
                    done,
                })
            }
        }
    }

    // ── Disk mirror ──────────────────────────────────────────────────

    fn ensure_mirror_loaded(&self) {
        self.mirror_loaded.get_or_init(|| {
            let Some(path) = &self.mirror else { return };
            let data = match fs::read(path) {
                Ok(data) => data,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "failed to read suggestion mirror");
                    return;
                }
            };
            match serde_json::from_slice::<Vec<SuggestionEntry>>(&data) {
                Ok(entries) => {
                    debug!(count = entries.len(), "loaded suggestion mirror");
                    for entry in entries {
                        self.entries.insert(entry.category, Arc::new(entry));
                    }
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "discarding malformed suggestion mirror");
                }
            }
        });
    }

    fn write_mirror(&self) {
        let Some(path) = &self.mirror else { return };
        let entries: Vec<Arc<SuggestionEntry>> =
            self.entries.iter().map(|e| Arc::clone(&e)).collect();
        let serialized = match serde_json::to_vec_pretty(&entries) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "failed to serialize suggestion mirror");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(error = %e, path = %parent.display(), "failed to create mirror directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, serialized) {
            warn!(error = %e, path = %path.display(), "failed to write suggestion mirror");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ExpiryType, LocationDays, ShelfLife, StorageLocation};

    fn entry(category: i64) -> Arc<SuggestionEntry> {
        Arc::new(SuggestionEntry {
            category: CategoryId(category),
            shelf_life: ShelfLife {
                unopened: LocationDays {
                    pantry: Some(10),
                    fridge: Some(21),
                    freezer: None,
                },
                opened: LocationDays::default(),
            },
            expiry_type: ExpiryType::BestBefore,
            recommended_location: StorageLocation::Pantry,
        })
    }

    #[test]
    fn insert_then_get_round_trips() {
        let cache = SuggestionCache::new(None);
        assert!(cache.get(CategoryId(1)).is_none());
        cache.insert(entry(1));
        assert_eq!(cache.get(CategoryId(1)).unwrap().category, CategoryId(1));
    }

    #[test]
    fn mirror_survives_a_new_cache_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suggestions.json");

        let cache = SuggestionCache::new(Some(path.clone()));
        cache.insert(entry(3));
        cache.insert(entry(7));

        let reloaded = SuggestionCache::new(Some(path));
        assert!(reloaded.get(CategoryId(3)).is_some());
        assert!(reloaded.get(CategoryId(7)).is_some());
        assert!(reloaded.get(CategoryId(9)).is_none());
    }

    #[test]
    fn clear_removes_entries_and_mirror_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suggestions.json");

        let cache = SuggestionCache::new(Some(path.clone()));
        cache.insert(entry(3));
        assert!(path.exists());

        cache.clear();
        assert!(cache.get(CategoryId(3)).is_none());
        assert!(!path.exists());
    }

    #[test]
    fn malformed_mirror_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suggestions.json");
        fs::write(&path, b"not json").unwrap();

        let cache = SuggestionCache::new(Some(path));
        assert!(cache.get(CategoryId(1)).is_none());
    }

    #[tokio::test]
    async fn second_claim_joins_the_first() {
        let cache = SuggestionCache::new(None);

        let Flight::Leader(guard) = cache.claim(CategoryId(1)) else {
            panic!("first claim should lead");
        };
        let Flight::Follower(mut rx) = cache.claim(CategoryId(1)) else {
            panic!("second claim should follow");
        };
        // Different category gets its own flight.
        assert!(matches!(cache.claim(CategoryId(2)), Flight::Leader(_)));

        drop(guard);
        while !*rx.borrow_and_update() {
            rx.changed().await.unwrap();
        }
        // Flight complete: the next claim leads again.
        assert!(matches!(cache.claim(CategoryId(1)), Flight::Leader(_)));
    }
}
