// ── Suggestion request coordinator ──
//
// One coordinator per consumer (an add-item form, a detail screen).
// Tracks which category the consumer is currently looking at and drives
// a small phase machine for it. Results always land in the shared cache;
// the phase only advances when the completion still matches the
// category the consumer is on.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use super::cache::{Flight, SuggestionCache};
use crate::error::CoreError;
use crate::model::{CategoryId, SuggestionEntry};
use crate::remote::SuggestionSource;
use crate::stream::StateStream;

/// Phase of the consumer's current suggestion request.
#[derive(Debug, Clone, Default)]
pub enum SuggestionPhase {
    #[default]
    Idle,
    Loading,
    Loaded(Arc<SuggestionEntry>),
    Failed(Arc<CoreError>),
}

impl SuggestionPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn entry(&self) -> Option<&Arc<SuggestionEntry>> {
        match self {
            Self::Loaded(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Per-consumer coordinator over the shared [`SuggestionCache`].
pub struct SuggestionCoordinator {
    cache: Arc<SuggestionCache>,
    source: Arc<dyn SuggestionSource>,
    current: Mutex<Option<CategoryId>>,
    phase: watch::Sender<SuggestionPhase>,
}

impl SuggestionCoordinator {
    pub fn new(cache: Arc<SuggestionCache>, source: Arc<dyn SuggestionSource>) -> Self {
        let (phase, _) = watch::channel(SuggestionPhase::Idle);
        Self {
            cache,
            source,
            current: Mutex::new(None),
            phase,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn phase(&self) -> SuggestionPhase {
        self.phase.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream<SuggestionPhase> {
        StateStream::new(self.phase.subscribe())
    }

    /// Cached entry for a category, without touching the phase machine.
    pub fn cached(&self, category: CategoryId) -> Option<Arc<SuggestionEntry>> {
        self.cache.get(category)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Resolve suggestions for `category`, serving from the cache when
    /// possible and collapsing concurrent fetches for the same category
    /// into one backend call.
    ///
    /// Switching categories retargets the coordinator: a completion for
    /// a category the consumer has since left still populates the cache
    /// but never overwrites the phase.
    pub async fn fetch_suggestions(
        &self,
        category: CategoryId,
    ) -> Result<Arc<SuggestionEntry>, Arc<CoreError>> {
        self.retarget(category);

        if let Some(entry) = self.cache.get(category) {
            self.publish(category, SuggestionPhase::Loaded(Arc::clone(&entry)));
            return Ok(entry);
        }

        self.publish(category, SuggestionPhase::Loading);
        match self.cache.claim(category) {
            Flight::Leader(guard) => {
                let outcome = match self.source.fetch_suggestions(category).await {
                    Ok(entry) => {
                        let entry = Arc::new(entry);
                        // Cache before releasing the flight so joiners
                        // and latecomers always hit.
                        self.cache.insert(Arc::clone(&entry));
                        Ok(entry)
                    }
                    Err(e) => Err(Arc::new(e)),
                };
                drop(guard);

                match &outcome {
                    Ok(entry) => {
                        self.publish(category, SuggestionPhase::Loaded(Arc::clone(entry)));
                    }
                    Err(e) => self.publish(category, SuggestionPhase::Failed(Arc::clone(e))),
                }
                outcome
            }
            Flight::Follower(mut completion) => {
                debug!(category = %category, "joining suggestion fetch in flight");
                while !*completion.borrow_and_update() {
                    if completion.changed().await.is_err() {
                        break;
                    }
                }
                match self.cache.get(category) {
                    Some(entry) => {
                        self.publish(category, SuggestionPhase::Loaded(Arc::clone(&entry)));
                        Ok(entry)
                    }
                    None => {
                        let err = Arc::new(CoreError::SuggestionUnavailable { category });
                        self.publish(category, SuggestionPhase::Failed(Arc::clone(&err)));
                        Err(err)
                    }
                }
            }
        }
    }

    /// Point the coordinator at a category, resetting the phase when it
    /// actually changes.
    fn retarget(&self, category: CategoryId) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *current != Some(category) {
            *current = Some(category);
            self.phase.send_replace(SuggestionPhase::Idle);
        }
    }

    fn publish(&self, category: CategoryId, phase: SuggestionPhase) {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *current == Some(category) {
            self.phase.send_replace(phase);
        } else {
            debug!(category = %category, "dropping stale suggestion completion");
        }
    }
}
