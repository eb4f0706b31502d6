// ── Session facade ──
//
// Central entry point for consumers. Owns the API client, both
// collection stores, the navigation router, and the shared suggestion
// cache. Lives as long as the authenticated session.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use larder_api::{Client, TransportConfig};

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::router::Router;
use crate::store::{InventoryStore, ShoppingStore};
use crate::suggest::{SuggestionCache, SuggestionCoordinator};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Construction builds the
/// HTTP client and wires every store to it; no network traffic happens
/// until [`refresh()`](Self::refresh) or a store operation is called.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    inventory: InventoryStore,
    shopping: ShoppingStore,
    suggestions: Arc<SuggestionCache>,
    api: Arc<Client>,
    router: Mutex<Router>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            bearer_token: Some(config.token.clone()),
        };
        let api = Arc::new(Client::new(config.base_url.clone(), &transport)?);

        let inventory = InventoryStore::new(Arc::clone(&api) as _);
        let shopping = ShoppingStore::new(Arc::clone(&api) as _);
        let suggestions = Arc::new(SuggestionCache::new(config.suggestion_mirror.clone()));

        info!(base_url = %config.base_url, "session created");
        Ok(Self {
            inner: Arc::new(SessionInner {
                config,
                inventory,
                shopping,
                suggestions,
                api,
                router: Mutex::new(Router::new()),
            }),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    // ── Stores ───────────────────────────────────────────────────────

    pub fn inventory(&self) -> &InventoryStore {
        &self.inner.inventory
    }

    pub fn shopping(&self) -> &ShoppingStore {
        &self.inner.shopping
    }

    /// The session-wide navigation router, behind an async lock so
    /// concurrent UI tasks serialize their mutations.
    pub fn router(&self) -> &Mutex<Router> {
        &self.inner.router
    }

    // ── Suggestions ──────────────────────────────────────────────────

    pub fn suggestion_cache(&self) -> Arc<SuggestionCache> {
        Arc::clone(&self.inner.suggestions)
    }

    /// Vend a fresh coordinator over the shared cache. One per consumer;
    /// each tracks its own current category and phase.
    pub fn suggestion_coordinator(&self) -> SuggestionCoordinator {
        SuggestionCoordinator::new(
            Arc::clone(&self.inner.suggestions),
            Arc::clone(&self.inner.api) as _,
        )
    }

    // ── Bulk refresh ─────────────────────────────────────────────────

    /// Fetch both collections concurrently. Errors land in each store's
    /// load phase rather than propagating here.
    pub async fn refresh(&self) {
        tokio::join!(self.inner.inventory.fetch(), self.inner.shopping.fetch());
    }
}
