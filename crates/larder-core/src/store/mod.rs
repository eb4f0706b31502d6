// ── Reactive collection stores ──
//
// Each store owns one immutable snapshot (authoritative item list plus
// every derived index) behind a `watch` channel. Mutations rebuild the
// snapshot atomically, so a reader can never observe fresh items next to
// stale indices.

mod inventory;
mod reorder;
mod shopping;

use std::sync::Arc;

pub use inventory::{InventoryState, InventoryStore};
pub use shopping::{ShoppingState, ShoppingStore};

use crate::error::CoreError;

/// Load state of a collection store, observable by consumers.
///
/// `Error` keeps the previous item list intact -- a failed fetch never
/// partially overwrites data.
#[derive(Debug, Clone, Default)]
pub enum LoadPhase {
    #[default]
    Empty,
    Loading,
    Loaded,
    Error(Arc<CoreError>),
}

impl LoadPhase {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}
