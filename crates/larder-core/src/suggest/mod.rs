// ── Suggestion caching & request coordination ──

mod cache;
mod coordinator;

pub use cache::SuggestionCache;
pub use coordinator::{SuggestionCoordinator, SuggestionPhase};
