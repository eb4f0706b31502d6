// ── Navigation router ──
//
// Per-tab push/pop stacks, one modal-sheet slot, and a tint / tab-bar
// side channel derived from the top of the selected tab's stack. Lives
// for the session; every mutation bumps a revision counter that
// subscribers can watch.

use std::collections::HashMap;

use tokio::sync::watch;

use crate::model::{ItemId, ProductId, StorageLocation};
use crate::stream::StateStream;

/// Top-level tabs. Each owns an independent navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Inventory,
    Shopping,
    Stats,
    Settings,
}

/// Accent tint a destination may impose on the surrounding chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// App default accent.
    Primary,
    /// Cool accent used for chilled storage.
    Cool,
    /// Deep accent used for frozen storage.
    Frost,
    /// Warm accent for anything expiry-critical.
    Alert,
}

/// A pushable screen. Closed set; payload variants carry exactly the
/// data the presented screen needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    ProductDetail { product: ProductId },
    LocationDetail { location: StorageLocation },
    ExpiringSoon,
    History,
    Notifications,
    About,
}

impl Destination {
    /// Tint override for this destination, if it has one.
    /// Pure function of the variant tag.
    pub const fn tint(&self) -> Option<Tint> {
        match self {
            Self::LocationDetail {
                location: StorageLocation::Fridge,
            } => Some(Tint::Cool),
            Self::LocationDetail {
                location: StorageLocation::Freezer,
            } => Some(Tint::Frost),
            Self::ExpiringSoon => Some(Tint::Alert),
            _ => None,
        }
    }

    /// Whether the tab bar stays visible while this destination is on top.
    pub const fn shows_tab_bar(&self) -> bool {
        !matches!(self, Self::ProductDetail { .. } | Self::LocationDetail { .. })
    }
}

/// Action attached to an item-action sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Edit,
    Move,
    Delete,
}

/// Modal sheet content. At most one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sheet {
    AddItem { location: Option<StorageLocation> },
    ItemActions { item: ItemId, action: ItemAction },
    MoveToLocation { target: StorageLocation },
    CompletePurchase { item: ItemId },
}

/// Per-tab navigation stacks plus the single modal-sheet slot.
///
/// A tab with no entry in the map behaves identically to one mapped to an
/// empty stack. Popping an empty stack is a guarded no-op, never a panic.
pub struct Router {
    stacks: HashMap<Tab, Vec<Destination>>,
    selected: Tab,
    sheet: Option<Sheet>,
    revision: watch::Sender<u64>,
}

impl Router {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0u64);
        Self {
            stacks: HashMap::new(),
            selected: Tab::Inventory,
            sheet: None,
            revision,
        }
    }

    // ── Stack operations ─────────────────────────────────────────────

    /// Push a destination onto `tab`'s stack (default: selected tab).
    /// Duplicate pushes of the same destination are permitted.
    pub fn push(&mut self, destination: Destination, tab: Option<Tab>) {
        let tab = tab.unwrap_or(self.selected);
        self.stacks.entry(tab).or_default().push(destination);
        self.bump();
    }

    /// Pop the top destination from `tab`'s stack. No-op when empty.
    pub fn pop(&mut self, tab: Option<Tab>) {
        let tab = tab.unwrap_or(self.selected);
        if let Some(stack) = self.stacks.get_mut(&tab) {
            if stack.pop().is_some() {
                self.bump();
            }
        }
    }

    /// Empty `tab`'s stack.
    pub fn reset_to_root(&mut self, tab: Option<Tab>) {
        let tab = tab.unwrap_or(self.selected);
        if let Some(stack) = self.stacks.get_mut(&tab) {
            if !stack.is_empty() {
                stack.clear();
                self.bump();
            }
        }
    }

    // ── Tab selection ────────────────────────────────────────────────

    pub fn selected_tab(&self) -> Tab {
        self.selected
    }

    /// Switch tabs. Every tab's stack is preserved across switches.
    pub fn select_tab(&mut self, tab: Tab) {
        if self.selected != tab {
            self.selected = tab;
            self.bump();
        }
    }

    // ── Sheet slot ───────────────────────────────────────────────────

    /// Present a sheet, replacing any currently presented one. `None`
    /// dismisses; dismissing with nothing presented is a no-op.
    pub fn present_sheet(&mut self, sheet: Option<Sheet>) {
        if self.sheet != sheet {
            self.sheet = sheet;
            self.bump();
        }
    }

    pub fn dismiss_sheet(&mut self) {
        self.present_sheet(None);
    }

    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    // ── Derived reads ────────────────────────────────────────────────

    /// Top of the given tab's stack (default: selected tab).
    pub fn current(&self, tab: Option<Tab>) -> Option<&Destination> {
        let tab = tab.unwrap_or(self.selected);
        self.stacks.get(&tab).and_then(|stack| stack.last())
    }

    pub fn depth(&self, tab: Tab) -> usize {
        self.stacks.get(&tab).map_or(0, Vec::len)
    }

    /// Tint for the selected tab's top destination; `Primary` at root.
    pub fn current_tint(&self) -> Tint {
        self.current(None)
            .and_then(Destination::tint)
            .unwrap_or(Tint::Primary)
    }

    /// Tab-bar visibility for the selected tab's top destination;
    /// visible at root.
    pub fn tab_bar_visible(&self) -> bool {
        self.current(None).is_none_or(Destination::shows_tab_bar)
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Subscribe to the revision counter, bumped on every mutation.
    pub fn subscribe(&self) -> StateStream<u64> {
        StateStream::new(self.revision.subscribe())
    }

    fn bump(&self) {
        self.revision.send_modify(|v| *v += 1);
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
