// ── Reorder engine ──
//
// Pure functions over the inventory store's authoritative list. Both
// operations rebuild the list as "everything else, in order, then the
// touched bucket" -- the touched bucket's items always end up appended at
// the end of the authoritative list. That is observable, documented
// behavior: downstream projections are bucket-keyed or sort-keyed, so
// absolute cross-bucket order never reaches a consumer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{InventoryItem, ItemId, StorageLocation};

/// Move an item to `target_index` within its bucket's filtered sub-list.
///
/// Returns `None` (no change) when the item is not in the bucket or is
/// already at the target position. `target_index` past the end of the
/// sub-list is clamped.
pub(crate) fn move_within_bucket(
    items: &[Arc<InventoryItem>],
    id: ItemId,
    target_index: usize,
    bucket: StorageLocation,
) -> Option<Vec<Arc<InventoryItem>>> {
    let mut bucket_items: Vec<Arc<InventoryItem>> = items
        .iter()
        .filter(|item| item.location == bucket)
        .cloned()
        .collect();

    let source = bucket_items.iter().position(|item| item.id == id)?;
    let target = target_index.min(bucket_items.len());
    if source == target {
        return None;
    }

    let moved = bucket_items.remove(source);
    // Removing before the target shifts subsequent indices left by one.
    let insert_at = if source < target { target - 1 } else { target };
    bucket_items.insert(insert_at, moved);

    Some(rebuild(items, bucket, bucket_items))
}

/// Move an item into `new_bucket` at `target_index` (clamped), rewriting
/// its location attribute and stamping `updated_at`.
///
/// Returns `None` when the id is unknown.
pub(crate) fn move_to_bucket(
    items: &[Arc<InventoryItem>],
    id: ItemId,
    new_bucket: StorageLocation,
    target_index: usize,
    at: DateTime<Utc>,
) -> Option<Vec<Arc<InventoryItem>>> {
    let source = items.iter().position(|item| item.id == id)?;

    let mut remaining: Vec<Arc<InventoryItem>> = items.to_vec();
    let moved = remaining.remove(source);
    let moved = Arc::new(moved.relocated(new_bucket, at));

    let mut bucket_items: Vec<Arc<InventoryItem>> = remaining
        .iter()
        .filter(|item| item.location == new_bucket)
        .cloned()
        .collect();
    let insert_at = target_index.min(bucket_items.len());
    bucket_items.insert(insert_at, moved);

    Some(rebuild(&remaining, new_bucket, bucket_items))
}

/// Everything outside `bucket` in original order, then the reordered
/// bucket appended.
fn rebuild(
    items: &[Arc<InventoryItem>],
    bucket: StorageLocation,
    bucket_items: Vec<Arc<InventoryItem>>,
) -> Vec<Arc<InventoryItem>> {
    let mut next: Vec<Arc<InventoryItem>> = items
        .iter()
        .filter(|item| item.location != bucket)
        .cloned()
        .collect();
    next.extend(bucket_items);
    next
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ItemSource, ItemStatus};

    fn item(id: i64, location: StorageLocation) -> Arc<InventoryItem> {
        Arc::new(InventoryItem {
            id: ItemId(id),
            title: format!("item-{id}"),
            product_id: None,
            category_id: None,
            status: ItemStatus::Unopened,
            location,
            expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            source: ItemSource::User,
        })
    }

    fn ids(items: &[Arc<InventoryItem>]) -> Vec<i64> {
        items.iter().map(|i| i.id.0).collect()
    }

    fn bucket_ids(items: &[Arc<InventoryItem>], bucket: StorageLocation) -> Vec<i64> {
        items
            .iter()
            .filter(|i| i.location == bucket)
            .map(|i| i.id.0)
            .collect()
    }

    #[test]
    fn move_within_bucket_to_same_index_is_noop() {
        let items = vec![
            item(1, StorageLocation::Fridge),
            item(2, StorageLocation::Fridge),
            item(3, StorageLocation::Pantry),
        ];
        assert!(move_within_bucket(&items, ItemId(1), 0, StorageLocation::Fridge).is_none());
        assert!(move_within_bucket(&items, ItemId(2), 1, StorageLocation::Fridge).is_none());
    }

    #[test]
    fn move_within_bucket_unknown_id_is_noop() {
        let items = vec![item(1, StorageLocation::Fridge)];
        assert!(move_within_bucket(&items, ItemId(99), 0, StorageLocation::Fridge).is_none());
        // Known id, wrong bucket: also absent from the sub-list.
        assert!(move_within_bucket(&items, ItemId(1), 0, StorageLocation::Pantry).is_none());
    }

    #[test]
    fn move_within_bucket_adjusts_for_removal_before_target() {
        let items = vec![
            item(1, StorageLocation::Fridge),
            item(2, StorageLocation::Fridge),
            item(3, StorageLocation::Fridge),
        ];
        // Target is an insertion gap in the pre-removal sub-list: gap 2
        // sits before item 3, gap 3 is the end.
        let next = move_within_bucket(&items, ItemId(1), 2, StorageLocation::Fridge).unwrap();
        assert_eq!(bucket_ids(&next, StorageLocation::Fridge), vec![2, 1, 3]);

        let next = move_within_bucket(&items, ItemId(1), 3, StorageLocation::Fridge).unwrap();
        assert_eq!(bucket_ids(&next, StorageLocation::Fridge), vec![2, 3, 1]);

        let next = move_within_bucket(&items, ItemId(3), 0, StorageLocation::Fridge).unwrap();
        assert_eq!(bucket_ids(&next, StorageLocation::Fridge), vec![3, 1, 2]);
    }

    #[test]
    fn move_within_bucket_target_past_end_is_clamped() {
        let items = vec![
            item(1, StorageLocation::Fridge),
            item(2, StorageLocation::Fridge),
            item(3, StorageLocation::Fridge),
        ];
        let clamped = move_within_bucket(&items, ItemId(1), 99, StorageLocation::Fridge).unwrap();
        let exact = move_within_bucket(&items, ItemId(1), 3, StorageLocation::Fridge).unwrap();
        assert_eq!(ids(&clamped), ids(&exact));
        assert_eq!(bucket_ids(&clamped, StorageLocation::Fridge), vec![2, 3, 1]);
    }

    #[test]
    fn moved_bucket_is_appended_after_other_buckets() {
        let items = vec![
            item(1, StorageLocation::Fridge),
            item(2, StorageLocation::Pantry),
            item(3, StorageLocation::Fridge),
        ];
        let next = move_within_bucket(&items, ItemId(3), 0, StorageLocation::Fridge).unwrap();
        // Pantry first (original order), fridge appended at the end.
        assert_eq!(ids(&next), vec![2, 3, 1]);
    }

    #[test]
    fn move_to_bucket_scenario_from_mixed_buckets() {
        // [{1, fridge}, {2, fridge}, {3, pantry}]; move 1 to pantry at 0.
        let items = vec![
            item(1, StorageLocation::Fridge),
            item(2, StorageLocation::Fridge),
            item(3, StorageLocation::Pantry),
        ];
        let next =
            move_to_bucket(&items, ItemId(1), StorageLocation::Pantry, 0, Utc::now()).unwrap();

        assert_eq!(bucket_ids(&next, StorageLocation::Pantry), vec![1, 3]);
        assert_eq!(bucket_ids(&next, StorageLocation::Fridge), vec![2]);

        let moved = next.iter().find(|i| i.id == ItemId(1)).unwrap();
        assert_eq!(moved.location, StorageLocation::Pantry);
    }

    #[test]
    fn move_to_bucket_clamps_target_index() {
        let items = vec![
            item(1, StorageLocation::Fridge),
            item(2, StorageLocation::Pantry),
        ];
        let clamped =
            move_to_bucket(&items, ItemId(1), StorageLocation::Pantry, 99, Utc::now()).unwrap();
        assert_eq!(bucket_ids(&clamped, StorageLocation::Pantry), vec![2, 1]);

        let exact =
            move_to_bucket(&items, ItemId(1), StorageLocation::Pantry, 1, Utc::now()).unwrap();
        assert_eq!(
            bucket_ids(&clamped, StorageLocation::Pantry),
            bucket_ids(&exact, StorageLocation::Pantry)
        );
    }

    #[test]
    fn move_to_bucket_unknown_id_is_noop() {
        let items = vec![item(1, StorageLocation::Fridge)];
        assert!(move_to_bucket(&items, ItemId(9), StorageLocation::Pantry, 0, Utc::now()).is_none());
    }

    #[test]
    fn move_to_bucket_stamps_updated_at() {
        let items = vec![item(1, StorageLocation::Fridge)];
        let before = items[0].updated_at;
        let at = before + chrono::Duration::seconds(5);
        let next = move_to_bucket(&items, ItemId(1), StorageLocation::Freezer, 0, at).unwrap();
        assert_eq!(next[0].updated_at, at);
    }
}
