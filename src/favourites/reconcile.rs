use crate::model::{Category, FavouriteRecord, ItemId};
use std::collections::HashSet;

/// Categories the user has favourited, in catalog order.
///
/// - Ids compare after [`ItemId`] normalization, so `"2"` matches `2`.
/// - Each catalog id appears at most once, however many records point at it.
/// - Records with no catalog counterpart are dropped.
/// - Either side empty (or not loaded yet) gives an empty list.
pub fn reconcile(catalog: &[Category], records: &[FavouriteRecord]) -> Vec<Category> {
    if catalog.is_empty() || records.is_empty() {
        return Vec::new();
    }

    let wanted: HashSet<ItemId> = records.iter().map(|r| r.item_id).collect();
    let mut emitted = HashSet::with_capacity(wanted.len());

    catalog
        .iter()
        .filter(|category| wanted.contains(&category.id) && emitted.insert(category.id))
        .cloned()
        .collect()
}

/// Favourite ids that reference no catalog entry, in record order, without repeats.
pub fn stale_ids(catalog: &[Category], records: &[FavouriteRecord]) -> Vec<ItemId> {
    let known: HashSet<ItemId> = catalog.iter().map(|c| c.id).collect();
    let mut reported = HashSet::new();

    records
        .iter()
        .map(|r| r.item_id)
        .filter(|id| !known.contains(id) && reported.insert(*id))
        .collect()
}
