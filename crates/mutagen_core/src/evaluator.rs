//! # Composite Tree Evaluator
//!
//! Read-only structural recursion over the catalog. Composites only point at
//! items with smaller handles, so every walk bottoms out at base items.
//!
//! An [`ItemId`] that is not in the catalog evaluates as a neutral base
//! item: full stability, depth 0 and no class tags.

use std::collections::BTreeMap;

use crate::catalog::{ClassSet, ItemCatalog, ItemId, ItemKind};

/// Stability assumed for items the catalog does not know.
pub const UNKNOWN_ITEM_STABILITY: f32 = 100.0;

/// Stability of an item.
///
/// Base items return their intrinsic stability; composites return the
/// count-weighted average of their sources.
#[must_use]
pub fn stability_of(catalog: &ItemCatalog, item: ItemId) -> f32 {
    match catalog.get(item).map(|e| &e.kind) {
        Some(ItemKind::Base { stability, .. }) => *stability,
        Some(ItemKind::Composite { sources }) => {
            let mut total = 0.0;
            let mut units = 0u64;
            for source in sources {
                total += stability_of(catalog, source.item) * source.count as f32;
                units += u64::from(source.count);
            }
            if units == 0 {
                UNKNOWN_ITEM_STABILITY
            } else {
                total / units as f32
            }
        }
        None => UNKNOWN_ITEM_STABILITY,
    }
}

/// Merge depth: 0 for base items, `1 + max(source depth)` for composites.
#[must_use]
pub fn depth_of(catalog: &ItemCatalog, item: ItemId) -> u32 {
    match catalog.get(item).map(|e| &e.kind) {
        Some(ItemKind::Composite { sources }) => {
            1 + sources
                .iter()
                .map(|s| depth_of(catalog, s.item))
                .max()
                .unwrap_or(0)
        }
        Some(ItemKind::Base { .. }) | None => 0,
    }
}

/// Class tags carried by an item: its own tag, or the union over sources.
#[must_use]
pub fn class_set_of(catalog: &ItemCatalog, item: ItemId) -> ClassSet {
    match catalog.get(item).map(|e| &e.kind) {
        Some(ItemKind::Base { class, .. }) => ClassSet::single(*class),
        Some(ItemKind::Composite { sources }) => sources
            .iter()
            .fold(ClassSet::EMPTY, |set, s| set.union(class_set_of(catalog, s.item))),
        None => ClassSet::EMPTY,
    }
}

/// Flattens an item into base items with multiplicities.
///
/// Counts multiply down the tree: a composite of `(x, 2)` where `x` is a
/// composite of `(a, 3)` yields `a` six times. Stat systems apply each base
/// item's effect that many times.
#[must_use]
pub fn leaf_tally(catalog: &ItemCatalog, item: ItemId) -> Vec<(ItemId, u64)> {
    let mut tally = BTreeMap::new();
    accumulate_leaves(catalog, item, 1, &mut tally);
    tally.into_iter().collect()
}

fn accumulate_leaves(
    catalog: &ItemCatalog,
    item: ItemId,
    multiplier: u64,
    tally: &mut BTreeMap<ItemId, u64>,
) {
    match catalog.get(item).map(|e| &e.kind) {
        Some(ItemKind::Composite { sources }) => {
            for source in sources {
                let scaled = multiplier.saturating_mul(u64::from(source.count));
                accumulate_leaves(catalog, source.item, scaled, tally);
            }
        }
        Some(ItemKind::Base { .. }) => {
            let entry = tally.entry(item).or_insert(0);
            *entry = entry.saturating_add(multiplier);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClassTag, SourceStack};

    fn fixture() -> (ItemCatalog, ItemId, ItemId, ItemId) {
        let mut catalog = ItemCatalog::new();
        let wing = catalog.add_base("Honey Wing", ClassTag::Winged, 80.0).unwrap();
        let fang = catalog.add_base("Mantis Fang", ClassTag::Predator, 50.0).unwrap();
        let shell = catalog.add_base("Beetle Shell", ClassTag::Swarm, 20.0).unwrap();
        (catalog, wing, fang, shell)
    }

    #[test]
    fn test_leaf_stability_is_intrinsic() {
        let (catalog, wing, fang, _) = fixture();
        assert!((stability_of(&catalog, wing) - 80.0).abs() < f32::EPSILON);
        assert!((stability_of(&catalog, fang) - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_composite_stability_is_count_weighted() {
        let (mut catalog, wing, fang, _) = fixture();
        let m = catalog
            .add_composite(vec![SourceStack::new(wing, 3), SourceStack::new(fang, 1)])
            .unwrap();
        // (80*3 + 50*1) / 4
        assert!((stability_of(&catalog, m) - 72.5).abs() < 1e-4);
    }

    #[test]
    fn test_nested_stability_and_depth() {
        let (mut catalog, wing, fang, shell) = fixture();
        let m1 = catalog
            .add_composite(vec![SourceStack::new(wing, 1), SourceStack::new(fang, 1)])
            .unwrap();
        let m2 = catalog
            .add_composite(vec![SourceStack::new(m1, 1), SourceStack::new(shell, 1)])
            .unwrap();

        assert!((stability_of(&catalog, m1) - 65.0).abs() < 1e-4);
        assert!((stability_of(&catalog, m2) - 42.5).abs() < 1e-4);

        assert_eq!(depth_of(&catalog, wing), 0);
        assert_eq!(depth_of(&catalog, m1), 1);
        assert_eq!(depth_of(&catalog, m2), 2);
    }

    #[test]
    fn test_class_set_is_union() {
        let (mut catalog, wing, fang, _) = fixture();
        let wing2 = catalog.add_base("Dragonfly Wing", ClassTag::Winged, 70.0).unwrap();
        let m = catalog
            .add_composite(vec![
                SourceStack::new(wing, 1),
                SourceStack::new(wing2, 1),
                SourceStack::new(fang, 1),
            ])
            .unwrap();

        let set = class_set_of(&catalog, m);
        assert_eq!(set.len(), 2);
        assert!(set.contains(ClassTag::Winged));
        assert!(set.contains(ClassTag::Predator));
        assert_eq!(class_set_of(&catalog, wing), ClassSet::single(ClassTag::Winged));
    }

    #[test]
    fn test_unknown_item_is_neutral() {
        let (catalog, _, _, _) = fixture();
        let ghost = ItemId::from_raw(42);
        assert!((stability_of(&catalog, ghost) - UNKNOWN_ITEM_STABILITY).abs() < f32::EPSILON);
        assert_eq!(depth_of(&catalog, ghost), 0);
        assert!(class_set_of(&catalog, ghost).is_empty());
        assert!(leaf_tally(&catalog, ghost).is_empty());
    }

    #[test]
    fn test_leaf_tally_multiplies_counts() {
        let (mut catalog, wing, fang, shell) = fixture();
        let m1 = catalog
            .add_composite(vec![SourceStack::new(wing, 3), SourceStack::new(fang, 1)])
            .unwrap();
        let m2 = catalog
            .add_composite(vec![SourceStack::new(m1, 2), SourceStack::new(wing, 1)])
            .unwrap();

        assert_eq!(leaf_tally(&catalog, shell), vec![(shell, 1)]);
        assert_eq!(leaf_tally(&catalog, m2), vec![(wing, 7), (fang, 2)]);
    }
}
