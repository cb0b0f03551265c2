//! Property-based tests for diff reconciliation

use std::collections::BTreeSet;

use depdiff_core::{reconcile, ChangeType, RawDependency};
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-f]{1,3}"
}

fn side_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((name_strategy(), "[0-9]\\.[0-9]"), 0..20)
}

fn records(added: &[(String, String)], removed: &[(String, String)]) -> Vec<RawDependency> {
    added
        .iter()
        .map(|(n, v)| RawDependency::added(n.clone()).with_version(v.clone()))
        .chain(
            removed
                .iter()
                .map(|(n, v)| RawDependency::removed(n.clone()).with_version(v.clone())),
        )
        .collect()
}

proptest! {
    /// Reconciled count equals added-only + removed-only + names on both sides
    #[test]
    fn prop_cardinality(added in side_strategy(), removed in side_strategy()) {
        let added_names: BTreeSet<&String> = added.iter().map(|(n, _)| n).collect();
        let removed_names: BTreeSet<&String> = removed.iter().map(|(n, _)| n).collect();
        let union: BTreeSet<&String> = added_names.union(&removed_names).copied().collect();

        let deps = reconcile(records(&added, &removed));

        prop_assert_eq!(deps.len(), union.len());
        let updated = deps.iter().filter(|d| d.change_type == ChangeType::Updated).count();
        prop_assert_eq!(updated, added_names.intersection(&removed_names).count());
    }

    /// Names are unique and sorted
    #[test]
    fn prop_sorted_unique(added in side_strategy(), removed in side_strategy()) {
        let deps = reconcile(records(&added, &removed));
        for pair in deps.windows(2) {
            prop_assert!(pair[0].name < pair[1].name);
        }
    }

    /// Disjoint sides never produce updates
    #[test]
    fn prop_disjoint_has_no_updates(names in prop::collection::btree_set(name_strategy(), 0..20)) {
        let (added, removed): (Vec<_>, Vec<_>) = names
            .into_iter()
            .enumerate()
            .map(|(i, n)| (i, (n, "1.0".to_string())))
            .partition(|(i, _)| i % 2 == 0);
        let added: Vec<_> = added.into_iter().map(|(_, r)| r).collect();
        let removed: Vec<_> = removed.into_iter().map(|(_, r)| r).collect();

        let deps = reconcile(records(&added, &removed));

        let count = |t: ChangeType| deps.iter().filter(|d| d.change_type == t).count();
        prop_assert_eq!(count(ChangeType::Updated), 0);
        prop_assert_eq!(count(ChangeType::Added), added.len());
        prop_assert_eq!(count(ChangeType::Removed), removed.len());
    }

    /// Updates pair the last removed version with the last added version
    #[test]
    fn prop_update_versions(added in side_strategy(), removed in side_strategy()) {
        let deps = reconcile(records(&added, &removed));
        for dep in deps.iter().filter(|d| d.change_type == ChangeType::Updated) {
            let last_added = added.iter().rev().find(|(n, _)| *n == dep.name).map(|(_, v)| v);
            let last_removed = removed.iter().rev().find(|(n, _)| *n == dep.name).map(|(_, v)| v);
            prop_assert_eq!(dep.version.as_ref(), last_added);
            prop_assert_eq!(dep.previous_version.as_ref(), last_removed);
        }
    }
}
