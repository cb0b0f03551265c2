//! Diff reconciliation
//!
//! Pairs the added and removed sides of a raw dependency diff into a single list
//! of added, updated and removed entries. Records are grouped per side by name;
//! a later record with the same name on the same side replaces the earlier one.
//! Output is ordered by name so downstream processing is deterministic.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{ChangeType, DiffSide, RawDependency, ReconciledDependency};

/// Classify raw diff records into reconciled dependencies, sorted by name
pub fn reconcile<I>(records: I) -> Vec<ReconciledDependency>
where
    I: IntoIterator<Item = RawDependency>,
{
    let mut added: BTreeMap<String, RawDependency> = BTreeMap::new();
    let mut removed: BTreeMap<String, RawDependency> = BTreeMap::new();

    for record in records {
        let side = match record.change_type {
            DiffSide::Added => &mut added,
            DiffSide::Removed => &mut removed,
        };
        if let Some(previous) = side.insert(record.name.clone(), record) {
            debug!(
                name = %previous.name,
                dropped_version = ?previous.version,
                "Duplicate dependency on one side of the diff, keeping the last record"
            );
        }
    }

    let mut reconciled = Vec::with_capacity(added.len() + removed.len());
    for (name, record) in added {
        match removed.remove(&name) {
            Some(old) => reconciled.push(ReconciledDependency::updated(record, old)),
            None => reconciled.push(ReconciledDependency::from_record(record, ChangeType::Added)),
        }
    }
    reconciled.extend(
        removed
            .into_values()
            .map(|record| ReconciledDependency::from_record(record, ChangeType::Removed)),
    );

    // Added/updated and removed entries were produced from two ordered passes.
    reconciled.sort_by(|a, b| a.name.cmp(&b.name));
    reconciled
}
