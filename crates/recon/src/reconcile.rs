//! Set difference on identifiers.

use std::collections::HashSet;

use crate::model::CanonicalRecord;

/// Distinct identifiers of the keyed records in `records`.
pub fn identifier_set(records: &[CanonicalRecord]) -> HashSet<&str> {
    records.iter().filter_map(CanonicalRecord::identifier).collect()
}

/// Keyed records of `primary` whose identifier does not occur in `secondary`.
///
/// Result order follows `primary`; duplicates in `primary` are all kept or
/// all excluded. Records without an identifier never appear in the result.
pub fn reconcile<'a>(
    primary: &'a [CanonicalRecord],
    secondary: &[CanonicalRecord],
) -> Vec<&'a CanonicalRecord> {
    let known = identifier_set(secondary);
    primary
        .iter()
        .filter(|record| match record.identifier() {
            Some(id) => !known.contains(id),
            None => false,
        })
        .collect()
}
