//! Applying filters to a record collection.

use tableview_model::{MaterializedFilter, Record};
use tracing::debug;

use crate::predicate::{admits, is_active};

/// Positions (into `records`) of the records admitted by the search filter
/// and every active standard filter, in input order.
///
/// Filters with an empty selection are dropped before the scan and cost
/// nothing per record.
pub fn evaluate_indices(
    records: &[Record],
    search: Option<&MaterializedFilter>,
    standard: &[&MaterializedFilter],
) -> Vec<usize> {
    let active: Vec<&MaterializedFilter> = search
        .into_iter()
        .chain(standard.iter().copied())
        .filter(|f| is_active(f))
        .collect();

    if active.is_empty() {
        debug!(records = records.len(), "no active filters");
        return (0..records.len()).collect();
    }

    let retained: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| active.iter().all(|f| admits(f, record).passes()))
        .map(|(i, _)| i)
        .collect();

    debug!(
        records = records.len(),
        active_filters = active.len(),
        retained = retained.len(),
        "filters evaluated"
    );
    retained
}

/// Records admitted by the search filter and every active standard filter.
///
/// The result keeps input order; nothing is re-sorted.
pub fn evaluate<'r>(
    records: &'r [Record],
    search: Option<&MaterializedFilter>,
    standard: &[&MaterializedFilter],
) -> Vec<&'r Record> {
    evaluate_indices(records, search, standard)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}
