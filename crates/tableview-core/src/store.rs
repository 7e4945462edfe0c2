//! Holding and editing filter selections.
//!
//! Selections change through immutable replacement: [`set_value`] builds a
//! new filter vector and leaves its input untouched, so a failed edit can
//! never leave a half-updated set behind.

use tableview_model::{FilterId, MaterializedFilter, Selection};
use tracing::info;

use crate::error::{FilterError, FilterWarning};
use crate::reconcile::Reconciliation;

/// Replace one filter's selection, keeping every other filter and the order.
pub fn set_value(
    filters: &[MaterializedFilter],
    target: FilterId,
    value: Selection,
) -> Result<Vec<MaterializedFilter>, FilterError> {
    let index = filters
        .iter()
        .position(|f| f.id == target)
        .ok_or(FilterError::IdentityNotFound(target))?;
    let filter = &filters[index];
    if filter.kind() != value.kind() {
        return Err(FilterError::SelectionKindMismatch {
            label: filter.label().to_string(),
            expected: filter.kind(),
            actual: value.kind(),
        });
    }

    let mut updated = Vec::with_capacity(filters.len());
    updated.extend_from_slice(&filters[..index]);
    updated.push(filter.with_selection(value));
    updated.extend_from_slice(&filters[index + 1..]);
    Ok(updated)
}

/// Filters split into the search box and the rest.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    pub search: Option<&'a MaterializedFilter>,
    pub standard: Vec<&'a MaterializedFilter>,
    pub warnings: Vec<FilterWarning>,
}

/// Split filters into the search filter and standard filters.
///
/// The first filter flagged as search wins; any later ones are demoted to
/// standard filters and reported in [`Partition::warnings`]. Logging is left
/// to the caller so repeated reads stay quiet.
pub fn partition(filters: &[MaterializedFilter]) -> Partition<'_> {
    let mut out = Partition::default();
    let mut demoted = Vec::new();
    for filter in filters {
        if filter.is_search() && out.search.is_none() {
            out.search = Some(filter);
        } else {
            if filter.is_search() {
                demoted.push(filter.label().to_string());
            }
            out.standard.push(filter);
        }
    }
    if let (Some(kept), false) = (out.search, demoted.is_empty()) {
        out.warnings.push(FilterWarning::MultipleSearchFilters {
            kept: kept.label().to_string(),
            demoted,
        });
    }
    out
}

/// The materialized filters of one table, plus the generation counter used
/// to stamp new filter ids.
#[derive(Debug, Clone, Default)]
pub struct FilterStateStore {
    filters: Vec<MaterializedFilter>,
    generation: u64,
}

impl FilterStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &[MaterializedFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn find(&self, id: FilterId) -> Option<&MaterializedFilter> {
        self.filters.iter().find(|f| f.id == id)
    }

    /// Find a filter by its label (first match).
    pub fn find_by_label(&self, label: &str) -> Option<&MaterializedFilter> {
        self.filters.iter().find(|f| f.label() == label)
    }

    /// Generation to stamp on the next re-seed.
    pub fn next_generation(&self) -> u64 {
        self.generation + 1
    }

    /// Store the result of a reconciliation. Returns true if the set changed.
    pub fn apply(&mut self, reconciliation: Reconciliation) -> bool {
        match reconciliation {
            Reconciliation::Unchanged => false,
            Reconciliation::Reseeded(filters) => {
                self.generation = filters
                    .first()
                    .map_or(self.next_generation(), |f| f.id.generation);
                info!(
                    generation = self.generation,
                    filters = filters.len(),
                    "filter definitions re-seeded"
                );
                self.filters = filters;
                true
            }
        }
    }

    /// Replace one selection. On error the store is unchanged.
    pub fn set_value(&mut self, target: FilterId, value: Selection) -> Result<(), FilterError> {
        self.filters = set_value(&self.filters, target, value)?;
        Ok(())
    }

    /// Put every filter back to its seed selection. Identities are kept.
    pub fn clear_all(&mut self) {
        self.filters = self
            .filters
            .iter()
            .map(|f| f.with_selection(Selection::seed(&f.definition.input)))
            .collect();
    }

    pub fn partition(&self) -> Partition<'_> {
        partition(&self.filters)
    }
}

#[cfg(test)]
mod tests {
    use tableview_model::{FieldAccessor, FilterDefinition, FilterInput, FilterKind};

    use super::*;
    use crate::reconcile::reconcile;

    fn seeded(defs: &[FilterDefinition]) -> FilterStateStore {
        let mut store = FilterStateStore::new();
        let generation = store.next_generation();
        store.apply(reconcile(defs, store.filters(), generation));
        store
    }

    fn country() -> FilterDefinition {
        FilterDefinition::new(
            FieldAccessor::field("country"),
            "Country",
            FilterInput::Dropdown {
                available_options: vec![],
            },
        )
    }

    #[test]
    fn set_value_replaces_only_target() {
        let store = seeded(&[
            FilterDefinition::search(FieldAccessor::field("name"), "Search"),
            country(),
        ]);
        let before = store.filters().to_vec();
        let target = before[1].id;
        let after = set_value(&before, target, Selection::Dropdown(Some("Thailand".into())))
            .expect("set value");

        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].selection, Selection::Dropdown(Some("Thailand".into())));
        assert_eq!(before[1].selection, Selection::Dropdown(None));
    }

    #[test]
    fn unknown_id_is_rejected_and_store_untouched() {
        let mut store = seeded(&[country()]);
        let before = store.filters().to_vec();
        let stale = FilterId::new(99, 0);

        let err = store
            .set_value(stale, Selection::Dropdown(Some("x".into())))
            .unwrap_err();
        assert_eq!(err, FilterError::IdentityNotFound(stale));
        assert_eq!(store.filters(), before.as_slice());
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let mut store = seeded(&[country()]);
        let id = store.filters()[0].id;
        let err = store.set_value(id, Selection::Slider(Some(1.0))).unwrap_err();
        assert_eq!(
            err,
            FilterError::SelectionKindMismatch {
                label: "Country".into(),
                expected: FilterKind::Dropdown,
                actual: FilterKind::Slider,
            }
        );
    }

    #[test]
    fn first_search_filter_wins() {
        let store = seeded(&[
            country(),
            FilterDefinition::search(FieldAccessor::field("name"), "Name"),
            FilterDefinition::search(FieldAccessor::field("org"), "Organization"),
        ]);
        let partition = store.partition();
        assert_eq!(partition.search.map(MaterializedFilter::label), Some("Name"));
        let standard: Vec<&str> = partition.standard.iter().map(|f| f.label()).collect();
        assert_eq!(standard, vec!["Country", "Organization"]);
        assert_eq!(
            partition.warnings,
            vec![FilterWarning::MultipleSearchFilters {
                kept: "Name".into(),
                demoted: vec!["Organization".into()],
            }]
        );
    }

    #[test]
    fn clear_all_restores_seed_and_keeps_ids() {
        let mut store = seeded(&[country()]);
        let id = store.filters()[0].id;
        store
            .set_value(id, Selection::Dropdown(Some("Thailand".into())))
            .unwrap();
        store.clear_all();
        assert_eq!(store.filters()[0].selection, Selection::Dropdown(None));
        assert_eq!(store.filters()[0].id, id);
    }

    #[test]
    fn generations_advance_on_reseed() {
        let mut store = seeded(&[country()]);
        let first = store.filters()[0].id.generation;
        let generation = store.next_generation();
        store.apply(reconcile(
            &[FilterDefinition::search(FieldAccessor::field("name"), "Search")],
            store.filters(),
            generation,
        ));
        assert!(store.filters()[0].id.generation > first);
    }
}
